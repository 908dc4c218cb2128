//! # Null distribution collaborator
//!
//! Thin wrappers over [statrs] exposing exactly the distribution surface the
//! tests consume: upper-tail survival probabilities (and the matching CDFs)
//! of the F, chi-squared, Student's t and standard normal distributions.
//!
//! The wrappers are total over finite inputs: parameter combinations that
//! the underlying distribution rejects (non-positive degrees of freedom)
//! produce `NaN` instead of a panic. Dispatchers validate their degrees of
//! freedom before getting here, so a `NaN` escaping this module indicates a
//! caller bug, not user input.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

/// Upper-tail survival probability `P(F > stat)` of the
/// [F distribution](https://en.wikipedia.org/wiki/F-distribution) with
/// `(df1, df2)` degrees of freedom.
#[must_use]
pub fn f_survival(stat: f64, df1: f64, df2: f64) -> f64 {
    return match FisherSnedecor::new(df1, df2) {
        Ok(d) => d.sf(stat),
        Err(_) => f64::NAN,
    };
}

/// Upper-tail survival probability `P(X > stat)` of the
/// [chi-squared distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
/// with `df` degrees of freedom.
#[must_use]
pub fn chi_squared_survival(stat: f64, df: f64) -> f64 {
    return match ChiSquared::new(df) {
        Ok(d) => d.sf(stat),
        Err(_) => f64::NAN,
    };
}

/// Upper-tail survival probability of
/// [Student's t distribution](https://en.wikipedia.org/wiki/Student%27s_t-distribution)
/// with `df` degrees of freedom.
#[must_use]
pub fn student_t_survival(stat: f64, df: f64) -> f64 {
    return match StudentsT::new(0.0, 1.0, df) {
        Ok(d) => d.sf(stat),
        Err(_) => f64::NAN,
    };
}

/// CDF of Student's t distribution with `df` degrees of freedom.
#[must_use]
pub fn student_t_cdf(stat: f64, df: f64) -> f64 {
    return match StudentsT::new(0.0, 1.0, df) {
        Ok(d) => d.cdf(stat),
        Err(_) => f64::NAN,
    };
}

/// Upper-tail survival probability of the standard normal distribution.
#[must_use]
pub fn normal_survival(z: f64) -> f64 {
    return match Normal::new(0.0, 1.0) {
        Ok(d) => d.sf(z),
        Err(_) => f64::NAN,
    };
}

/// CDF of the standard normal distribution.
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    return match Normal::new(0.0, 1.0) {
        Ok(d) => d.cdf(z),
        Err(_) => f64::NAN,
    };
}
