//! # Result values
//!
//! Small immutable records produced by the test dispatchers. Each one holds
//! the test statistic, the p-value and the degrees of freedom of the test
//! that produced it. The p-value is derived from the statistic and the
//! degrees of freedom once, eagerly, at construction time (trough the
//! [distribution collaborator](crate::distributions)) and can never be set
//! independently afterwards.
//!
//! Every result exposes `statistic()`, `p_value()` and a positional
//! `pair() -> (statistic, p)` view; the F and chi-squared families
//! additionally expose `degrees_of_freedom()` (a pair for F, a single value
//! for chi-squared). Results hold no reference to the dataset or the formula
//! they came from: they are pure values.

use std::fmt;

use crate::distributions::{chi_squared_survival, f_survival};
use crate::hypothesis::Hypothesis;

/// Result of a t-test (one sample, two sample or paired).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TResult {
    statistic: f64,
    p: f64,
    df: f64,
}

impl TResult {
    /// Builds a [TResult] from a raw t statistic and its degrees of freedom,
    /// computing the two-sided p-value eagerly.
    #[must_use]
    pub fn new(statistic: f64, df: f64) -> TResult {
        return TResult::with_tail(statistic, df, Hypothesis::default());
    }

    pub(crate) fn with_tail(statistic: f64, df: f64, hypothesis: Hypothesis) -> TResult {
        return TResult {
            statistic,
            p: hypothesis.p_student_t(statistic, df),
            df,
        };
    }

    /// The t statistic.
    #[must_use]
    pub const fn statistic(&self) -> f64 {
        return self.statistic;
    }

    /// The p-value, in `[0, 1]`.
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        return self.p;
    }

    /// The `(statistic, p)` pair.
    #[must_use]
    pub const fn pair(&self) -> (f64, f64) {
        return (self.statistic, self.p);
    }

    /// The degrees of freedom of the null t distribution.
    #[must_use]
    pub const fn degrees_of_freedom(&self) -> f64 {
        return self.df;
    }
}

impl fmt::Display for TResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "TResult(t-statistic={:.6}, p-value={:.6})",
            self.statistic, self.p
        );
    }
}

/// Result of a Wilcoxon signed-rank test.
///
/// The p-value comes from the large-sample normal approximation of the `W`
/// statistic, so there are no degrees of freedom to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilcoxResult {
    statistic: f64,
    p: f64,
}

impl WilcoxResult {
    /// Builds a [WilcoxResult] from the `W` statistic and the z-score of its
    /// normal approximation, computing the two-sided p-value eagerly.
    #[must_use]
    pub fn new(statistic: f64, z: f64) -> WilcoxResult {
        return WilcoxResult::with_tail(statistic, z, Hypothesis::default());
    }

    pub(crate) fn with_tail(statistic: f64, z: f64, hypothesis: Hypothesis) -> WilcoxResult {
        return WilcoxResult {
            statistic,
            p: hypothesis.p_normal(z),
        };
    }

    /// The `W` statistic (the smaller of the signed rank sums).
    #[must_use]
    pub const fn statistic(&self) -> f64 {
        return self.statistic;
    }

    /// The p-value, in `[0, 1]`.
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        return self.p;
    }

    /// The `(statistic, p)` pair.
    #[must_use]
    pub const fn pair(&self) -> (f64, f64) {
        return (self.statistic, self.p);
    }
}

impl fmt::Display for WilcoxResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "WilcoxResult(w-statistic={:.6}, p-value={:.6})",
            self.statistic, self.p
        );
    }
}

/// Result of an F-family test (one-way ANOVA).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FResult {
    statistic: f64,
    p: f64,
    df: (f64, f64),
}

impl FResult {
    /// Builds an [FResult] from a raw F statistic and its `(df1, df2)`
    /// degrees of freedom, computing the upper-tail p-value eagerly.
    #[must_use]
    pub fn new(statistic: f64, df1: f64, df2: f64) -> FResult {
        return FResult {
            statistic,
            p: f_survival(statistic, df1, df2),
            df: (df1, df2),
        };
    }

    /// The F statistic.
    #[must_use]
    pub const fn statistic(&self) -> f64 {
        return self.statistic;
    }

    /// The p-value, in `[0, 1]`.
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        return self.p;
    }

    /// The `(statistic, p)` pair.
    #[must_use]
    pub const fn pair(&self) -> (f64, f64) {
        return (self.statistic, self.p);
    }

    /// The `(df1, df2)` degrees of freedom, unmodified.
    #[must_use]
    pub const fn degrees_of_freedom(&self) -> (f64, f64) {
        return self.df;
    }
}

impl fmt::Display for FResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "FResult(f-statistic={:.6}, p-value={:.6})",
            self.statistic, self.p
        );
    }
}

/// Result of a chi-squared-family test (Kruskal-Wallis, Friedman).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chi2Result {
    statistic: f64,
    p: f64,
    df: f64,
}

impl Chi2Result {
    /// Builds a [Chi2Result] from a raw chi-squared statistic and its
    /// degrees of freedom, computing the upper-tail p-value eagerly.
    #[must_use]
    pub fn new(statistic: f64, df: f64) -> Chi2Result {
        return Chi2Result {
            statistic,
            p: chi_squared_survival(statistic, df),
            df,
        };
    }

    /// The chi-squared statistic.
    #[must_use]
    pub const fn statistic(&self) -> f64 {
        return self.statistic;
    }

    /// The p-value, in `[0, 1]`.
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        return self.p;
    }

    /// The `(statistic, p)` pair.
    #[must_use]
    pub const fn pair(&self) -> (f64, f64) {
        return (self.statistic, self.p);
    }

    /// The degrees of freedom, unmodified.
    #[must_use]
    pub const fn degrees_of_freedom(&self) -> f64 {
        return self.df;
    }
}

impl fmt::Display for Chi2Result {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "Chi2Result(chi-square={:.6}, p-value={:.6})",
            self.statistic, self.p
        );
    }
}

/// A non-fatal advisory condition surfaced next to a result.
///
/// Diagnostics never abort a test: they flag regimes where the returned
/// p-value should be taken with care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// The chi-squared approximation of the statistic is unreliable for this
    /// few blocks and treatments (Friedman small-sample regime).
    SmallSampleChi2Approximation {
        /// Number of blocks (rows of repeated measures).
        blocks: usize,
        /// Number of treatments (levels).
        treatments: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Diagnostic::SmallSampleChi2Approximation { blocks, treatments } => write!(
                f,
                "the chi-squared approximation is unreliable for {blocks} blocks and \
                 {treatments} treatments; consider an exact table"
            ),
        };
    }
}
