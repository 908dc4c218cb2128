//! # Primitive hypothesis tests
//!
//! The delegated test primitives that back the formula dispatchers: the
//! one-sample and two-sample t-tests and the Wilcoxon signed-rank test.
//! Each function takes the collected data plus a few optional knobs (exposed
//! trough [bon] builders) and returns the corresponding
//! [result value](crate::results).
//!
//! Keep in mind that every test has assumptions that cannot be checked here
//! (IID samples, approximate normality of the mean for the t family, ...).
//! If the conditions for a test are not fullfilled, then the result is
//! meaningless.

use crate::distributions::{normal_cdf, normal_survival, student_t_cdf, student_t_survival};
use crate::errors::TestError;
use crate::ranks::mid_ranks;
use crate::results::{TResult, WilcoxResult};
use crate::samples::Samples;

/// Defines wich kind of test we are doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[allow(clippy::exhaustive_enums)]
pub enum Hypothesis {
    /// Tests if our statistic is *significantly* bigger than what `H0`
    /// claims. (`theta_0 < theta_obs`)
    RightTail,
    /// Tests if our statistic is *significantly* smaller than what `H0`
    /// claims. (`theta_obs < theta_0`)
    LeftTail,
    /// Tests if our statistic is *significantly* different (far away) from
    /// what `H0` claims. (`theta_obs != theta_0`)
    ///
    /// Divides the probability evenly between both sides.
    #[default]
    TwoTailed,
}

impl Hypothesis {
    /// P-value of `t` under a Student's t null with `df` degrees of freedom.
    pub(crate) fn p_student_t(self, t: f64, df: f64) -> f64 {
        return match self {
            Hypothesis::RightTail => student_t_survival(t, df),
            Hypothesis::LeftTail => student_t_cdf(t, df),
            Hypothesis::TwoTailed => 2.0 * student_t_survival(t.abs(), df),
        };
    }

    /// P-value of `z` under a standard normal null.
    pub(crate) fn p_normal(self, z: f64) -> f64 {
        return match self {
            Hypothesis::RightTail => normal_survival(z),
            Hypothesis::LeftTail => normal_cdf(z),
            Hypothesis::TwoTailed => 2.0 * normal_survival(z.abs()),
        };
    }
}

/// Performs a one sample [t-test](https://en.wikipedia.org/wiki/Student%27s_t-test)
/// for the mean. Can be used to determine if the mean of the data is
/// different from `null_mean`.
///
/// ## Inputs:
///
/// 1. `data`: all the samples collected to perform the test.
/// 2. `null_mean`: (optional) the mean under the null hypothesys.
///      - The default is 0.
/// 3. `hypothesis`: (optional) determines if a 2-tailed/left-tailed/right-tailed
///    test will be used.
///      - The default is a 2 tailed test.
///
/// ## Results
///
/// A [TResult] with the t statistic, the p-value and `n - 1` degrees of
/// freedom. If there are less than 2 samples in `data`, returns
/// [TestError::NotEnoughSamples]; if the sample has zero variance the
/// statistic is undefined and [TestError::DegenerateInput] is returned.
#[bon::builder]
pub fn one_sample_t(
    data: &mut Samples,
    #[builder(default)] null_mean: f64,
    #[builder(default)] hypothesis: Hypothesis,
) -> Result<TResult, TestError> {
    let len: usize = data.count();
    if len < 2 {
        return Err(TestError::NotEnoughSamples);
    }
    // the following `unwrap`s are safe because the length is at least 2

    let mean: f64 = data.mean().unwrap();
    let sample_std_dev: f64 = data.variance().unwrap().sqrt();
    if sample_std_dev == 0.0 {
        return Err(TestError::DegenerateInput);
    }

    #[allow(clippy::cast_precision_loss)]
    let n: f64 = len as f64;
    let t: f64 = (mean - null_mean) * n.sqrt() / sample_std_dev;

    return Ok(TResult::with_tail(t, n - 1.0, hypothesis));
}

/// Performs a two sample location
/// [t-test](https://en.wikipedia.org/wiki/Student%27s_t-test#Two-sample_t-tests)
/// for the mean of two datasets `data_a` and `data_b`. The null hypothesys
/// assumes that the 2 means are equal (there is no difference).
///
/// ## Inputs:
///
/// 1. `data_a`: the samples collected for group A.
/// 2. `data_b`: the samples collected for group B.
/// 3. `paired`: (optional, default `false`) if `true`, performs the
///    dependent-samples (paired) variant: the one sample test over the
///    elementwise differences. Otherwise performs the independent-samples
///    variant with pooled variance (`df = n_a + n_b - 2`).
/// 4. `hypothesis`: (optional) determines if a 2-tailed/left-tailed/right-tailed
///    test will be used.
///      - The default is a 2 tailed test.
///
/// ## Results
///
/// A [TResult] with the t statistic, the p-value and the degrees of freedom.
///
/// If any group has less than 2 samples, returns
/// [TestError::NotEnoughSamples]; if the pooled variance is zero, returns
/// [TestError::DegenerateInput]. The paired variant additionally returns
/// [TestError::LengthMismatch] when the two groups have different lengths.
#[bon::builder]
pub fn two_sample_t(
    data_a: &mut Samples,
    data_b: &mut Samples,
    #[builder(default)] paired: bool,
    #[builder(default)] hypothesis: Hypothesis,
) -> Result<TResult, TestError> {
    if paired {
        if data_a.count() != data_b.count() {
            return Err(TestError::LengthMismatch {
                left: data_a.count(),
                right: data_b.count(),
            });
        }
        let differences: Vec<f64> = data_a
            .peek_data()
            .iter()
            .zip(data_b.peek_data().iter())
            .map(|(&a, &b)| a - b)
            .collect();
        // finite - finite is finite (no overflow for realistic data)
        let mut diff_samples: Samples = Samples::new_move(differences)?;
        return one_sample_t()
            .data(&mut diff_samples)
            .hypothesis(hypothesis)
            .call();
    }

    let len_a: usize = data_a.count();
    let len_b: usize = data_b.count();
    if len_a < 2 || len_b < 2 {
        return Err(TestError::NotEnoughSamples);
    }
    // All the following unwraps are safe since both datasets have at least 2 samples

    #[allow(clippy::cast_precision_loss)]
    let n_a: f64 = len_a as f64;
    #[allow(clippy::cast_precision_loss)]
    let n_b: f64 = len_b as f64;

    let mean_diff: f64 = data_a.mean().unwrap() - data_b.mean().unwrap();
    let var_a: f64 = data_a.variance().unwrap();
    let var_b: f64 = data_b.variance().unwrap();

    let degrees_of_freedom: f64 = n_a + n_b - 2.0;
    let s_pool: f64 = (((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / degrees_of_freedom).sqrt();
    if s_pool == 0.0 {
        return Err(TestError::DegenerateInput);
    }
    let t: f64 = mean_diff / (s_pool * (1.0 / n_a + 1.0 / n_b).sqrt());

    return Ok(TResult::with_tail(t, degrees_of_freedom, hypothesis));
}

/// Performs a [Wilcoxon signed-rank test](https://en.wikipedia.org/wiki/Wilcoxon_signed-rank_test)
/// between two paired measurements (or directly over a sample of
/// differences).
///
/// ## Inputs:
///
/// 1. `x`: the first measurement, or the differences themselves when `y` is
///    not given.
/// 2. `y`: (optional) the second measurement, paired elementwise with `x`.
/// 3. `hypothesis`: (optional) determines if a 2-tailed/left-tailed/right-tailed
///    test will be used.
///      - The default is a 2 tailed test.
///
/// ## Results
///
/// A [WilcoxResult] with the `W` statistic (the smaller of the signed rank
/// sums, zeros dropped) and the p-value from the continuity-corrected normal
/// approximation.
///
/// Errors: [TestError::LengthMismatch] when `y` is given with a different
/// length than `x`; [TestError::NanErr] on non-finite input;
/// [TestError::DegenerateInput] when every difference is zero (there is
/// nothing left to rank).
#[bon::builder]
pub fn signed_rank(
    x: &[f64],
    y: Option<&[f64]>,
    #[builder(default)] hypothesis: Hypothesis,
) -> Result<WilcoxResult, TestError> {
    let differences: Vec<f64> = match y {
        Some(other) => {
            if x.len() != other.len() {
                return Err(TestError::LengthMismatch {
                    left: x.len(),
                    right: other.len(),
                });
            }
            x.iter().zip(other.iter()).map(|(&a, &b)| a - b).collect()
        }
        None => Vec::from(x),
    };

    if differences.iter().any(|d: &f64| !d.is_finite()) {
        return Err(TestError::NanErr);
    }

    let nonzero: Vec<f64> = differences.into_iter().filter(|&d| d != 0.0).collect();
    if nonzero.is_empty() {
        return Err(TestError::DegenerateInput);
    }

    let absolute: Vec<f64> = nonzero.iter().map(|&d| d.abs()).collect();
    let ranks: Vec<f64> = mid_ranks(&absolute);

    let mut w_plus: f64 = 0.0;
    let mut w_minus: f64 = 0.0;
    for (&diff, &rank) in nonzero.iter().zip(ranks.iter()) {
        if 0.0 < diff {
            w_plus += rank;
        } else {
            w_minus += rank;
        }
    }
    let w: f64 = w_plus.min(w_minus);

    #[allow(clippy::cast_precision_loss)]
    let n: f64 = nonzero.len() as f64;
    let mean_w: f64 = n * (n + 1.0) / 4.0;
    let var_w: f64 = n * (n + 1.0) * (2.0 * n + 1.0) / 24.0;

    // continuity correction towards the mean
    let z: f64 = if mean_w < w {
        (w - 0.5 - mean_w) / var_w.sqrt()
    } else {
        (w + 0.5 - mean_w) / var_w.sqrt()
    };

    return Ok(WilcoxResult::with_tail(w, z, hypothesis));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn one_sample_t_reference() {
        // mean = 5.1, s^2 = 0.1, so t = 0.1 * sqrt(6) / sqrt(0.1) = sqrt(0.6)
        let mut data: Samples = Samples::new(&[5.1, 4.9, 5.6, 4.7, 5.0, 5.3]).unwrap();
        let result: TResult = one_sample_t().data(&mut data).null_mean(5.0).call().unwrap();
        assert_approx_eq!(result.statistic(), 0.6_f64.sqrt(), 1e-10);
        assert_approx_eq!(result.degrees_of_freedom(), 5.0);

        // against its own mean the statistic vanishes and p is 1
        let result: TResult = one_sample_t().data(&mut data).null_mean(5.1).call().unwrap();
        assert_approx_eq!(result.statistic(), 0.0, 1e-12);
        assert_approx_eq!(result.p_value(), 1.0, 1e-12);
    }

    #[test]
    fn paired_t_sleep_data_reference() {
        // R: t.test(extra[group == 1], extra[group == 2], paired = TRUE)
        // on the classic `sleep` dataset: t = -4.0621, df = 9, p = 0.002833
        let group1: Vec<f64> = vec![0.7, -1.6, -0.2, -1.2, -0.1, 3.4, 3.7, 0.8, 0.0, 2.0];
        let group2: Vec<f64> = vec![1.9, 0.8, 1.1, 0.1, -0.1, 4.4, 5.5, 1.6, 4.6, 3.4];
        let mut a: Samples = Samples::new_move(group1).unwrap();
        let mut b: Samples = Samples::new_move(group2).unwrap();
        let result: TResult = two_sample_t()
            .data_a(&mut a)
            .data_b(&mut b)
            .paired(true)
            .call()
            .unwrap();
        assert_approx_eq!(result.statistic(), -4.0621, 1e-4);
        assert_approx_eq!(result.degrees_of_freedom(), 9.0);
        assert_approx_eq!(result.p_value(), 0.002833, 1e-5);
    }

    #[test]
    fn two_sample_t_pooled_reference() {
        // R: t.test(c(1, 2, 3), c(4, 5, 6), var.equal = TRUE)
        let mut a: Samples = Samples::new(&[1.0, 2.0, 3.0]).unwrap();
        let mut b: Samples = Samples::new(&[4.0, 5.0, 6.0]).unwrap();
        let result: TResult = two_sample_t().data_a(&mut a).data_b(&mut b).call().unwrap();
        assert_approx_eq!(result.statistic(), -3.674235, 1e-5);
        assert_approx_eq!(result.p_value(), 0.021312, 1e-5);
        assert_approx_eq!(result.degrees_of_freedom(), 4.0);
    }

    #[test]
    fn paired_t_matches_one_sample_on_differences() {
        let before: Vec<f64> = vec![12.0, 11.5, 14.0, 13.2, 10.8];
        let after: Vec<f64> = vec![11.0, 11.0, 12.5, 13.0, 10.0];

        let mut a: Samples = Samples::new(&before).unwrap();
        let mut b: Samples = Samples::new(&after).unwrap();
        let paired: TResult = two_sample_t()
            .data_a(&mut a)
            .data_b(&mut b)
            .paired(true)
            .call()
            .unwrap();

        let diffs: Vec<f64> = before.iter().zip(after.iter()).map(|(x, y)| x - y).collect();
        let mut d: Samples = Samples::new_move(diffs).unwrap();
        let one: TResult = one_sample_t().data(&mut d).call().unwrap();

        assert_approx_eq!(paired.statistic(), one.statistic());
        assert_approx_eq!(paired.p_value(), one.p_value());
    }

    #[test]
    fn paired_t_rejects_unequal_lengths() {
        let mut a: Samples = Samples::new(&[1.0, 2.0, 3.0]).unwrap();
        let mut b: Samples = Samples::new(&[1.0, 2.0]).unwrap();
        let result = two_sample_t()
            .data_a(&mut a)
            .data_b(&mut b)
            .paired(true)
            .call();
        assert_eq!(
            result.unwrap_err(),
            TestError::LengthMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn signed_rank_statistic() {
        // differences with one zero (dropped) and a tie in magnitude
        let x: Vec<f64> = vec![1.0, -2.0, 3.0, 0.0, 2.0, 5.0];
        let result: WilcoxResult = signed_rank().x(&x).call().unwrap();
        // |d| = [1, 2, 3, 2, 5] -> ranks [1, 2.5, 4, 2.5, 5], W- = 2.5
        assert_approx_eq!(result.statistic(), 2.5);
        assert!(result.p_value() <= 1.0 && 0.0 <= result.p_value());
    }

    #[test]
    fn signed_rank_all_zero_differences_is_degenerate() {
        let same: Vec<f64> = vec![4.0, 2.0, 7.0];
        let result = signed_rank().x(&same).y(&same).call();
        assert_eq!(result.unwrap_err(), TestError::DegenerateInput);
    }

    #[test]
    fn not_enough_samples() {
        let mut tiny: Samples = Samples::new(&[1.0]).unwrap();
        assert_eq!(
            one_sample_t().data(&mut tiny).call().unwrap_err(),
            TestError::NotEnoughSamples
        );
    }
}
