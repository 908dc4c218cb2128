//! # One-way ANOVA dispatcher
//!
//! [oneway] computes the classical one-way analysis of variance F-test over
//! a grouped column; [aov] is the formula front door. Only the single-factor
//! test is computed: a formula with several factors (or any interaction) is
//! an explicit [TestError::NotImplemented], never a silent approximation.
//!
//! The sums of squares are computed in two passes (group means first, then a
//! separate residual pass), wich avoids the catastrophic cancellation of the
//! raw sums-of-squares shortcut.

use crate::dataframe::{DataFrame, GroupBy, take};
use crate::errors::TestError;
use crate::formula::{self, ParsedFormula};
use crate::results::FResult;

/// Performs the one-way ANOVA F-test of `obs` grouped by `factor`.
///
/// With `k` levels over `n` total rows: `df1 = k - 1`, `df2 = n - k`,
/// `SSA = sum_i n_i * mean_i^2 - n * grand_mean^2` (between groups),
/// `SSE = sum_i sum_x (x - mean_i)^2` (within groups), and
/// `F = (SSA / df1) / (SSE / df2)`.
///
/// Errors: [TestError::NotEnoughSamples] with fewer than two levels,
/// [TestError::DegenerateInput] when there are no residual degrees of
/// freedom (`n == k`) or the within-group variability is exactly zero,
/// [TestError::NanErr] on non-finite observations.
pub fn oneway(obs: &str, factor: &str, data: &DataFrame) -> Result<FResult, TestError> {
    let groups: GroupBy = data.group_by(factor)?;
    let k: usize = groups.len();
    if k < 2 {
        return Err(TestError::NotEnoughSamples);
    }

    let values: Vec<f64> = data.numeric(obs)?;
    if values.iter().any(|v: &f64| !v.is_finite()) {
        return Err(TestError::NanErr);
    }

    let n: usize = values.len();
    if n == k {
        // one observation per level: no residual degrees of freedom
        return Err(TestError::DegenerateInput);
    }

    #[allow(clippy::cast_precision_loss)]
    let n_all: f64 = n as f64;
    let grand_mean: f64 = values.iter().sum::<f64>() / n_all;

    // first pass: group means; second pass: residuals against them
    let mut ssa: f64 = -n_all * grand_mean * grand_mean;
    let mut sse: f64 = 0.0;
    for (_, indices) in groups.iter() {
        let group: Vec<f64> = take(&values, indices);
        #[allow(clippy::cast_precision_loss)]
        let size: f64 = group.len() as f64;
        let mean: f64 = group.iter().sum::<f64>() / size;

        ssa += size * mean * mean;
        sse += group.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>();
    }

    if sse == 0.0 {
        return Err(TestError::DegenerateInput);
    }

    #[allow(clippy::cast_precision_loss)]
    let df1: f64 = (k - 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let df2: f64 = (n - k) as f64;
    let f: f64 = (ssa / df1) / (sse / df2);

    return Ok(FResult::new(f, df1, df2));
}

/// Formula one-way ANOVA: `"y ~ factor"` over `data`.
///
/// A formula with more than one independent variable fails with
/// [TestError::NotImplemented]: multifactor ANOVA is recognized but not
/// computed.
pub fn aov(formula: &str, data: &DataFrame) -> Result<FResult, TestError> {
    let parsed: ParsedFormula = formula::parse(formula)?;
    if parsed.independent.len() != 1 {
        return Err(TestError::NotImplemented("multifactor anova"));
    }
    return oneway(&parsed.dependent, &parsed.independent[0], data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataframe::Column;
    use assert_approx_eq::assert_approx_eq;

    fn frame(values: Vec<f64>, levels: Vec<i64>) -> DataFrame {
        return DataFrame::new()
            .with_column("y", Column::Float64(values))
            .unwrap()
            .with_column("g", Column::Int64(levels))
            .unwrap();
    }

    #[test]
    fn two_level_reference() {
        // groups {1, 2, 3} and {4, 5, 6}: SSA = 13.5, SSE = 4, F = 13.5
        let df: DataFrame = frame(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![0, 0, 0, 1, 1, 1]);
        let result: FResult = oneway("y", "g", &df).unwrap();
        assert_approx_eq!(result.statistic(), 13.5, 1e-10);
        assert_eq!(result.degrees_of_freedom(), (1.0, 4.0));
    }

    #[test]
    fn three_level_reference() {
        // hand computation: groups {1,2,3}, {2,3,4}, {5,6,7}
        // means 2, 3, 6; grand mean 11/3
        // SSA = 3*(4 + 9 + 36) - 9*(121/9) = 147 - 121 = 26
        // SSE = 2 + 2 + 2 = 6; F = (26/2)/(6/6) = 13
        let df: DataFrame = frame(
            vec![1.0, 2.0, 3.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            vec![1, 1, 1, 2, 2, 2, 3, 3, 3],
        );
        let result: FResult = oneway("y", "g", &df).unwrap();
        assert_approx_eq!(result.statistic(), 13.0, 1e-10);
        assert_eq!(result.degrees_of_freedom(), (2.0, 6.0));
    }

    #[test]
    fn aov_delegates_and_gates() {
        let df: DataFrame = frame(vec![1.0, 2.0, 3.0, 4.0], vec![0, 0, 1, 1]);
        let direct: FResult = oneway("y", "g", &df).unwrap();
        let by_formula: FResult = aov("y ~ g", &df).unwrap();
        assert_approx_eq!(direct.statistic(), by_formula.statistic());

        assert_eq!(
            aov("y ~ a + b", &df).unwrap_err(),
            TestError::NotImplemented("multifactor anova")
        );
        assert_eq!(
            aov("y ~ a * b", &df).unwrap_err(),
            TestError::NotImplemented("multifactor anova")
        );
    }

    #[test]
    fn degenerate_inputs() {
        // zero within-group variability
        let flat: DataFrame = frame(vec![1.0, 1.0, 2.0, 2.0], vec![0, 0, 1, 1]);
        assert_eq!(
            oneway("y", "g", &flat).unwrap_err(),
            TestError::DegenerateInput
        );

        // one observation per level
        let thin: DataFrame = frame(vec![1.0, 2.0], vec![0, 1]);
        assert_eq!(
            oneway("y", "g", &thin).unwrap_err(),
            TestError::DegenerateInput
        );

        // a single level is not a grouping
        let single: DataFrame = frame(vec![1.0, 2.0], vec![7, 7]);
        assert_eq!(
            oneway("y", "g", &single).unwrap_err(),
            TestError::NotEnoughSamples
        );
    }
}
