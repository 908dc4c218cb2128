//! # Kruskal-Wallis dispatcher
//!
//! Rank-based one-way analysis of variance: every observation is ranked
//! jointly (mid-rank ties), and the statistic measures how far each level's
//! mean rank strays from the overall mean rank. Approximately chi-squared
//! with `k - 1` degrees of freedom under the null.

use crate::dataframe::{DataFrame, GroupBy, take};
use crate::errors::TestError;
use crate::formula::{self, ParsedFormula};
use crate::ranks::mid_ranks;
use crate::results::Chi2Result;

/// Formula [Kruskal-Wallis test](https://en.wikipedia.org/wiki/Kruskal%E2%80%93Wallis_test):
/// `"y ~ factor"` over `data`.
///
/// With `N` total rows, `avg_rank = (N + 1) / 2`:
///
/// ```text
/// H = (N - 1) * sum_i n_i * (mean_rank_i - avg_rank)^2
///             / sum_rows (rank - avg_rank)^2
/// ```
///
/// Errors: [TestError::Arity] for more than one independent variable,
/// [TestError::NotEnoughSamples] with fewer than two levels,
/// [TestError::DegenerateInput] when every rank is identical (the
/// denominator would be zero), [TestError::NanErr] on non-finite
/// observations.
pub fn test(formula: &str, data: &DataFrame) -> Result<Chi2Result, TestError> {
    let parsed: ParsedFormula = formula::parse(formula)?;
    let factor: &str = parsed.only_independent()?;

    let groups: GroupBy = data.group_by(factor)?;
    let k: usize = groups.len();
    if k < 2 {
        return Err(TestError::NotEnoughSamples);
    }

    let values: Vec<f64> = data.numeric(&parsed.dependent)?;
    if values.iter().any(|v: &f64| !v.is_finite()) {
        return Err(TestError::NanErr);
    }

    // joint mid-ranks, aligned to dataset row order
    let ranks: Vec<f64> = mid_ranks(&values);
    #[allow(clippy::cast_precision_loss)]
    let n_all: f64 = ranks.len() as f64;
    let avg_rank: f64 = (n_all + 1.0) / 2.0;

    let den: f64 = ranks
        .iter()
        .map(|&r| (r - avg_rank) * (r - avg_rank))
        .sum();
    if den == 0.0 {
        return Err(TestError::DegenerateInput);
    }

    let mut num: f64 = 0.0;
    for (_, indices) in groups.iter() {
        let level_ranks: Vec<f64> = take(&ranks, indices);
        #[allow(clippy::cast_precision_loss)]
        let size: f64 = level_ranks.len() as f64;
        let mean_rank: f64 = level_ranks.iter().sum::<f64>() / size;
        num += size * (mean_rank - avg_rank) * (mean_rank - avg_rank);
    }

    let h: f64 = (n_all - 1.0) * num / den;
    #[allow(clippy::cast_precision_loss)]
    let df: f64 = (k - 1) as f64;
    return Ok(Chi2Result::new(h, df));
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
        // ranks 1..6, no ties: num = 13.5, den = 17.5, H = 5 * 13.5 / 17.5
        // scipy.stats.kruskal([1, 2, 3], [4, 5, 6]) -> H = 3.8571, p = 0.04953
        let df: DataFrame = frame(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![0, 0, 0, 1, 1, 1]);
        let result: Chi2Result = test("y ~ g", &df).unwrap();
        assert_approx_eq!(result.statistic(), 67.5 / 17.5, 1e-10);
        assert_approx_eq!(result.degrees_of_freedom(), 1.0);
        assert_approx_eq!(result.p_value(), 0.04953, 1e-4);
    }

    #[test]
    fn ties_use_mid_ranks() {
        // three levels with tied observations across levels
        let df: DataFrame = frame(
            vec![1.0, 2.0, 2.0, 3.0, 3.0, 4.0],
            vec![0, 0, 1, 1, 2, 2],
        );
        let result: Chi2Result = test("y ~ g", &df).unwrap();
        // ranks: [1, 2.5, 2.5, 4.5, 4.5, 6], mean ranks 1.75, 3.5, 5.25
        // num = 2 * (1.75^2 + 0 + 1.75^2) = 12.25, den = 16.5
        assert_approx_eq!(result.statistic(), 5.0 * 12.25 / 16.5, 1e-10);
        assert_approx_eq!(result.degrees_of_freedom(), 2.0);
    }

    #[test]
    fn all_tied_input_is_degenerate() {
        let df: DataFrame = frame(vec![7.0; 6], vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(test("y ~ g", &df).unwrap_err(), TestError::DegenerateInput);
    }

    #[test]
    fn arity_and_level_gates() {
        let df: DataFrame = frame(vec![1.0, 2.0], vec![3, 3]);
        assert_eq!(
            test("y ~ a + b", &df).unwrap_err(),
            TestError::Arity { found: 2 }
        );
        assert_eq!(test("y ~ g", &df).unwrap_err(), TestError::NotEnoughSamples);
    }
}
