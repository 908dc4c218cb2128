//! # Friedman dispatcher
//!
//! Repeated-measures rank test: each block (row) is ranked independently
//! across treatments, and the statistic measures how consistently the
//! treatments order within the blocks. Approximately chi-squared with
//! `treatments - 1` degrees of freedom under the null.
//!
//! The approximation is known to be unreliable for few blocks and few
//! treatments; that regime is surfaced as a non-fatal
//! [Diagnostic](crate::results::Diagnostic) next to the result, never as an
//! error.

use crate::dataframe::{DataFrame, GroupBy, take};
use crate::errors::TestError;
use crate::formula::{self, ParsedFormula};
use crate::ranks::mid_ranks;
use crate::results::{Chi2Result, Diagnostic};

/// Below these bounds the chi-squared approximation of the statistic is
/// advisory-flagged.
const SMALL_SAMPLE_BLOCKS: usize = 15;
const SMALL_SAMPLE_TREATMENTS: usize = 4;

/// Formula [Friedman test](https://en.wikipedia.org/wiki/Friedman_test):
/// `"y ~ treatment"` over `data`.
///
/// Groups by the single independent variable; every level must have the
/// same number of rows (the blocks), otherwise
/// [TestError::UnequalBlockSize]. Column `i` of the assembled
/// `blocks x treatments` matrix holds the dependent values of level `i` in
/// the level's natural row order.
pub fn test_formula(
    formula: &str,
    data: &DataFrame,
) -> Result<(Chi2Result, Option<Diagnostic>), TestError> {
    let parsed: ParsedFormula = formula::parse(formula)?;
    let factor: &str = parsed.only_independent()?;

    let groups: GroupBy = data.group_by(factor)?;
    if groups.len() < 2 {
        return Err(TestError::NotEnoughSamples);
    }

    let blocks: usize = groups.indices(0).len();
    if groups.iter().any(|(_, indices)| indices.len() != blocks) {
        return Err(TestError::UnequalBlockSize);
    }

    let values: Vec<f64> = data.numeric(&parsed.dependent)?;

    let mut matrix: Vec<Vec<f64>> = vec![Vec::with_capacity(groups.len()); blocks];
    for (_, indices) in groups.iter() {
        let level_values: Vec<f64> = take(&values, indices);
        for (block, &value) in level_values.iter().enumerate() {
            matrix[block].push(value);
        }
    }

    return test_matrix(&matrix);
}

/// Friedman test over a raw `blocks x treatments` matrix (rows = blocks,
/// columns = treatments).
///
/// With `n` blocks and `k` treatments, per-treatment mean ranks `ravg_j`
/// (mid-rank ties within each block):
///
/// ```text
/// Q = 12 * n / (k * (k + 1)) * sum_j (ravg_j - (k + 1) / 2)^2
/// ```
///
/// Returns the [Chi2Result] with `k - 1` degrees of freedom, and a
/// [Diagnostic::SmallSampleChi2Approximation] when `n <= 15` and `k <= 4`.
///
/// Errors: [TestError::NotEnoughSamples] without at least one block and two
/// treatments, [TestError::UnequalBlockSize] on ragged rows,
/// [TestError::NanErr] on non-finite values, [TestError::DegenerateInput]
/// when every block is fully tied (the ranking carries no information).
pub fn test_matrix(rows: &[Vec<f64>]) -> Result<(Chi2Result, Option<Diagnostic>), TestError> {
    let blocks: usize = rows.len();
    if blocks == 0 {
        return Err(TestError::NotEnoughSamples);
    }
    let treatments: usize = rows[0].len();
    if treatments < 2 {
        return Err(TestError::NotEnoughSamples);
    }
    if rows.iter().any(|row| row.len() != treatments) {
        return Err(TestError::UnequalBlockSize);
    }
    if rows.iter().flatten().any(|v: &f64| !v.is_finite()) {
        return Err(TestError::NanErr);
    }

    // rank each block independently across treatments
    let mut rank_sums: Vec<f64> = vec![0.0; treatments];
    let mut any_informative_block: bool = false;
    for row in rows {
        let ranks: Vec<f64> = mid_ranks(row);
        // a fully tied block ranks every treatment (k + 1) / 2
        if row.iter().any(|&v| v != row[0]) {
            any_informative_block = true;
        }
        for (j, &rank) in ranks.iter().enumerate() {
            rank_sums[j] += rank;
        }
    }
    if !any_informative_block {
        return Err(TestError::DegenerateInput);
    }

    #[allow(clippy::cast_precision_loss)]
    let n: f64 = blocks as f64;
    #[allow(clippy::cast_precision_loss)]
    let k: f64 = treatments as f64;

    let center: f64 = (k + 1.0) / 2.0;
    let spread: f64 = rank_sums
        .iter()
        .map(|&sum| {
            let ravg: f64 = sum / n - center;
            ravg * ravg
        })
        .sum();

    let q: f64 = 12.0 * n / (k * (k + 1.0)) * spread;
    let result: Chi2Result = Chi2Result::new(q, k - 1.0);

    let diagnostic: Option<Diagnostic> =
        if blocks <= SMALL_SAMPLE_BLOCKS && treatments <= SMALL_SAMPLE_TREATMENTS {
            Some(Diagnostic::SmallSampleChi2Approximation { blocks, treatments })
        } else {
            None
        };

    return Ok((result, diagnostic));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataframe::Column;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn matrix_reference() {
        // per-block ranks: [1,2,3], [2,3,1], [1,2,3]; rank sums [4, 7, 7]
        // Q = 12*3/(3*4) * ((4/3-2)^2 + (7/3-2)^2 + (7/3-2)^2) = 2
        let rows: Vec<Vec<f64>> = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 1.0],
            vec![1.0, 2.0, 3.0],
        ];
        let (result, diagnostic) = test_matrix(&rows).unwrap();
        assert_approx_eq!(result.statistic(), 2.0, 1e-10);
        assert_approx_eq!(result.degrees_of_freedom(), 2.0);
        // chi2.sf(2, 2) = exp(-1)
        assert_approx_eq!(result.p_value(), (-1.0_f64).exp(), 1e-10);
        assert_eq!(
            diagnostic,
            Some(Diagnostic::SmallSampleChi2Approximation {
                blocks: 3,
                treatments: 3,
            })
        );
    }

    #[test]
    fn large_samples_carry_no_diagnostic() {
        let rows: Vec<Vec<f64>> = (0..16)
            .map(|i| vec![f64::from(i), f64::from(i) + 1.0, f64::from(i) - 1.0])
            .collect();
        let (_, diagnostic) = test_matrix(&rows).unwrap();
        assert_eq!(diagnostic, None);
    }

    #[test]
    fn formula_path_assembles_blocks_by_level() {
        let df: DataFrame = DataFrame::new()
            .with_column(
                "y",
                Column::Float64(vec![1.0, 2.0, 3.0, 2.0, 3.0, 1.0, 1.0, 2.0, 3.0]),
            )
            .unwrap()
            .with_column(
                "treatment",
                Column::Str(
                    ["a", "b", "c", "a", "b", "c", "a", "b", "c"]
                        .iter()
                        .map(|s| String::from(*s))
                        .collect(),
                ),
            )
            .unwrap();
        // level a = [1, 2, 1], b = [2, 3, 2], c = [3, 1, 3] -> same matrix as
        // the reference above
        let (result, _) = test_formula("y ~ treatment", &df).unwrap();
        assert_approx_eq!(result.statistic(), 2.0, 1e-10);
    }

    #[test]
    fn unequal_levels_cannot_form_blocks() {
        let df: DataFrame = DataFrame::new()
            .with_column("y", Column::Float64(vec![1.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap()
            .with_column("g", Column::Int64(vec![0, 0, 0, 1, 1]))
            .unwrap();
        assert_eq!(
            test_formula("y ~ g", &df).unwrap_err(),
            TestError::UnequalBlockSize
        );
    }

    #[test]
    fn fully_tied_blocks_are_degenerate() {
        let rows: Vec<Vec<f64>> = vec![vec![4.0, 4.0, 4.0], vec![1.0, 1.0, 1.0]];
        assert_eq!(test_matrix(&rows).unwrap_err(), TestError::DegenerateInput);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
        assert_eq!(test_matrix(&rows).unwrap_err(), TestError::UnequalBlockSize);
    }
}
