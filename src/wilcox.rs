//! # Wilcoxon signed-rank dispatcher
//!
//! Same shape gates as the [t](crate::t) dispatcher, delegating to the
//! [signed-rank primitive](crate::hypothesis::signed_rank) instead of
//! Student's t. Note that the signed-rank test is paired by definition, so
//! the formula path requires the two levels to have the same number of rows.

use crate::dataframe::DataFrame;
use crate::errors::TestError;
use crate::formula::{self, ParsedFormula};
use crate::hypothesis::signed_rank;
use crate::results::WilcoxResult;
use crate::t::two_level_columns;

/// Signed-rank test between two measurements, or over a single sample of
/// differences when `y` is not given.
#[bon::builder]
pub fn test_samples(x: &[f64], y: Option<&[f64]>) -> Result<WilcoxResult, TestError> {
    return signed_rank().x(x).maybe_y(y).call();
}

/// Formula signed-rank test: `"y ~ group"` over `data`.
///
/// Errors: [TestError::Arity] for more than one independent variable,
/// [TestError::LevelCount] when the grouping variable does not have exactly
/// two levels, [TestError::LengthMismatch] when the two levels are not the
/// same size (the pairs are formed by position).
pub fn test_formula(formula: &str, data: &DataFrame) -> Result<WilcoxResult, TestError> {
    let parsed: ParsedFormula = formula::parse(formula)?;
    let factor: &str = parsed.only_independent()?;

    let (first, second) = two_level_columns(data, &parsed.dependent, factor)?;
    return signed_rank().x(&first).y(&second).call();
}
