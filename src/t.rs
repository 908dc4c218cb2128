//! # t-test dispatcher
//!
//! The R-flavoured front door of the t family. Three explicit entry points
//! replace the original's runtime type dispatch:
//!
//!  - [test_one_sample]: a sample against a population mean,
//!  - [test_two_samples]: two raw samples (independent or paired),
//!  - [test_formula]: an R-style formula plus a [DataFrame].
//!
//! The formula path parses the formula, requires exactly one independent
//! variable, groups the dataset by it, requires exactly two levels and runs
//! the two-sample test on the dependent column of the two levels (level
//! order = first-encounter order during grouping).

use crate::dataframe::{DataFrame, GroupBy, take};
use crate::errors::TestError;
use crate::formula::{self, ParsedFormula};
use crate::hypothesis::two_sample_t;
use crate::results::TResult;
use crate::samples::Samples;

/// One sample t-test of `sample` against the population mean `pop_mean`.
pub fn test_one_sample(sample: &[f64], pop_mean: f64) -> Result<TResult, TestError> {
    let mut data: Samples = Samples::new(sample)?;
    return crate::hypothesis::one_sample_t()
        .data(&mut data)
        .null_mean(pop_mean)
        .call();
}

/// Two sample t-test between `first` and `second`; `paired` selects the
/// dependent-samples variant.
#[bon::builder]
pub fn test_two_samples(
    first: &[f64],
    second: &[f64],
    #[builder(default)] paired: bool,
) -> Result<TResult, TestError> {
    let mut a: Samples = Samples::new(first)?;
    let mut b: Samples = Samples::new(second)?;
    return two_sample_t()
        .data_a(&mut a)
        .data_b(&mut b)
        .paired(paired)
        .call();
}

/// Formula t-test: `"y ~ group"` over `data`.
///
/// Errors: [TestError::Arity] when the formula names more than one
/// independent variable, [TestError::LevelCount] when the grouping variable
/// does not have exactly two distinct levels, plus the formula/dataset
/// errors of the collaborators.
#[bon::builder]
pub fn test_formula(
    formula: &str,
    data: &DataFrame,
    #[builder(default)] paired: bool,
) -> Result<TResult, TestError> {
    let parsed: ParsedFormula = formula::parse(formula)?;
    let factor: &str = parsed.only_independent()?;

    let (first, second) = two_level_columns(data, &parsed.dependent, factor)?;
    let mut a: Samples = Samples::new_move(first)?;
    let mut b: Samples = Samples::new_move(second)?;
    return two_sample_t()
        .data_a(&mut a)
        .data_b(&mut b)
        .paired(paired)
        .call();
}

/// Splits the dependent column of `data` into the two level groups of
/// `factor`, in first-encounter level order. Shared with the
/// [wilcox](crate::wilcox) dispatcher, wich has the same shape gate.
pub(crate) fn two_level_columns(
    data: &DataFrame,
    dependent: &str,
    factor: &str,
) -> Result<(Vec<f64>, Vec<f64>), TestError> {
    let groups: GroupBy = data.group_by(factor)?;
    if groups.len() != 2 {
        return Err(TestError::LevelCount {
            found: groups.len(),
        });
    }
    let values: Vec<f64> = data.numeric(dependent)?;
    return Ok((
        take(&values, groups.indices(0)),
        take(&values, groups.indices(1)),
    ));
}
