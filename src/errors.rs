use thiserror::Error;

/// The formula string did not match the grammar
/// `dependent ~ term ((+|*) term)*`.
///
/// There is a single kind of syntax error: the parser does not attempt
/// any partial recovery. The payload is a short static description of
/// what went wrong, for diagnostics only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid formula ({0}). Formulas follow `dependent ~ term [(+|*) term ...]`. ")]
pub struct FormulaError(pub &'static str);

/// An enum that indicates what went wrong with the test.
///
/// All errors are raised synchronously to the immediate caller; none are
/// retried or recovered internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    /// The formula string does not match the grammar.
    #[error(transparent)]
    FormulaSyntax(#[from] FormulaError),
    /// The formula named the wrong number of independent variables for the
    /// requested test. (The tests here take exactly one.)
    #[error("number of independent variables must be one in the formula (found {found}). ")]
    Arity {
        /// How many independent variables the formula actually named.
        found: usize,
    },
    /// The grouping variable must have exactly two levels for this test.
    #[error("the independent variable can only have two levels (found {found}). ")]
    LevelCount {
        /// How many distinct levels the grouping column actually had.
        found: usize,
    },
    /// Every level must contain the same number of rows (Friedman blocks).
    #[error("every level must have the same number of rows to form blocks. ")]
    UnequalBlockSize,
    /// The input has no variability left to test (all values/ranks tied),
    /// wich would otherwise produce a division by zero.
    #[error(
        "the input is degenerate (zero variance / all ranks tied), the statistic is undefined. "
    )]
    DegenerateInput,
    /// The requested computation is recognized but not implemented.
    #[error("not implemented: {0}. ")]
    NotImplemented(&'static str),
    /// There were not enough samples (or levels) to do the operation.
    #[error("there were not enough samples to do the operation. ")]
    NotEnoughSamples,
    /// Two paired sequences had different lengths.
    #[error("paired samples must have the same length ({left} vs {right}). ")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },
    /// A NaN (Not a Number) or `+-inf` was found in the input.
    #[error("a NaN (Not a Number) or `+-inf` was found in the input. ")]
    NanErr,
    /// A named column does not exist in the dataset.
    #[error("unknown column `{0}`. ")]
    UnknownColumn(String),
    /// A column did not have the same length as the rest of the dataset.
    #[error("all columns of a dataframe must have the same length. ")]
    ColumnLengthMismatch,
    /// Grouping was requested on a column type that cannot act as a factor.
    #[error("column `{0}` cannot be used as a grouping factor. ")]
    NotAGroupingColumn(String),
    /// A numeric column was requested but the column holds something else.
    #[error("column `{0}` is not numeric. ")]
    NotANumericColumn(String),
}
