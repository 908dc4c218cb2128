#![allow(
    clippy::needless_return,
    clippy::assign_op_pattern,
    clippy::excessive_precision
)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]

//! # rformula
//!
//! An R-style statistical formula mini-language and the grouped hypothesis
//! tests that consume it. A formula like `y ~ group` plus a small tabular
//! dataset is enough to run the classical tests:
//!
//! - [x] [t-test](t) (one sample, two sample, paired) ([Wiki](https://en.wikipedia.org/wiki/Student%27s_t-test))
//! - [x] [Wilcoxon signed-rank test](wilcox) ([Wiki](https://en.wikipedia.org/wiki/Wilcoxon_signed-rank_test))
//! - [x] [One-way ANOVA F-test](anova) ([Wiki](https://en.wikipedia.org/wiki/One-way_analysis_of_variance))
//! - [x] [Kruskal-Wallis test](kruskal) ([Wiki](https://en.wikipedia.org/wiki/Kruskal%E2%80%93Wallis_test))
//! - [x] [Friedman test](friedman) ([Wiki](https://en.wikipedia.org/wiki/Friedman_test))
//! - [ ] Multifactor / interaction ANOVA (parsed, explicitly not computed)
//!
//! ## Formulas
//!
//! The [formula] module parses `dependent ~ term ((+|*) term)*` into a
//! [ParsedFormula](formula::ParsedFormula): a dependent variable, the
//! independent variables in source order, and one interaction tuple per
//! maximal `*`-run. Every dispatcher accepts a formula string next to a
//! [DataFrame](dataframe::DataFrame) and gates on the number of independent
//! variables it names.
//!
//! ## Results
//!
//! Each test returns a small immutable [result value](results) holding the
//! statistic, the eagerly computed p-value and the degrees of freedom of
//! its test family. Advisory conditions (like the Friedman small-sample
//! regime) are returned as structured
//! [Diagnostic](results::Diagnostic)s next to the result, never as errors
//! and never trough a global warning channel.
//!
//! ## Example
//!
//! ```
//! use rformula::anova;
//! use rformula::dataframe::{Column, DataFrame};
//!
//! let df = DataFrame::new()
//!     .with_column("score", Column::Float64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))?
//!     .with_column("group", Column::Int64(vec![0, 0, 0, 1, 1, 1]))?;
//!
//! let result = anova::aov("score ~ group", &df)?;
//! assert_eq!(result.degrees_of_freedom(), (1.0, 4.0));
//! # Ok::<(), rformula::errors::TestError>(())
//! ```
//!
//! Everything is a synchronous, pure computation over in-memory data: no
//! I/O, no concurrency, and no routine ever mutates a caller-supplied
//! dataset or matrix.

pub mod anova;
pub mod dataframe;
pub mod distributions;
pub mod errors;
pub mod formula;
pub mod friedman;
pub mod hypothesis;
pub mod kruskal;
pub mod ranks;
pub mod results;
pub mod samples;
pub mod t;
pub mod wilcox;
