//! # Minimal tabular dataset
//!
//! The formula dispatchers need very little from a dataframe: named columns,
//! numeric extraction, and grouping by a factor column that returns the row
//! positions of every level. This module provides exactly that surface and
//! nothing more (no joins, no mutation, no missing values).
//!
//! All access is read-only: once built, a [DataFrame] is never mutated by
//! any routine in this crate.

use std::collections::HashMap;
use std::fmt;

use crate::errors::TestError;

/// A column of a [DataFrame].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Column {
    /// 64 bit floating point observations.
    Float64(Vec<f64>),
    /// Integer observations (also usable as a grouping factor).
    Int64(Vec<i64>),
    /// String labels (only usable as a grouping factor).
    Str(Vec<String>),
}

impl Column {
    fn len(&self) -> usize {
        return match self {
            Column::Float64(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Str(v) => v.len(),
        };
    }
}

/// A distinct value of a grouping column.
///
/// Only hashable scalar column types can act as factors, so float columns
/// cannot be grouped on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    /// A level of an integer factor.
    Int(i64),
    /// A level of a string factor.
    Str(String),
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Level::Int(i) => write!(f, "{i}"),
            Level::Str(s) => write!(f, "{s}"),
        };
    }
}

/// A small named-column table with uniform column length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
}

impl DataFrame {
    /// Creates an empty [DataFrame].
    #[must_use]
    pub fn new() -> DataFrame {
        return DataFrame {
            columns: Vec::new(),
        };
    }

    /// Adds a named column, consuming and returning the frame so that calls
    /// can be chained.
    ///
    /// Fails with [TestError::ColumnLengthMismatch] if the column's length
    /// differs from the columns already present.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<DataFrame, TestError> {
        if let Some((_, first)) = self.columns.first()
            && first.len() != column.len()
        {
            return Err(TestError::ColumnLengthMismatch);
        }
        self.columns.push((String::from(name), column));
        return Ok(self);
    }

    /// Number of rows (0 for a frame with no columns).
    #[must_use]
    pub fn nrows(&self) -> usize {
        return self.columns.first().map_or(0, |(_, c)| c.len());
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        return self
            .columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c);
    }

    /// Extracts a column as a fresh `Vec<f64>` (integers are widened).
    ///
    /// Fails with [TestError::UnknownColumn] or [TestError::NotANumericColumn].
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, TestError> {
        let column: &Column = self
            .column(name)
            .ok_or_else(|| TestError::UnknownColumn(String::from(name)))?;
        return match column {
            Column::Float64(v) => Ok(v.clone()),
            #[allow(clippy::cast_precision_loss)]
            Column::Int64(v) => Ok(v.iter().map(|&i| i as f64).collect()),
            Column::Str(_) => Err(TestError::NotANumericColumn(String::from(name))),
        };
    }

    /// Groups the rows by the values of the named column.
    ///
    /// The returned [GroupBy] lists levels in first-encounter order (the
    /// order in wich each distinct value first appears in the column), and
    /// the levels partition all rows exactly.
    ///
    /// Fails with [TestError::UnknownColumn] for a missing column and
    /// [TestError::NotAGroupingColumn] for a float column (floats are not
    /// reliable factor labels).
    pub fn group_by(&self, name: &str) -> Result<GroupBy, TestError> {
        let column: &Column = self
            .column(name)
            .ok_or_else(|| TestError::UnknownColumn(String::from(name)))?;

        let mut groups: Vec<(Level, Vec<usize>)> = Vec::new();
        let mut seen: HashMap<Level, usize> = HashMap::new();

        let mut push = |level: Level, row: usize| {
            if let Some(&slot) = seen.get(&level) {
                groups[slot].1.push(row);
            } else {
                seen.insert(level.clone(), groups.len());
                groups.push((level, vec![row]));
            }
        };

        match column {
            Column::Int64(v) => {
                for (row, &value) in v.iter().enumerate() {
                    push(Level::Int(value), row);
                }
            }
            Column::Str(v) => {
                for (row, value) in v.iter().enumerate() {
                    push(Level::Str(value.clone()), row);
                }
            }
            Column::Float64(_) => {
                return Err(TestError::NotAGroupingColumn(String::from(name)));
            }
        }

        return Ok(GroupBy { groups });
    }
}

/// The result of [DataFrame::group_by]: one entry per distinct level, in
/// first-encounter order, each holding the row positions of that level.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    groups: Vec<(Level, Vec<usize>)>,
}

impl GroupBy {
    /// Number of distinct levels.
    #[must_use]
    pub fn len(&self) -> usize {
        return self.groups.len();
    }

    /// `true` if the grouped column had no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        return self.groups.is_empty();
    }

    /// Iterates over `(level, row positions)` pairs in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&Level, &[usize])> {
        return self.groups.iter().map(|(l, idx)| (l, idx.as_slice()));
    }

    /// The row positions of the `i`-th level (first-encounter order).
    #[must_use]
    pub fn indices(&self, i: usize) -> &[usize] {
        return &self.groups[i].1;
    }
}

/// Gathers `values[i]` for every row position in `indices`.
#[must_use]
pub(crate) fn take(values: &[f64], indices: &[usize]) -> Vec<f64> {
    return indices.iter().map(|&i| values[i]).collect();
}
