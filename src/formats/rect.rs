// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code shared by the "rectangular" file families, i.e. those that are just a
//! matrix of numbers (perhaps with a small header).

use ndarray::prelude::*;
use thiserror::Error;

use crate::averaging::AveragingError;

/// How many columns each row of a rectangular file must have.
#[derive(Debug, Clone, Copy)]
pub(super) enum RowWidth {
    /// All rows have the same number of columns as the first row.
    Uniform,

    /// Each row has at least this many columns; only this many are kept.
    AtLeast(usize),
}

/// Parse whitespace-separated numbers into rows. Blank lines and `#` comment
/// lines are skipped. `first_line_num` is the 1-based line number of the first
/// line, for error reporting.
pub(super) fn parse_rows<'a, I>(
    lines: I,
    first_line_num: usize,
    width: RowWidth,
) -> Result<Array2<f64>, RectError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rows: Vec<Vec<f64>> = vec![];
    for (line_num, line) in lines.into_iter().enumerate() {
        let line_num = line_num + first_line_num;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| RectError::InvalidNumber {
                    line_num,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let row = match width {
            RowWidth::Uniform => match rows.first() {
                Some(first) if first.len() != row.len() => {
                    return Err(RectError::RaggedRow {
                        line_num,
                        expected: first.len(),
                        got: row.len(),
                    })
                }
                _ => row,
            },

            RowWidth::AtLeast(n) => {
                if row.len() < n {
                    return Err(RectError::TooFewColumns {
                        line_num,
                        expected: n,
                        got: row.len(),
                    });
                }
                let mut row = row;
                row.truncate(n);
                row
            }
        };
        rows.push(row);
    }

    let num_cols = match width {
        RowWidth::Uniform => rows.first().map(|r| r.len()).unwrap_or(0),
        RowWidth::AtLeast(n) => n,
    };
    Ok(Array2::from_shape_fn((rows.len(), num_cols), |(r, c)| {
        rows[r][c]
    }))
}

#[derive(Error, Debug)]
pub enum RectError {
    #[error("The file is empty; expected the number of gates on the first line")]
    MissingNumGates,

    #[error("Couldn't parse the number of gates from the first line '{line}'")]
    InvalidNumGates { line: String },

    #[error("Line {line_num}: couldn't parse '{token}' as a number")]
    InvalidNumber { line_num: usize, token: String },

    #[error("Line {line_num}: expected {expected} columns like the first row, but got {got}")]
    RaggedRow {
        line_num: usize,
        expected: usize,
        got: usize,
    },

    #[error("Line {line_num}: expected at least {expected} columns, but got {got}")]
    TooFewColumns {
        line_num: usize,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Averaging(#[from] AveragingError),
}
