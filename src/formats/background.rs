// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Background ("Back*.txt") files. These are a single column of numbers (one
//! per range gate) with no header.

use std::num::NonZeroUsize;

use super::{
    fixed_width::fixed,
    rect::{parse_rows, RectError, RowWidth},
};
use crate::{
    averaging::{downsample_blockwise, ColumnKind},
    constants::{DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS, DEFAULT_BACKGROUND_TRUNCATED_ROWS},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundConfig {
    /// Only this many rows are kept before downsampling.
    pub truncated_rows: usize,

    /// The number of consecutive rows averaged into one.
    pub downsample_factor: NonZeroUsize,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            truncated_rows: DEFAULT_BACKGROUND_TRUNCATED_ROWS,
            downsample_factor: NonZeroUsize::new(
                DEFAULT_BACKGROUND_TRUNCATED_ROWS / DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS,
            )
            .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl BackgroundConfig {
    /// Truncate and downsample the contents of a background file. Every value
    /// is written with 6 decimal places; multi-column files keep their
    /// columns, separated by single spaces.
    pub fn correct(&self, contents: &str) -> Result<String, RectError> {
        let data = parse_rows(contents.lines(), 1, RowWidth::Uniform)?;
        let num_rows = data.nrows().min(self.truncated_rows);
        let data = data.slice(ndarray::s![..num_rows, ..]);

        let column_kinds = vec![ColumnKind::Linear; data.ncols()];
        let downsampled = downsample_blockwise(data, self.downsample_factor, &column_kinds)?;

        let mut out = String::with_capacity(downsampled.len() * 12);
        for row in downsampled.outer_iter() {
            let line = row.iter().map(|&v| fixed(v, 0, 6)).collect::<Vec<_>>();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        Ok(out)
    }
}
