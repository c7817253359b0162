// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Processed wind-profile ("Proce*.hpl") files. The first line is the number
//! of gates, and every following line is a range \[m\], wind direction
//! \[degrees\] and wind speed \[m/s\].

use std::{fmt::Write, num::NonZeroUsize};

use super::{
    fixed_width::fixed,
    rect::{parse_rows, RectError, RowWidth},
};
use crate::{
    averaging::{downsample_blockwise, ColumnKind},
    constants::{DEFAULT_PROCESSED_DOWNSAMPLED_ROWS, DEFAULT_PROCESSED_TRUNCATED_ROWS},
};

const PROCESSED_COLUMN_KINDS: [ColumnKind; 3] = [
    ColumnKind::Linear,
    ColumnKind::CircularDegrees,
    ColumnKind::Linear,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedConfig {
    /// Only this many rows are kept before downsampling.
    pub truncated_rows: usize,

    /// The largest number of gates a corrected file may declare.
    pub downsampled_rows: usize,

    /// The number of consecutive rows averaged into one.
    pub downsample_factor: NonZeroUsize,
}

impl Default for ProcessedConfig {
    fn default() -> Self {
        Self {
            truncated_rows: DEFAULT_PROCESSED_TRUNCATED_ROWS,
            downsampled_rows: DEFAULT_PROCESSED_DOWNSAMPLED_ROWS,
            downsample_factor: NonZeroUsize::new(
                DEFAULT_PROCESSED_TRUNCATED_ROWS / DEFAULT_PROCESSED_DOWNSAMPLED_ROWS,
            )
            .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl ProcessedConfig {
    /// Truncate and downsample the contents of a processed wind-profile file.
    /// Wind directions are averaged as angles.
    pub fn correct(&self, contents: &str) -> Result<String, RectError> {
        let mut lines = contents.lines();
        let first = lines.next().ok_or(RectError::MissingNumGates)?;
        let num_gates: usize = first
            .trim()
            .parse()
            .map_err(|_| RectError::InvalidNumGates {
                line: first.to_string(),
            })?;
        // The declared count is capped, but not reconciled with the number of
        // rows actually written.
        let num_gates = num_gates.min(self.downsampled_rows);

        let data = parse_rows(lines, 2, RowWidth::AtLeast(PROCESSED_COLUMN_KINDS.len()))?;
        let num_rows = data.nrows().min(self.truncated_rows);
        let data = data.slice(ndarray::s![..num_rows, ..]);
        let downsampled =
            downsample_blockwise(data, self.downsample_factor, &PROCESSED_COLUMN_KINDS)?;

        let mut out = String::with_capacity(8 + downsampled.nrows() * 24);
        // Writing to a `String` can't fail.
        let _ = writeln!(out, "{num_gates}");
        for row in downsampled.outer_iter() {
            let _ = writeln!(
                out,
                "{} {} {}",
                fixed(row[0], 0, 3),
                fixed(row[1], 0, 3),
                fixed(row[2], 0, 3)
            );
        }
        Ok(out)
    }
}
