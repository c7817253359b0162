// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions for block averaging.
//!
//! Every lidar file family is reduced the same way: rows (or gates) are
//! grouped into contiguous blocks of `factor` rows, and each block is replaced
//! by its mean. Most quantities are averaged arithmetically, but angular
//! quantities (e.g. wind direction) must be averaged as vectors, otherwise
//! 359° and 1° would average to 180°.

mod error;

pub use error::AveragingError;

use std::num::NonZeroUsize;

use ndarray::prelude::*;

/// How the values of a column should be averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// The arithmetic mean.
    Linear,

    /// The circular mean of angles in degrees. The result is in [0, 360).
    CircularDegrees,
}

/// Compute the circular mean of angles \[degrees\]. The result is normalised
/// into [0, 360).
///
/// Returns `None` if there are no angles.
pub fn circular_mean_deg<I>(angles: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum_sin = 0.0;
    let mut sum_cos = 0.0;
    let mut count = 0_usize;
    for angle in angles {
        let (sin, cos) = angle.to_radians().sin_cos();
        sum_sin += sin;
        sum_cos += cos;
        count += 1;
    }
    if count == 0 {
        return None;
    }

    let mean = (sum_sin / count as f64)
        .atan2(sum_cos / count as f64)
        .to_degrees();
    // `rem_euclid` can round up to exactly 360 for tiny negative angles.
    let mean = mean.rem_euclid(360.0);
    Some(if mean >= 360.0 { 0.0 } else { mean })
}

/// Average a block of rows into a single row. Each column is averaged
/// according to its [`ColumnKind`].
///
/// The block must not be empty, and there must be exactly one kind per
/// column.
pub fn average_block(
    block: ArrayView2<f64>,
    column_kinds: &[ColumnKind],
) -> Result<Array1<f64>, AveragingError> {
    let (num_rows, num_cols) = block.dim();
    if num_rows == 0 {
        return Err(AveragingError::EmptyBlock);
    }
    if num_cols != column_kinds.len() {
        return Err(AveragingError::ColumnMismatch {
            expected: column_kinds.len(),
            got: num_cols,
        });
    }

    let averaged = block
        .axis_iter(Axis(1))
        .zip(column_kinds)
        .map(|(column, kind)| match kind {
            ColumnKind::Linear => column.sum() / num_rows as f64,
            // The block isn't empty, so there's always a mean.
            ColumnKind::CircularDegrees => circular_mean_deg(column.iter().copied()).unwrap_or(0.0),
        })
        .collect();
    Ok(averaged)
}

/// Downsample rows by averaging contiguous blocks of `factor` rows. Any
/// trailing rows that don't make up a whole block are dropped.
pub fn downsample_blockwise(
    data: ArrayView2<f64>,
    factor: NonZeroUsize,
    column_kinds: &[ColumnKind],
) -> Result<Array2<f64>, AveragingError> {
    let factor = factor.get();
    let num_blocks = data.len_of(Axis(0)) / factor;
    let mut downsampled = Array2::zeros((num_blocks, column_kinds.len()));
    for (i_block, mut out_row) in downsampled.outer_iter_mut().enumerate() {
        let block = data.slice(s![i_block * factor..(i_block + 1) * factor, ..]);
        out_row.assign(&average_block(block, column_kinds)?);
    }
    Ok(downsampled)
}
