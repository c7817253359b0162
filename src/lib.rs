// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reduction software for Doppler wind lidar (DWL) files.
//!
//! Instruments configured with a fine range-gate resolution produce files that
//! downstream tools can't read. `dwl-reduce` truncates and block-averages the
//! range gates of such files, writing new files that keep the original layout.

pub mod averaging;
mod cli;
pub mod constants;
pub mod formats;
mod io;
mod params;

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// Re-exports.
pub use averaging::{circular_mean_deg, downsample_blockwise, AveragingError, ColumnKind};
pub use cli::{DwlReduce, DwlReduceError};
pub use formats::{
    correct_hpl, BackgroundConfig, Correction, FamilyConfig, FileFamily, FormatError, HplConfig,
    HplError, ProcessedConfig, RectError,
};
pub use params::BatchSummary;
