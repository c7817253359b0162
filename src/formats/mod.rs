// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to correct each family of Doppler wind lidar file. All families go
//! through the same steps: load, truncate, block-average, reformat.

mod background;
pub(crate) mod fixed_width;
pub mod hpl;
mod processed;
mod rect;

pub use background::BackgroundConfig;
pub use fixed_width::{ColumnFormat, Notation};
pub use hpl::{correct_hpl, HplConfig, HplError};
pub use processed::ProcessedConfig;
pub use rect::RectError;

use strum_macros::Display;
use thiserror::Error;

/// The outcome of correcting a file's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// The file already meets the target resolution; the source should be
    /// used as is.
    Unchanged { num_gates: usize },

    /// The corrected contents.
    Corrected(String),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
/// All supported families of lidar file.
pub enum FileFamily {
    #[strum(serialize = "background")]
    Background,
    #[strum(serialize = "processed")]
    Processed,
    #[strum(serialize = "vad-stare")]
    VadStare,
}

/// How to correct a single family of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyConfig {
    Background(BackgroundConfig),
    Processed(ProcessedConfig),
    VadStare(HplConfig),
}

impl FamilyConfig {
    pub fn family(&self) -> FileFamily {
        match self {
            FamilyConfig::Background(_) => FileFamily::Background,
            FamilyConfig::Processed(_) => FileFamily::Processed,
            FamilyConfig::VadStare(_) => FileFamily::VadStare,
        }
    }

    /// Correct the full (decoded) contents of a file.
    pub fn correct(&self, contents: &str) -> Result<Correction, FormatError> {
        match self {
            FamilyConfig::Background(c) => Ok(Correction::Corrected(c.correct(contents)?)),
            FamilyConfig::Processed(c) => Ok(Correction::Corrected(c.correct(contents)?)),
            FamilyConfig::VadStare(c) => Ok(correct_hpl(contents, c)?),
        }
    }
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error(transparent)]
    Rect(#[from] RectError),

    #[error(transparent)]
    Hpl(#[from] HplError),
}
