// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all dwl-reduce-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{
    common::{BatchArgsError, ReductionArgsError},
    vad_stare::VadStareArgsError,
};
use crate::{
    formats::HplError,
    io::{write::FileWriteError, GlobError},
    params::CorrectError,
};

/// The *only* publicly visible error from dwl-reduce. Errors from individual
/// files never end up here; they are reported and the batch carries on.
#[derive(Error, Debug)]
pub enum DwlReduceError {
    /// An error related to the input or output directories.
    #[error("{0}")]
    Batch(String),

    /// An error related to truncation and downsampling settings.
    #[error("{0}\n\nThe downsample factor defaults to the truncation length divided by the target length.")]
    Averaging(String),

    /// An error related to vad-stare.
    #[error("{0}\n\nVAD/Stare files are found by prefix, e.g. '--prefix Stare' searches for 'Stare_*.hpl'.")]
    VadStare(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files may be TOML or JSON; their keys are the long names of this subcommand's flags, with underscores instead of dashes.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<BatchArgsError> for DwlReduceError {
    fn from(e: BatchArgsError) -> Self {
        let s = e.to_string();
        match e {
            BatchArgsError::NoSourceDir
            | BatchArgsError::NoOutputDir
            | BatchArgsError::SourceNotDir(_)
            | BatchArgsError::SameDirectories(_)
            | BatchArgsError::NumThreadsZero => Self::Batch(s),
            BatchArgsError::Canonicalise { .. } => Self::Generic(s),
        }
    }
}

impl From<ReductionArgsError> for DwlReduceError {
    fn from(e: ReductionArgsError) -> Self {
        Self::Averaging(e.to_string())
    }
}

impl From<VadStareArgsError> for DwlReduceError {
    fn from(e: VadStareArgsError) -> Self {
        let s = e.to_string();
        match e {
            VadStareArgsError::NoPattern
            | VadStareArgsError::EmptyPrefix
            | VadStareArgsError::PrefixAndPattern => Self::VadStare(s),
            VadStareArgsError::Prompt(_) => Self::Generic(s),
        }
    }
}

impl From<HplError> for DwlReduceError {
    fn from(e: HplError) -> Self {
        Self::VadStare(e.to_string())
    }
}

impl From<CorrectError> for DwlReduceError {
    fn from(e: CorrectError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<FileWriteError> for DwlReduceError {
    fn from(e: FileWriteError) -> Self {
        let s = e.to_string();
        match e {
            FileWriteError::FileNotWritable { .. }
            | FileWriteError::NewDirectory(_)
            | FileWriteError::WouldOverwriteInput(_) => Self::Batch(s),
            FileWriteError::IO(_) => Self::Generic(s),
        }
    }
}

impl From<GlobError> for DwlReduceError {
    fn from(e: GlobError) -> Self {
        let s = e.to_string();
        match e {
            GlobError::PatternHasSeparator { .. } | GlobError::NonUtf8Root { .. } => {
                Self::Batch(s)
            }
            GlobError::GlobCrate(_) | GlobError::PatternError(_) => Self::Generic(s),
        }
    }
}

impl From<toml::ser::Error> for DwlReduceError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(e.to_string())
    }
}

impl From<std::io::Error> for DwlReduceError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
