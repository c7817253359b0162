// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Every family of file is found,
//! corrected and written out the same way, so the arguments for the input and
//! output directories are shared between all subcommands.

mod printers;
#[cfg(test)]
mod tests;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{
    borrow::Cow,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::DwlReduceError;
use crate::{
    formats::FamilyConfig,
    io::find_files_recursively,
    params::CorrectParams,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(DwlReduceError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(DwlReduceError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(DwlReduceError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Arguments describing where files come from and where they go.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct BatchArgs {
    /// The directory to search for files. All of its subdirectories are
    /// searched too.
    #[clap(short = 's', long, help_heading = "INPUT FILES")]
    pub(super) source_dir: Option<PathBuf>,

    /// Only files whose names match this glob pattern are corrected (e.g.
    /// "Back*.txt"). The pattern must not contain a directory.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) pattern: Option<String>,

    /// The directory to write corrected files into. The directory structure
    /// beneath the source directory is reproduced here.
    #[clap(short, long, help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// Copy files that are already at the target resolution into the output
    /// directory, rather than leaving them out.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) copy_unchanged: bool,

    /// The number of files to correct at once. The default is to use all
    /// available cores.
    #[clap(short = 'j', long)]
    pub(super) num_threads: Option<usize>,
}

impl BatchArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            source_dir: self.source_dir.or(other.source_dir),
            pattern: self.pattern.or(other.pattern),
            output_dir: self.output_dir.or(other.output_dir),
            copy_unchanged: self.copy_unchanged || other.copy_unchanged,
            num_threads: self.num_threads.or(other.num_threads),
        }
    }

    /// Find the files matching `pattern` and bundle everything that's needed
    /// to correct them. Nothing is written here.
    pub(super) fn parse(
        self,
        family: FamilyConfig,
        pattern: &str,
    ) -> Result<CorrectParams, DwlReduceError> {
        let Self {
            source_dir,
            pattern: _,
            output_dir,
            copy_unchanged,
            num_threads,
        } = self;

        let source_dir = source_dir.ok_or(BatchArgsError::NoSourceDir)?;
        if !source_dir.is_dir() {
            return Err(BatchArgsError::SourceNotDir(source_dir).into());
        }
        let source_dir = canonicalise(&source_dir)?;

        let output_dir = output_dir.ok_or(BatchArgsError::NoOutputDir)?;
        // The output directory is only created when something is written.
        let output_dir = if output_dir.exists() {
            canonicalise(&output_dir)?
        } else {
            std::path::absolute(&output_dir).map_err(|e| BatchArgsError::Canonicalise {
                path: output_dir.clone(),
                err: e,
            })?
        };
        if output_dir == source_dir {
            return Err(BatchArgsError::SameDirectories(source_dir).into());
        }

        let num_threads = match num_threads {
            None => None,
            Some(n) => Some(NonZeroUsize::new(n).ok_or(BatchArgsError::NumThreadsZero)?),
        };

        let mut files = find_files_recursively(&source_dir, pattern)?;
        // Don't pick up the output of a previous run.
        if output_dir.starts_with(&source_dir) {
            files.retain(|f| !f.starts_with(&output_dir));
        }
        trace!("Matched files: {files:#?}");
        if files.is_empty() {
            format!(
                "No files matching '{pattern}' were found in {}",
                source_dir.display()
            )
            .warn();
        }

        let mut printer = InfoPrinter::new(format!("Correcting {} files", family.family()).into());
        printer.push_block(vec![
            format!("Searching: {}", source_dir.display()).into(),
            format!("Pattern:   {pattern}").into(),
            format!("Found {} files", files.len()).into(),
        ]);
        let mut output_block: Vec<Cow<'static, str>> =
            vec![format!("Writing to: {}", output_dir.display()).into()];
        if copy_unchanged {
            output_block.push("Files that need no correction are copied".into());
        }
        printer.push_block(output_block);
        printer.push_block(family_description(&family));
        printer.display();

        Ok(CorrectParams {
            family,
            source_dir,
            output_dir,
            files,
            copy_unchanged,
            num_threads,
        })
    }
}

fn canonicalise(path: &Path) -> Result<PathBuf, BatchArgsError> {
    path.canonicalize()
        .map_err(|err| BatchArgsError::Canonicalise {
            path: path.to_path_buf(),
            err,
        })
}

/// Lines describing how a family of file is reduced.
fn family_description(family: &FamilyConfig) -> Vec<Cow<'static, str>> {
    match family {
        FamilyConfig::Background(c) => vec![
            format!("Keeping the first {} rows", c.truncated_rows).into(),
            format!("Averaging every {} rows", c.downsample_factor).into(),
        ],
        FamilyConfig::Processed(c) => vec![
            format!("Keeping the first {} rows", c.truncated_rows).into(),
            format!("Averaging every {} rows", c.downsample_factor).into(),
            format!("Declaring at most {} gates", c.downsampled_rows).into(),
        ],
        FamilyConfig::VadStare(c) => vec![
            format!("Skipping files with {} gates or fewer", c.expected_num_gates).into(),
            format!("Keeping the first {} gates of each ray", c.truncated_gates).into(),
            format!("Averaging every {} gates", c.downsample_factor).into(),
            format!("Declaring {} gates", c.downsampled_gates).into(),
        ],
    }
}

/// The lengths used to truncate and downsample, after defaults have been
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Reduction {
    pub(super) truncated: usize,
    pub(super) downsampled: usize,
    pub(super) factor: NonZeroUsize,
}

/// Apply defaults to the user's truncation and downsampling settings. If no
/// factor is given, it is the truncated length divided by the target length.
pub(super) fn parse_reduction(
    truncate: Option<usize>,
    target: Option<usize>,
    factor: Option<usize>,
    default_truncate: usize,
    default_target: usize,
) -> Result<Reduction, ReductionArgsError> {
    let truncated = truncate.unwrap_or(default_truncate);
    let downsampled = target.unwrap_or(default_target);
    if truncated == 0 {
        return Err(ReductionArgsError::TruncateZero);
    }
    if downsampled == 0 {
        return Err(ReductionArgsError::TargetZero);
    }

    let factor = match factor {
        Some(f) => NonZeroUsize::new(f).ok_or(ReductionArgsError::FactorZero)?,
        None => NonZeroUsize::new(truncated / downsampled).ok_or(
            ReductionArgsError::TargetTooLarge {
                truncated,
                downsampled,
            },
        )?,
    };
    if factor.get() > truncated {
        return Err(ReductionArgsError::FactorTooLarge { factor, truncated });
    }

    let produced = truncated / factor;
    if produced != downsampled {
        format!("Averaging {truncated} values by {factor} gives {produced} values, but {downsampled} are declared as the target")
            .warn();
    }
    debug!("Truncating to {truncated}, downsampling by {factor} to {downsampled}");

    Ok(Reduction {
        truncated,
        downsampled,
        factor,
    })
}

#[derive(Error, Debug)]
pub(super) enum BatchArgsError {
    #[error("No source directory was specified")]
    NoSourceDir,

    #[error("No output directory was specified")]
    NoOutputDir,

    #[error("The source directory '{0}' doesn't exist or isn't a directory")]
    SourceNotDir(PathBuf),

    #[error("The output directory can't be the source directory ({0}); the input files would be overwritten")]
    SameDirectories(PathBuf),

    #[error("The number of threads can't be 0")]
    NumThreadsZero,

    #[error("Couldn't resolve the path '{}': {err}", path.display())]
    Canonicalise { path: PathBuf, err: std::io::Error },
}

#[derive(Error, Debug)]
pub(super) enum ReductionArgsError {
    #[error("The truncation length can't be 0")]
    TruncateZero,

    #[error("The target length can't be 0")]
    TargetZero,

    #[error("The downsample factor can't be 0")]
    FactorZero,

    #[error("The target length ({downsampled}) is bigger than the truncation length ({truncated}), so a downsample factor can't be worked out")]
    TargetTooLarge {
        truncated: usize,
        downsampled: usize,
    },

    #[error("The downsample factor ({factor}) is bigger than the truncation length ({truncated}); nothing would be left")]
    FactorTooLarge {
        factor: NonZeroUsize,
        truncated: usize,
    },
}
