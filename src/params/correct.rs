// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    num::NonZeroUsize,
    ops::Add,
    path::{Path, PathBuf},
};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, error, info};
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    formats::{Correction, FamilyConfig, FormatError},
    io::{
        read::read_text_lossy,
        write::{copy_file, destination_for, write_file_atomically, FileWriteError},
    },
    PROGRESS_BARS,
};

/// Everything needed to correct a batch of files of a single family.
pub(crate) struct CorrectParams {
    pub(crate) family: FamilyConfig,

    /// The directory that was searched for files. The directory structure
    /// beneath it is reproduced in `output_dir`.
    pub(crate) source_dir: PathBuf,

    pub(crate) output_dir: PathBuf,

    /// The files to be corrected.
    pub(crate) files: Vec<PathBuf>,

    /// Copy files that don't need correcting into `output_dir`, rather than
    /// leaving them out.
    pub(crate) copy_unchanged: bool,

    /// The number of files to work on at once. If this is `None`, then all
    /// available cores are used.
    pub(crate) num_threads: Option<NonZeroUsize>,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileOutcome {
    /// The corrected file was written here.
    Corrected(PathBuf),

    /// The file didn't need correcting and was left alone.
    Unchanged { num_gates: usize },

    /// The file didn't need correcting and was copied here.
    Copied { num_gates: usize, dest: PathBuf },
}

/// Counts of what happened to each file in a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub corrected: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl Add for BatchSummary {
    type Output = BatchSummary;

    fn add(self, rhs: Self) -> Self::Output {
        BatchSummary {
            corrected: self.corrected + rhs.corrected,
            unchanged: self.unchanged + rhs.unchanged,
            failed: self.failed + rhs.failed,
        }
    }
}

impl CorrectParams {
    /// Correct a single file. Its output is only written once all of its
    /// contents have been corrected. Nothing is logged here except at debug
    /// level; the caller reports the outcome.
    pub(crate) fn correct_file(&self, source: &Path) -> Result<FileOutcome, CorrectFileError> {
        debug!("Processing {}", source.display());
        let contents = read_text_lossy(source).map_err(CorrectFileError::Read)?;
        let correction = self.family.correct(&contents)?;

        let dest = destination_for(source, &self.source_dir, &self.output_dir);
        if dest == source {
            return Err(FileWriteError::WouldOverwriteInput(dest).into());
        }

        match correction {
            Correction::Corrected(corrected) => {
                write_file_atomically(&dest, corrected.as_bytes())?;
                Ok(FileOutcome::Corrected(dest))
            }

            Correction::Unchanged { num_gates } if self.copy_unchanged => {
                copy_file(source, &dest)?;
                Ok(FileOutcome::Copied { num_gates, dest })
            }

            Correction::Unchanged { num_gates } => Ok(FileOutcome::Unchanged { num_gates }),
        }
    }

    /// Correct all of the files. A file that can't be corrected is reported
    /// and skipped; it never stops the other files from being corrected.
    pub(crate) fn run(&self) -> Result<BatchSummary, CorrectError> {
        info!(
            "Found {} {} files in {}",
            self.files.len(),
            self.family.family(),
            self.source_dir.display()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads.map(|n| n.get()).unwrap_or(0))
            .thread_name(|i| format!("correct-{i}"))
            .build()?;

        let progress = ProgressBar::with_draw_target(
            Some(self.files.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:17}: [{wide_bar:.blue}] {pos:3}/{len:3} files ({elapsed_precise}<{eta_precise})")
                .unwrap()
                .progress_chars("=> "),
        )
        .with_message("Correcting files");

        let summary = pool.install(|| {
            self.files
                .par_iter()
                .progress_with(progress.clone())
                .map(|file| match self.correct_file(file) {
                    Ok(FileOutcome::Corrected(dest)) => {
                        info!("Processed {} → {}", file.display(), dest.display());
                        BatchSummary {
                            corrected: 1,
                            ..Default::default()
                        }
                    }
                    Ok(FileOutcome::Unchanged { num_gates }) => {
                        info!(
                            "File has {num_gates} gates. No changes made: {}",
                            file.display()
                        );
                        BatchSummary {
                            unchanged: 1,
                            ..Default::default()
                        }
                    }
                    Ok(FileOutcome::Copied { num_gates, dest }) => {
                        info!(
                            "File has {num_gates} gates; copied unchanged: {} → {}",
                            file.display(),
                            dest.display()
                        );
                        BatchSummary {
                            unchanged: 1,
                            ..Default::default()
                        }
                    }
                    Err(e) => {
                        error!("Failed to process {}: {e}", file.display());
                        BatchSummary {
                            failed: 1,
                            ..Default::default()
                        }
                    }
                })
                .reduce(BatchSummary::default, |a, b| a + b)
        });
        progress.abandon_with_message("Finished correcting");

        info!(
            "{} corrected, {} unchanged, {} failed",
            summary.corrected, summary.unchanged, summary.failed
        );
        Ok(summary)
    }
}

#[derive(Error, Debug)]
pub enum CorrectFileError {
    #[error("Couldn't read the file: {0}")]
    Read(std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Write(#[from] FileWriteError),
}

#[derive(Error, Debug)]
pub enum CorrectError {
    #[error("Couldn't start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
