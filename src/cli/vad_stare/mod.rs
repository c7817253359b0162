// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use console::Term;
use is_terminal::IsTerminal;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, parse_reduction, BatchArgs, ARG_FILE_HELP};
use crate::{
    constants::{DEFAULT_DOWNSAMPLED_GATES, DEFAULT_EXPECTED_NUM_GATES, DEFAULT_TRUNCATED_GATES},
    formats::{FamilyConfig, HplConfig},
    io::write::can_write_to_dir,
    params::CorrectParams,
    DwlReduceError,
};

lazy_static::lazy_static! {
    static ref THRESHOLD_HELP: String =
        format!("Files declaring this many gates or fewer are already at the target resolution and aren't corrected. Default: {DEFAULT_EXPECTED_NUM_GATES}");

    static ref TRUNCATE_HELP: String =
        format!("Only keep this many gates of each ray before downsampling. Default: {DEFAULT_TRUNCATED_GATES}");

    static ref TARGET_HELP: String =
        format!("The number of gates declared in a corrected file's header. Default: {DEFAULT_DOWNSAMPLED_GATES}");
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct VadStareArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) batch_args: BatchArgs,

    /// The prefix of the files to correct, e.g. "Stare" corrects files named
    /// "Stare_*.hpl". If neither this nor a pattern is given, the prefix is
    /// asked for.
    #[clap(long, help_heading = "INPUT FILES")]
    pub(super) prefix: Option<String>,

    #[clap(long, help = THRESHOLD_HELP.as_str(), help_heading = "AVERAGING")]
    pub(super) threshold: Option<usize>,

    #[clap(long, help = TRUNCATE_HELP.as_str(), help_heading = "AVERAGING")]
    pub(super) truncate: Option<usize>,

    #[clap(long, help = TARGET_HELP.as_str(), help_heading = "AVERAGING")]
    pub(super) target: Option<usize>,

    /// The number of consecutive gates to average together. The default is
    /// the truncation length divided by the target length.
    #[clap(long, help_heading = "AVERAGING")]
    pub(super) downsample_factor: Option<usize>,
}

impl VadStareArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<VadStareArgs, DwlReduceError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let VadStareArgs {
                args_file: _,
                batch_args,
                prefix,
                threshold,
                truncate,
                target,
                downsample_factor,
            } = unpack_arg_file!(arg_file);

            Ok(VadStareArgs {
                args_file: None,
                batch_args: cli_args.batch_args.merge(batch_args),
                prefix: cli_args.prefix.or(prefix),
                threshold: cli_args.threshold.or(threshold),
                truncate: cli_args.truncate.or(truncate),
                target: cli_args.target.or(target),
                downsample_factor: cli_args.downsample_factor.or(downsample_factor),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<CorrectParams, DwlReduceError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            batch_args,
            prefix,
            threshold,
            truncate,
            target,
            downsample_factor,
        } = self;

        let reduction = parse_reduction(
            truncate,
            target,
            downsample_factor,
            DEFAULT_TRUNCATED_GATES,
            DEFAULT_DOWNSAMPLED_GATES,
        )?;
        let config = HplConfig {
            expected_num_gates: threshold.unwrap_or(DEFAULT_EXPECTED_NUM_GATES),
            truncated_gates: reduction.truncated,
            downsampled_gates: reduction.downsampled,
            downsample_factor: reduction.factor,
            ..Default::default()
        };
        config.validate()?;

        let pattern = match (batch_args.pattern.clone(), prefix) {
            (Some(_), Some(_)) => return Err(VadStareArgsError::PrefixAndPattern.into()),
            (Some(pattern), None) => pattern,
            (None, Some(prefix)) => pattern_from_prefix(&prefix)?,
            (None, None) => {
                if !std::io::stdin().is_terminal() {
                    return Err(VadStareArgsError::NoPattern.into());
                }
                pattern_from_prefix(&prompt_for_prefix()?)?
            }
        };
        let params = batch_args.parse(FamilyConfig::VadStare(config), &pattern)?;

        display_warnings();

        Ok(params)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), DwlReduceError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        can_write_to_dir(&params.output_dir)?;
        params.run()?;
        Ok(())
    }
}

/// "Stare" -> "Stare_*.hpl".
fn pattern_from_prefix(prefix: &str) -> Result<String, VadStareArgsError> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(VadStareArgsError::EmptyPrefix);
    }
    Ok(format!("{prefix}_*.hpl"))
}

fn prompt_for_prefix() -> Result<String, VadStareArgsError> {
    let term = Term::stdout();
    term.write_str("Enter the prefix of the files to correct (e.g. Stare, Wind_Profile): ")?;
    let prefix = term.read_line()?;
    Ok(prefix)
}

#[derive(Error, Debug)]
pub(super) enum VadStareArgsError {
    #[error("No file prefix or pattern was given, and stdin isn't a terminal to ask for one")]
    NoPattern,

    #[error("The file prefix can't be empty")]
    EmptyPrefix,

    #[error("Only one of a file prefix and a file pattern may be given")]
    PrefixAndPattern,

    #[error("Couldn't read the file prefix: {0}")]
    Prompt(#[from] std::io::Error),
}
