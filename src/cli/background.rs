// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, parse_reduction, BatchArgs, ARG_FILE_HELP};
use crate::{
    constants::{
        DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS, DEFAULT_BACKGROUND_PATTERN,
        DEFAULT_BACKGROUND_TRUNCATED_ROWS,
    },
    formats::{BackgroundConfig, FamilyConfig},
    io::write::can_write_to_dir,
    params::CorrectParams,
    DwlReduceError,
};

lazy_static::lazy_static! {
    static ref TRUNCATE_HELP: String =
        format!("Only keep this many rows of each file before downsampling. Default: {DEFAULT_BACKGROUND_TRUNCATED_ROWS}");

    static ref TARGET_HELP: String =
        format!("The number of rows that a corrected file should have. Default: {DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS}");
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct BackgroundArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) batch_args: BatchArgs,

    #[clap(long, help = TRUNCATE_HELP.as_str(), help_heading = "AVERAGING")]
    pub(super) truncate: Option<usize>,

    #[clap(long, help = TARGET_HELP.as_str(), help_heading = "AVERAGING")]
    pub(super) target: Option<usize>,

    /// The number of consecutive rows to average together. The default is the
    /// truncation length divided by the target length.
    #[clap(long, help_heading = "AVERAGING")]
    pub(super) downsample_factor: Option<usize>,
}

impl BackgroundArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<BackgroundArgs, DwlReduceError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let BackgroundArgs {
                args_file: _,
                batch_args,
                truncate,
                target,
                downsample_factor,
            } = unpack_arg_file!(arg_file);

            Ok(BackgroundArgs {
                args_file: None,
                batch_args: cli_args.batch_args.merge(batch_args),
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
            truncate,
            target,
            downsample_factor,
        } = self;

        let reduction = parse_reduction(
            truncate,
            target,
            downsample_factor,
            DEFAULT_BACKGROUND_TRUNCATED_ROWS,
            DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS,
        )?;
        let family = FamilyConfig::Background(BackgroundConfig {
            truncated_rows: reduction.truncated,
            downsample_factor: reduction.factor,
        });

        let pattern = batch_args
            .pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_BACKGROUND_PATTERN.to_string());
        let params = batch_args.parse(family, &pattern)?;

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
