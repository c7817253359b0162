// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! VAD and Stare ray files (`Wind_*.hpl`, `Stare_*.hpl`, ...).
//!
//! These files have a free-form textual header terminated by a `****` line.
//! The body is a sequence of rays; each ray is a 5-token header line
//! (decimal time, azimuth, elevation, pitch, roll) followed by one 4-token
//! line per range gate (gate index, Doppler velocity, intensity,
//! backscatter). For example:
//!
//! ```text
//! Number of gates:	600
//! Range gate length (m):	30.0
//! ...
//! ****
//! 17.002222 0.00 90.00 -0.30 0.10
//!   0 -0.1234  1.012345  1.234560E-06
//!   1 -0.2345  1.023456  2.345670E-06
//! ...
//! ```
//!
//! Correcting a file truncates and block-averages every ray's gates. Readers
//! of these files split columns by position, so the output copies the
//! instrument's widths and precisions exactly.

mod error;
mod header;
mod rays;

pub use error::HplError;
pub use header::{rewrite_header, HplHeader};
pub use rays::{classify_line, rewrite_ray, tokenise_rays, GateLineFormat, GateRecord, LineKind, Ray};

use std::{fmt::Write, num::NonZeroUsize};

use log::trace;

use super::Correction;
use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HplConfig {
    /// Files declaring this many gates or fewer are left alone.
    pub expected_num_gates: usize,

    /// Each ray keeps only this many gates before downsampling.
    pub truncated_gates: usize,

    /// The number of gates written into a corrected header.
    pub downsampled_gates: usize,

    /// The number of consecutive gates averaged into one.
    pub downsample_factor: NonZeroUsize,

    /// The number of tokens on a ray header line.
    pub ray_header_len: usize,

    /// The number of tokens on a gate line (including the gate index).
    pub gate_line_len: usize,

    pub gate_format: GateLineFormat,
}

impl Default for HplConfig {
    fn default() -> Self {
        Self {
            expected_num_gates: DEFAULT_EXPECTED_NUM_GATES,
            truncated_gates: DEFAULT_TRUNCATED_GATES,
            downsampled_gates: DEFAULT_DOWNSAMPLED_GATES,
            downsample_factor: NonZeroUsize::new(
                DEFAULT_TRUNCATED_GATES / DEFAULT_DOWNSAMPLED_GATES,
            )
            .unwrap_or(NonZeroUsize::MIN),
            ray_header_len: RAY_HEADER_LEN,
            gate_line_len: GATE_LINE_LEN,
            gate_format: GateLineFormat::default(),
        }
    }
}

impl HplConfig {
    /// The number of values on a gate line, not counting the gate index.
    pub(crate) fn num_values(&self) -> usize {
        self.gate_line_len.saturating_sub(1)
    }

    /// Check that this config can describe a ray file at all.
    pub fn validate(&self) -> Result<(), HplError> {
        if self.ray_header_len == self.gate_line_len {
            return Err(HplError::AmbiguousLineLength(self.gate_line_len));
        }
        if self.gate_format.columns.len() != self.num_values() {
            return Err(HplError::FormatMismatch {
                expected: self.num_values(),
                got: self.gate_format.columns.len(),
            });
        }
        Ok(())
    }
}

/// The line terminator of a file, taken from its first line. Lines written
/// in place of the file's own use it, so CRLF files stay CRLF.
pub fn line_ending(contents: &str) -> &'static str {
    match contents.find('\n') {
        Some(i) if contents[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Correct the contents of a ray file.
///
/// If the header declares `expected_num_gates` gates or fewer, the file is
/// already at the target resolution and [`Correction::Unchanged`] is returned.
/// Otherwise, the header's number of gates is set to `downsampled_gates`, its
/// range-gate length becomes an integer, and every ray is truncated and
/// downsampled. Generated lines end like the file's first line. Nothing is
/// returned unless the whole file could be corrected.
pub fn correct_hpl(contents: &str, config: &HplConfig) -> Result<Correction, HplError> {
    config.validate()?;

    let eol = line_ending(contents);
    let lines: Vec<&str> = contents.split_inclusive('\n').collect();
    let header = rewrite_header(&lines, eol)?;
    trace!(
        "Header is {} lines and declares {} gates",
        header.boundary + 1,
        header.num_gates
    );
    if header.num_gates <= config.expected_num_gates {
        return Ok(Correction::Unchanged {
            num_gates: header.num_gates,
        });
    }

    let rays = tokenise_rays(
        &lines[header.boundary + 1..],
        config.ray_header_len,
        config.gate_line_len,
    );
    trace!("Found {} rays", rays.len());

    let mut out = String::with_capacity(contents.len() / config.downsample_factor.get() + 1024);
    for (i_line, line) in header.lines.iter().enumerate() {
        if i_line == header.num_gates_line {
            let _ = write!(out, "{NUM_GATES_LABEL}\t{}{eol}", config.downsampled_gates);
        } else {
            out.push_str(line);
        }
    }
    for ray in rays {
        out.push_str(ray.header.trim());
        out.push_str(eol);
        for gate_line in rewrite_ray(&ray.gates, config, eol)? {
            out.push_str(&gate_line);
        }
    }

    Ok(Correction::Corrected(out))
}
