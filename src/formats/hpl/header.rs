// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The textual preamble of a ray file.

use std::borrow::Cow;

use super::HplError;
use crate::constants::{HEADER_BOUNDARY, NUM_GATES_LABEL, RANGE_GATE_LENGTH_LABEL};

/// A ray file's header after its fields have been rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct HplHeader<'a> {
    /// All lines up to and including the boundary line. Lines keep their
    /// line endings.
    pub lines: Vec<Cow<'a, str>>,

    /// The number of gates per ray declared by the header.
    pub num_gates: usize,

    /// The index into `lines` of the number-of-gates line. This line is not
    /// rewritten here, because the output number of gates is up to the caller.
    pub num_gates_line: usize,

    /// The index of the boundary line. The body starts on the following line.
    pub boundary: usize,
}

/// Get the value after the first colon of a "label: value" header line.
fn field_value(line: &str) -> &str {
    line.split(':').nth(1).unwrap_or("").trim()
}

/// Scan a ray file's header. The range-gate length is rewritten as an integer
/// (truncated towards zero); everything else is passed through unchanged.
/// Scanning stops at the first boundary line. The rewritten line ends with
/// `eol`.
///
/// Fails if the number-of-gates line or the boundary line are missing.
pub fn rewrite_header<'a>(lines: &[&'a str], eol: &str) -> Result<HplHeader<'a>, HplError> {
    let mut out = Vec::with_capacity(lines.len().min(32));
    let mut num_gates: Option<(usize, usize)> = None;

    for (i_line, &line) in lines.iter().enumerate() {
        if line.starts_with(NUM_GATES_LABEL) {
            let n = field_value(line)
                .parse::<usize>()
                .map_err(|_| HplError::InvalidNumGates {
                    line: line.trim_end().to_string(),
                })?;
            num_gates = Some((n, out.len()));
            out.push(Cow::Borrowed(line));
        } else if line.starts_with(RANGE_GATE_LENGTH_LABEL) {
            let length = field_value(line)
                .parse::<f64>()
                .ok()
                .filter(|l| l.is_finite())
                .ok_or_else(|| HplError::InvalidRangeGateLength {
                    line: line.trim_end().to_string(),
                })?;
            out.push(Cow::Owned(format!(
                "{RANGE_GATE_LENGTH_LABEL}\t{}{eol}",
                length.trunc() as i64
            )));
        } else {
            out.push(Cow::Borrowed(line));
        }

        if line.trim() == HEADER_BOUNDARY {
            let (num_gates, num_gates_line) = num_gates.ok_or(HplError::MissingNumGates)?;
            return Ok(HplHeader {
                lines: out,
                num_gates,
                num_gates_line,
                boundary: i_line,
            });
        }
    }

    Err(match num_gates {
        Some(_) => HplError::MissingBoundary,
        None => HplError::MissingNumGates,
    })
}
