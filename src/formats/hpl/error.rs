// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{
    averaging::AveragingError,
    constants::{HEADER_BOUNDARY, NUM_GATES_LABEL},
};

#[derive(Error, Debug)]
pub enum HplError {
    #[error("The header has no '{NUM_GATES_LABEL}' line before the '{HEADER_BOUNDARY}' boundary")]
    MissingNumGates,

    #[error("The header isn't terminated by a '{HEADER_BOUNDARY}' line")]
    MissingBoundary,

    #[error("Couldn't parse the number of gates from header line '{line}'")]
    InvalidNumGates { line: String },

    #[error("Couldn't parse the range-gate length from header line '{line}'")]
    InvalidRangeGateLength { line: String },

    #[error("Couldn't parse gate line '{line}' into {expected} numbers after the gate index")]
    InvalidGateLine { line: String, expected: usize },

    #[error("Gate lines have {expected} values, but {got} column formats were specified")]
    FormatMismatch { expected: usize, got: usize },

    #[error("A ray header and a gate line can't both have {0} tokens")]
    AmbiguousLineLength(usize),

    #[error(transparent)]
    Averaging(#[from] AveragingError),
}
