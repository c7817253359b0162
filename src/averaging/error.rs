// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AveragingError {
    /// Callers only ever hand over whole blocks, so this indicates a bug.
    #[error("Attempted to average an empty block; this is a bug")]
    EmptyBlock,

    #[error("Got {got} columns to average, but {expected} column kinds were specified")]
    ColumnMismatch { expected: usize, got: usize },
}
