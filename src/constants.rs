// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

The defaults here describe the Halo Photonics Doppler wind lidar files that
`dwl-reduce` was written for. All of them can be overridden at run time.
 */

// Background ("Back*.txt") files.

/// The default file-name pattern for background files.
pub const DEFAULT_BACKGROUND_PATTERN: &str = "Back*.txt";

/// Background files are truncated to this many rows before downsampling.
pub const DEFAULT_BACKGROUND_TRUNCATED_ROWS: usize = 3000;

/// The number of rows in a downsampled background file.
pub const DEFAULT_BACKGROUND_DOWNSAMPLED_ROWS: usize = 500;

// Processed wind-profile ("Proce*.hpl") files.

/// The default file-name pattern for processed wind-profile files.
pub const DEFAULT_PROCESSED_PATTERN: &str = "Proce*.hpl";

/// Processed wind-profile files are truncated to this many rows before
/// downsampling.
pub const DEFAULT_PROCESSED_TRUNCATED_ROWS: usize = 2010;

/// The number of rows in a downsampled processed wind-profile file.
pub const DEFAULT_PROCESSED_DOWNSAMPLED_ROWS: usize = 335;

// VAD and Stare ray files.

/// Files declaring this many gates (or fewer) are already at the target
/// resolution and are left alone.
pub const DEFAULT_EXPECTED_NUM_GATES: usize = 201;

/// Each ray is truncated to this many gates before downsampling.
pub const DEFAULT_TRUNCATED_GATES: usize = 3000;

/// The number of gates written into a corrected file's header.
pub const DEFAULT_DOWNSAMPLED_GATES: usize = 500;

/// A body line with this many whitespace-separated tokens is a ray header
/// (decimal time, azimuth, elevation, pitch, roll).
pub const RAY_HEADER_LEN: usize = 5;

/// A body line with this many whitespace-separated tokens is a gate (gate
/// index, Doppler velocity, intensity, backscatter).
pub const GATE_LINE_LEN: usize = 4;

/// The line separating the header of a ray file from its body.
pub const HEADER_BOUNDARY: &str = "****";

/// The label of the header line declaring the number of gates per ray.
pub const NUM_GATES_LABEL: &str = "Number of gates:";

/// The label of the header line declaring the range-gate length.
pub const RANGE_GATE_LENGTH_LABEL: &str = "Range gate length (m):";
