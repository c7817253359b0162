// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The body of a ray file: ray header lines, each followed by that ray's gate
//! lines.

use std::fmt::Write;

use ndarray::prelude::*;

use super::{HplConfig, HplError};
use crate::{
    averaging::{downsample_blockwise, ColumnKind},
    formats::fixed_width::ColumnFormat,
};

/// What a body line is. Lines are told apart only by how many
/// whitespace-separated tokens they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    RayHeader,
    Gate,
    /// Blank lines and anything else unrecognised.
    Ignored,
}

pub fn classify_line(line: &str, ray_header_len: usize, gate_line_len: usize) -> LineKind {
    match line.split_whitespace().count() {
        n if n == ray_header_len => LineKind::RayHeader,
        n if n == gate_line_len => LineKind::Gate,
        _ => LineKind::Ignored,
    }
}

/// A single ray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ray<'a> {
    /// The ray's metadata line (decimal time, azimuth, elevation, pitch, roll).
    pub header: &'a str,

    /// The unparsed gate lines of this ray, in file order.
    pub gates: Vec<&'a str>,
}

/// Group body lines into rays. Gate lines belong to the most recent ray
/// header; gate lines before the first ray header, and lines that are neither
/// gates nor ray headers, are dropped.
pub fn tokenise_rays<'a>(body: &[&'a str], ray_header_len: usize, gate_line_len: usize) -> Vec<Ray<'a>> {
    let mut rays = vec![];
    let mut current: Option<Ray> = None;
    for &line in body {
        match classify_line(line, ray_header_len, gate_line_len) {
            LineKind::RayHeader => {
                if let Some(ray) = current.replace(Ray {
                    header: line,
                    gates: vec![],
                }) {
                    rays.push(ray);
                }
            }

            LineKind::Gate => {
                if let Some(ray) = current.as_mut() {
                    ray.gates.push(line);
                }
            }

            LineKind::Ignored => (),
        }
    }
    rays.extend(current);
    rays
}

/// One range gate's measurements, without its gate index.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRecord {
    /// Doppler velocity \[m/s\], intensity (SNR + 1) and backscatter
    /// \[m^-1 sr^-1\].
    pub values: Vec<f64>,
}

impl GateRecord {
    /// Parse a gate line. The leading gate index isn't trusted (or even
    /// parsed); the rest of the tokens must be numbers.
    pub fn parse(line: &str, num_values: usize) -> Result<GateRecord, HplError> {
        let values = line
            .split_whitespace()
            .skip(1)
            .map(|t| t.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .ok()
            .filter(|v| v.len() == num_values)
            .ok_or_else(|| HplError::InvalidGateLine {
                line: line.trim_end().to_string(),
                expected: num_values,
            })?;
        Ok(GateRecord { values })
    }
}

/// How output gate lines are printed: two spaces, the gate index
/// right-aligned in `index_width`, then each value preceded by a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLineFormat {
    pub index_width: usize,
    pub columns: Vec<ColumnFormat>,
}

impl Default for GateLineFormat {
    /// `  {index:>3} {velocity:7.4f} {intensity:9.6f} {backscatter:13.6E}`
    fn default() -> Self {
        Self {
            index_width: 3,
            columns: vec![
                ColumnFormat::fixed(7, 4),
                ColumnFormat::fixed(9, 6),
                ColumnFormat::scientific(13, 6),
            ],
        }
    }
}

impl GateLineFormat {
    pub fn format_line(&self, index: usize, values: ArrayView1<f64>, eol: &str) -> String {
        let values_width: usize = self.columns.iter().map(|c| c.width + 1).sum();
        let mut line = String::with_capacity(2 + self.index_width + values_width + eol.len());
        let _ = write!(line, "  {index:>width$}", width = self.index_width);
        for (column, &value) in self.columns.iter().zip(values) {
            line.push(' ');
            line.push_str(&column.format(value));
        }
        line.push_str(eol);
        line
    }
}

/// Truncate and downsample one ray's gate lines, then print them with fresh
/// gate indices starting from 0. Each line ends with `eol`.
pub fn rewrite_ray(gates: &[&str], config: &HplConfig, eol: &str) -> Result<Vec<String>, HplError> {
    let num_values = config.num_values();
    let gates = &gates[..gates.len().min(config.truncated_gates)];

    let mut data = Array2::zeros((gates.len(), num_values));
    for (&line, mut row) in gates.iter().zip(data.outer_iter_mut()) {
        let gate = GateRecord::parse(line, num_values)?;
        row.assign(&ArrayView1::from(&gate.values));
    }

    let column_kinds = vec![ColumnKind::Linear; num_values];
    let downsampled = downsample_blockwise(data.view(), config.downsample_factor, &column_kinds)?;
    Ok(downsampled
        .outer_iter()
        .enumerate()
        .map(|(i_gate, values)| config.gate_format.format_line(i_gate, values, eol))
        .collect())
}
