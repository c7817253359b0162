// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! printf-style number formatting. The instrument's readers parse columns by
//! position, so these must match C's `%w.pf` and `%w.pE` exactly; Rust's own
//! `{:E}` doesn't sign or pad the exponent.

/// How a single numeric column is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// e.g. `-0.1234`
    Fixed,
    /// e.g. `1.234560E-05`
    Scientific,
}

/// The printed width, precision and notation of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    pub width: usize,
    pub precision: usize,
    pub notation: Notation,
}

impl ColumnFormat {
    pub const fn fixed(width: usize, precision: usize) -> ColumnFormat {
        ColumnFormat {
            width,
            precision,
            notation: Notation::Fixed,
        }
    }

    pub const fn scientific(width: usize, precision: usize) -> ColumnFormat {
        ColumnFormat {
            width,
            precision,
            notation: Notation::Scientific,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self.notation {
            Notation::Fixed => fixed(value, self.width, self.precision),
            Notation::Scientific => scientific(value, self.width, self.precision),
        }
    }
}

/// `%{width}.{precision}f`
pub fn fixed(value: f64, width: usize, precision: usize) -> String {
    if value.is_nan() {
        format!("{:>width$}", "nan")
    } else {
        // `inf` and `-inf` are already printed the C way.
        format!("{value:>width$.precision$}")
    }
}

/// `%{width}.{precision}E`
pub fn scientific(value: f64, width: usize, precision: usize) -> String {
    if !value.is_finite() {
        let s = if value.is_nan() {
            "NAN"
        } else if value.is_sign_positive() {
            "INF"
        } else {
            "-INF"
        };
        return format!("{s:>width$}");
    }

    // Rust gives e.g. "1.234560E-5"; C wants "1.234560E-05".
    let rust = format!("{value:.precision$E}");
    let s = match rust.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or_default();
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}E{sign}{:02}", exponent.abs())
        }
        None => rust,
    };
    format!("{s:>width$}")
}
