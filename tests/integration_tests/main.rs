// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod no_stderr;
mod rect;
mod vad_stare;

use std::{fs, path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn dwl_reduce() -> Command {
    Command::cargo_bin("dwl-reduce").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// A VAD/Stare file with `num_rays` rays of `num_gates` gates each. Every
/// gate of a ray has the same values, so averages are easy to predict.
fn hpl_file(num_gates: usize, num_rays: usize) -> String {
    let mut s = format!(
        "Filename:\tStare_34_20250701_17\nSystem ID:\t34\nNumber of gates:\t{num_gates}\nRange gate length (m):\t3.0\nGate length (pts):\t10\nPulses/ray:\t10000\nNo. of rays in file:\t{num_rays}\nScan type:\tStare\n****\n"
    );
    for i_ray in 0..num_rays {
        s.push_str(&format!("17.{i_ray:06} 0.00 90.00 -0.30 0.10\n"));
        for i in 0..num_gates {
            s.push_str(&format!("{i:>3} -0.1234  1.012345  1.234560E-06\n"));
        }
    }
    s
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
