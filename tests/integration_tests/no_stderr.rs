// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{dwl_reduce, get_cmd_output, hpl_file, write_file};

#[test]
fn test_vad_stare_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    write_file(&source.join("Stare_1.hpl"), &hpl_file(600, 2));
    // A broken file is reported in the log, not on stderr.
    write_file(&source.join("Stare_2.hpl"), "garbage\n");

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "--source-dir", &format!("{}", source.display()),
            "--output-dir", &format!("{}", output.display()),
            "--prefix", "Stare",
            "--no-progress-bars",
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "vad-stare failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_background_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    write_file(&source.join("Background_1.txt"), "1.0\n2.0\n3.0\n");

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "background",
            "--source-dir", &format!("{}", source.display()),
            "--output-dir", &format!("{}", output.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "background failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
