// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests on background and processed wind-profile files.

use std::fs;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{dwl_reduce, get_cmd_output, write_file};

#[test]
fn test_background() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    let contents: String = (0..3005).map(|i| format!("{}.5\n", i % 12)).collect();
    write_file(&source.join("2025/Background_070125-170000.txt"), &contents);

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "background",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "background failed: {}", cmd.err().unwrap());

    let corrected =
        fs::read_to_string(output.join("2025/Background_070125-170000.txt")).unwrap();
    let lines: Vec<&str> = corrected.lines().collect();
    assert_eq!(lines.len(), 500);
    // Blocks of 6 alternate between 0.5..5.5 and 6.5..11.5.
    assert_eq!(lines[0], "3.000000");
    assert_eq!(lines[1], "9.000000");
    assert_eq!(lines[499], "9.000000");
}

#[test]
fn test_processed() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    let mut contents = String::from("2010\n");
    for i in 0..2010 {
        // Directions straddle north.
        let direction = if i % 2 == 0 { 350.0 } else { 20.0 };
        contents.push_str(&format!("{} {direction} 5.0\n", 10 * i));
    }
    write_file(&source.join("Processed_Wind_Profile_34.hpl"), &contents);

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "processed",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "processed failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("1 corrected, 0 unchanged, 0 failed"), "{stdout}");

    let corrected = fs::read_to_string(output.join("Processed_Wind_Profile_34.hpl")).unwrap();
    let lines: Vec<&str> = corrected.lines().collect();
    assert_eq!(lines[0], "335");
    assert_eq!(lines.len(), 1 + 335);
    let first: Vec<f64> = lines[1]
        .split_whitespace()
        .map(|t| t.parse().unwrap())
        .collect();
    assert_abs_diff_eq!(first[0], 25.0);
    // The mean of 350° and 20° is 5°, not 185°.
    assert_abs_diff_eq!(first[1], 5.0, epsilon = 1e-3);
    assert_abs_diff_eq!(first[2], 5.0);
}

#[test]
fn test_same_source_and_output_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    write_file(&source.join("Background_1.txt"), "1.0\n");

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "background",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", source.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("can't be the source directory"), "{stderr}");
    assert_eq!(fs::read_to_string(source.join("Background_1.txt")).unwrap(), "1.0\n");
}
