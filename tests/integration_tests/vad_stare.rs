// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;

use tempfile::TempDir;

use crate::{dwl_reduce, get_cmd_output, hpl_file, write_file};

#[test]
fn test_vad_stare_corrects_and_skips() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    write_file(&source.join("20250701/Stare_34_20250701_17.hpl"), &hpl_file(600, 2));
    write_file(&source.join("20250701/Stare_34_20250701_18.hpl"), &hpl_file(200, 1));
    write_file(&source.join("20250701/Wind_Profile_34_20250701_17.hpl"), &hpl_file(600, 1));

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "Stare",
        ])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("1 corrected, 1 unchanged, 0 failed"), "{stdout}");
    assert!(stdout.contains("File has 200 gates"), "{stdout}");

    let corrected =
        fs::read_to_string(output.join("20250701/Stare_34_20250701_17.hpl")).unwrap();
    let lines: Vec<&str> = corrected.lines().collect();
    assert_eq!(lines[2], "Number of gates:\t500");
    assert_eq!(lines[3], "Range gate length (m):\t3");
    assert_eq!(lines[8], "****");
    assert_eq!(lines[9], "17.000000 0.00 90.00 -0.30 0.10");
    // 600 gates, averaged 6 at a time.
    assert_eq!(lines[10], "    0 -0.1234  1.012345  1.234560E-06");
    assert_eq!(lines[109], "   99 -0.1234  1.012345  1.234560E-06");
    assert_eq!(lines[110], "17.000001 0.00 90.00 -0.30 0.10");
    assert_eq!(lines.len(), 9 + 2 * (1 + 100));

    // Skipped files aren't written, and other prefixes aren't touched.
    assert!(!output.join("20250701/Stare_34_20250701_18.hpl").exists());
    assert!(!output.join("20250701/Wind_Profile_34_20250701_17.hpl").exists());
}

#[test]
fn test_vad_stare_copy_unchanged_via_alias() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    let small = hpl_file(200, 1).replace('\n', "\r\n");
    write_file(&source.join("User1_34_20250701_17.hpl"), &small);

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "hpl",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "User1",
            "--copy-unchanged",
        ])
        .ok();
    assert!(cmd.is_ok(), "hpl failed: {}", cmd.err().unwrap());
    assert_eq!(
        fs::read(output.join("User1_34_20250701_17.hpl")).unwrap(),
        small.as_bytes()
    );
}

#[test]
fn test_vad_stare_keeps_crlf_line_endings() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    let big = hpl_file(600, 2).replace('\n', "\r\n");
    write_file(&source.join("Stare_34_20250701_17.hpl"), &big);

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "Stare",
        ])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());

    let corrected = fs::read_to_string(output.join("Stare_34_20250701_17.hpl")).unwrap();
    let lines: Vec<&str> = corrected.split_inclusive('\n').collect();
    assert_eq!(lines.len(), 9 + 2 * (1 + 100));
    assert!(lines.iter().all(|l| l.ends_with("\r\n")));
    assert_eq!(lines[2], "Number of gates:\t500\r\n");
    assert_eq!(lines[9], "17.000000 0.00 90.00 -0.30 0.10\r\n");
}

#[test]
fn test_vad_stare_bad_file_doesnt_stop_the_batch() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    write_file(&source.join("Stare_1.hpl"), &hpl_file(600, 1));
    write_file(
        &source.join("Stare_2.hpl"),
        "Number of gates:\tlots\n****\n",
    );
    write_file(&source.join("Stare_3.hpl"), &hpl_file(300, 1));

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "Stare",
        ])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("2 corrected, 0 unchanged, 1 failed"), "{stdout}");
    assert!(stdout.contains("Stare_2.hpl"), "{stdout}");
    assert!(output.join("Stare_1.hpl").exists());
    assert!(!output.join("Stare_2.hpl").exists());
    assert!(output.join("Stare_3.hpl").exists());
}

#[test]
fn test_vad_stare_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    write_file(&source.join("Stare_1.hpl"), &hpl_file(600, 1));

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "Stare",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Found 1 files"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_vad_stare_without_prefix_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    write_file(&source.join("Stare_1.hpl"), &hpl_file(600, 1));

    // stdin isn't a terminal, so there's no prompt.
    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", tmp_dir.path().join("output").display()),
        ])
        .write_stdin("")
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("prefix"), "{stderr}");
}

#[test]
fn test_vad_stare_save_toml_and_reuse() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    let output = tmp_dir.path().join("output");
    let toml = tmp_dir.path().join("args.toml");
    write_file(&source.join("Stare_1.hpl"), &hpl_file(600, 1));

    #[rustfmt::skip]
    let cmd = dwl_reduce()
        .args([
            "vad-stare",
            "-s", &format!("{}", source.display()),
            "-o", &format!("{}", output.display()),
            "--prefix", "Stare",
            "--target", "200",
            "--save-toml", &format!("{}", toml.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());
    let saved = fs::read_to_string(&toml).unwrap();
    assert!(saved.contains("prefix = \"Stare\""), "{saved}");
    assert!(saved.contains("target = 200"), "{saved}");

    let cmd = dwl_reduce()
        .args(["vad-stare", &format!("{}", toml.display())])
        .ok();
    assert!(cmd.is_ok(), "vad-stare failed: {}", cmd.err().unwrap());
    let corrected = fs::read_to_string(output.join("Stare_1.hpl")).unwrap();
    assert!(corrected.contains("Number of gates:\t200\n"));
    // 3000 / 200 = 15 gates averaged at a time.
    assert_eq!(corrected.lines().count(), 9 + 1 + 40);
}
