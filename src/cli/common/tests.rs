// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against command-line interfaces that aren't big enough to go in their
//! own modules.

use std::{fs, num::NonZeroUsize};

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::{
    cli::{background::BackgroundArgs, processed::ProcessedArgs},
    formats::{BackgroundConfig, ProcessedConfig},
};

fn make_source_tree(root: &Path) {
    fs::create_dir_all(root.join("2025/07/01")).unwrap();
    fs::write(root.join("2025/07/01/Background_1.txt"), "1.0\n").unwrap();
    fs::write(root.join("2025/07/01/Processed_1.hpl"), "1\n1 2 3\n").unwrap();
    fs::write(root.join("Background_2.txt"), "1.0\n").unwrap();
}

#[test]
fn test_parse_reduction_defaults() {
    let r = parse_reduction(None, None, None, 3000, 500).unwrap();
    assert_eq!(r.truncated, 3000);
    assert_eq!(r.downsampled, 500);
    assert_eq!(r.factor.get(), 6);

    let r = parse_reduction(None, None, None, 2010, 335).unwrap();
    assert_eq!(r.factor.get(), 6);

    // Each value can be overridden without affecting the others.
    let r = parse_reduction(Some(1000), None, Some(4), 3000, 500).unwrap();
    assert_eq!(r.truncated, 1000);
    assert_eq!(r.downsampled, 500);
    assert_eq!(r.factor.get(), 4);

    let r = parse_reduction(None, Some(300), None, 3000, 500).unwrap();
    assert_eq!(r.factor.get(), 10);
}

#[test]
fn test_parse_reduction_errors() {
    assert!(matches!(
        parse_reduction(Some(0), None, None, 3000, 500),
        Err(ReductionArgsError::TruncateZero)
    ));
    assert!(matches!(
        parse_reduction(None, Some(0), None, 3000, 500),
        Err(ReductionArgsError::TargetZero)
    ));
    assert!(matches!(
        parse_reduction(None, None, Some(0), 3000, 500),
        Err(ReductionArgsError::FactorZero)
    ));
    assert!(matches!(
        parse_reduction(Some(100), Some(200), None, 3000, 500),
        Err(ReductionArgsError::TargetTooLarge {
            truncated: 100,
            downsampled: 200
        })
    ));
    assert!(matches!(
        parse_reduction(Some(10), Some(1), Some(11), 3000, 500),
        Err(ReductionArgsError::FactorTooLarge { truncated: 10, .. })
    ));
}

#[test]
fn test_batch_args_merge_prefers_cli() {
    let cli = BatchArgs {
        source_dir: Some("cli".into()),
        pattern: None,
        output_dir: None,
        copy_unchanged: false,
        num_threads: Some(2),
    };
    let file = BatchArgs {
        source_dir: Some("file".into()),
        pattern: Some("Back*.txt".to_string()),
        output_dir: Some("out".into()),
        copy_unchanged: true,
        num_threads: Some(8),
    };
    assert_eq!(
        cli.merge(file),
        BatchArgs {
            source_dir: Some("cli".into()),
            pattern: Some("Back*.txt".to_string()),
            output_dir: Some("out".into()),
            copy_unchanged: true,
            num_threads: Some(2),
        }
    );
}

#[test]
fn test_batch_args_parse() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    make_source_tree(&source);
    let output = tmp_dir.path().join("output");

    let params = BatchArgs {
        source_dir: Some(source.clone()),
        output_dir: Some(output.clone()),
        ..Default::default()
    }
    .parse(
        FamilyConfig::Background(BackgroundConfig::default()),
        "Back*.txt",
    )
    .unwrap();

    let source = source.canonicalize().unwrap();
    assert_eq!(params.source_dir, source);
    assert_eq!(
        params.files,
        vec![
            source.join("2025/07/01/Background_1.txt"),
            source.join("Background_2.txt"),
        ]
    );
    assert!(params.output_dir.ends_with("output"));
    assert!(params.num_threads.is_none());
    // Parsing doesn't make the output directory.
    assert!(!output.exists());
}

#[test]
fn test_batch_args_parse_ignores_previous_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    make_source_tree(&source);
    let output = source.join("reduced");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("Background_2.txt"), "1.000000\n").unwrap();

    let params = BatchArgs {
        source_dir: Some(source.clone()),
        output_dir: Some(output),
        ..Default::default()
    }
    .parse(
        FamilyConfig::Background(BackgroundConfig::default()),
        "Back*.txt",
    )
    .unwrap();
    assert_eq!(params.files.len(), 2);
    assert!(params.files.iter().all(|f| !f.starts_with(&params.output_dir)));
}

#[test]
fn test_batch_args_parse_errors() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    make_source_tree(&source);
    let family = FamilyConfig::Background(BackgroundConfig::default());

    let result = BatchArgs {
        output_dir: Some(tmp_dir.path().join("output")),
        ..Default::default()
    }
    .parse(family.clone(), "Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));

    let result = BatchArgs {
        source_dir: Some(source.clone()),
        ..Default::default()
    }
    .parse(family.clone(), "Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));

    let result = BatchArgs {
        source_dir: Some(tmp_dir.path().join("doesn't exist")),
        output_dir: Some(tmp_dir.path().join("output")),
        ..Default::default()
    }
    .parse(family.clone(), "Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));

    // The same directory, spelled differently.
    let result = BatchArgs {
        source_dir: Some(source.clone()),
        output_dir: Some(source.join("2025/..")),
        ..Default::default()
    }
    .parse(family.clone(), "Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));

    let result = BatchArgs {
        source_dir: Some(source.clone()),
        output_dir: Some(tmp_dir.path().join("output")),
        num_threads: Some(0),
        ..Default::default()
    }
    .parse(family.clone(), "Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));

    let result = BatchArgs {
        source_dir: Some(source),
        output_dir: Some(tmp_dir.path().join("output")),
        ..Default::default()
    }
    .parse(family, "2025/Back*.txt");
    assert!(matches!(result, Err(DwlReduceError::Batch(_))));
}

#[test]
fn test_background_args_from_cli() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    make_source_tree(&source);
    let source_str = source.display().to_string();
    let output_str = tmp_dir.path().join("output").display().to_string();

    #[rustfmt::skip]
    let args = BackgroundArgs::parse_from([
        "background",
        "--source-dir", &source_str,
        "--output-dir", &output_str,
        "--truncate", "1200",
        "--num-threads", "3",
    ]);
    let params = args.parse().unwrap();
    assert_eq!(
        params.family,
        FamilyConfig::Background(BackgroundConfig {
            truncated_rows: 1200,
            downsample_factor: NonZeroUsize::new(2).unwrap(),
        })
    );
    assert_eq!(params.files.len(), 2);
    assert_eq!(params.num_threads, NonZeroUsize::new(3));
}

#[test]
fn test_processed_args_from_toml_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let source = tmp_dir.path().join("source");
    make_source_tree(&source);
    let output = tmp_dir.path().join("output");

    let arg_file = tmp_dir.path().join("args.toml");
    fs::write(
        &arg_file,
        format!(
            "source_dir = {:?}\noutput_dir = {:?}\ntarget = 100\ndownsample_factor = 20\n",
            source.display().to_string(),
            output.display().to_string()
        ),
    )
    .unwrap();

    // The CLI overrides the file.
    let arg_file_str = arg_file.display().to_string();
    let args = ProcessedArgs::parse_from(["processed", &arg_file_str, "--target", "50"])
        .merge()
        .unwrap();
    assert_eq!(args.target, Some(50));
    assert_eq!(args.downsample_factor, Some(20));
    assert!(args.args_file.is_none());

    let params = args.parse().unwrap();
    assert_eq!(
        params.family,
        FamilyConfig::Processed(ProcessedConfig {
            truncated_rows: 2010,
            downsampled_rows: 50,
            downsample_factor: NonZeroUsize::new(20).unwrap(),
        })
    );
    assert_eq!(
        params.files,
        vec![source
            .canonicalize()
            .unwrap()
            .join("2025/07/01/Processed_1.hpl")]
    );
}

#[test]
fn test_arg_file_with_unknown_extension() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("args.yaml");
    fs::write(&arg_file, "target: 100\n").unwrap();

    let result = BackgroundArgs {
        args_file: Some(arg_file),
        ..Default::default()
    }
    .merge();
    assert!(matches!(result, Err(DwlReduceError::ArgFile(_))));
}

#[test]
fn test_bad_json_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let arg_file = tmp_dir.path().join("args.json");
    fs::write(&arg_file, r#"{"target": "lots"}"#).unwrap();

    let result = BackgroundArgs {
        args_file: Some(arg_file),
        ..Default::default()
    }
    .merge();
    assert!(matches!(result, Err(DwlReduceError::ArgFile(_))));
}
