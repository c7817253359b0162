// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem.
pub(crate) fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    Ok(entries)
}

/// Find all files whose names match `file_pattern` anywhere beneath `root`
/// (including `root` itself). `root` is matched literally, even if it contains
/// glob metacharacters. Directories are never returned. The results are
/// sorted.
pub(crate) fn find_files_recursively(
    root: &Path,
    file_pattern: &str,
) -> Result<Vec<PathBuf>, GlobError> {
    if file_pattern.contains('/') || file_pattern.contains(std::path::MAIN_SEPARATOR) {
        return Err(GlobError::PatternHasSeparator {
            pattern: file_pattern.to_string(),
        });
    }

    let root = root.to_str().ok_or_else(|| GlobError::NonUtf8Root {
        root: root.to_path_buf(),
    })?;
    let g = format!(
        "{}/**/{file_pattern}",
        Pattern::escape(root.trim_end_matches('/'))
    );
    let mut entries = get_all_matches_from_glob(&g)?;
    entries.retain(|e| e.is_file());
    entries.sort();
    Ok(entries)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error("The file pattern '{pattern}' must be a file-name pattern, not a path")]
    PatternHasSeparator { pattern: String },

    #[error("The directory '{}' isn't valid UTF-8 and can't be searched", root.display())]
    NonUtf8Root { root: PathBuf },

    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}
