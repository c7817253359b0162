// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to handle writing out corrected files.

mod error;

pub use error::FileWriteError;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::trace;
use tempfile::NamedTempFile;

/// Where the corrected version of `source` goes. The directory structure
/// beneath `source_dir` is mirrored beneath `output_dir`; files outside of
/// `source_dir` go directly into `output_dir`.
pub(crate) fn destination_for(source: &Path, source_dir: &Path, output_dir: &Path) -> PathBuf {
    match source.strip_prefix(source_dir) {
        Ok(relative) => output_dir.join(relative),
        Err(_) => match source.file_name() {
            Some(name) => output_dir.join(name),
            None => output_dir.to_path_buf(),
        },
    }
}

/// Create `dir` (and its parents) if necessary.
fn create_dir(dir: &Path) -> Result<(), FileWriteError> {
    match std::fs::DirBuilder::new()
        .recursive(true)
        .create(dir)
        .map_err(|e| e.kind())
    {
        Ok(()) => Ok(()),
        Err(std::io::ErrorKind::PermissionDenied) => {
            Err(FileWriteError::NewDirectory(dir.to_path_buf()))
        }
        Err(e) => Err(FileWriteError::IO(e.into())),
    }
}

/// Test whether files can be written into `dir`, creating it if it doesn't
/// exist. Like all permission tests on directories, this is weak; an
/// unwritable directory may only be discovered when writing.
pub(crate) fn can_write_to_dir(dir: &Path) -> Result<(), FileWriteError> {
    trace!("Testing whether we can write to {}", dir.display());

    create_dir(dir)?;
    let metadata = std::fs::metadata(dir)?;
    if metadata.permissions().readonly() {
        return Err(FileWriteError::FileNotWritable {
            file: dir.display().to_string(),
        });
    }
    Ok(())
}

/// Write `contents` to `file`. The contents go into a temporary file next to
/// `file` first, which is then renamed; `file` either doesn't change or has
/// all of `contents`.
pub(crate) fn write_file_atomically(file: &Path, contents: &[u8]) -> Result<(), FileWriteError> {
    let parent = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    create_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(file).map_err(|e| FileWriteError::IO(e.error))?;
    trace!("Wrote {} bytes to {}", contents.len(), file.display());
    Ok(())
}

/// Copy `source` to `dest` verbatim, creating directories as needed.
pub(crate) fn copy_file(source: &Path, dest: &Path) -> Result<(), FileWriteError> {
    if let Some(parent) = dest.parent() {
        create_dir(parent)?;
    }
    std::fs::copy(source, dest)?;
    Ok(())
}
