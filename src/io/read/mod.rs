// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read lidar text files.

use std::path::Path;

use log::trace;

/// Read a whole text file. Lidar files occasionally contain bytes that aren't
/// valid UTF-8; these become U+FFFD rather than failing the read.
pub(crate) fn read_text_lossy(path: &Path) -> Result<String, std::io::Error> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            trace!("'{}' contains invalid UTF-8", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
