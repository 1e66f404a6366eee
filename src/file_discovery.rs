use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{OrderError, Result};

/// Lists the entries of a source folder in ascending name order
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    /// Skip entries whose name starts with a dot
    skip_hidden: bool,
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self { skip_hidden: false }
    }

    /// Set whether dot-files are left out of the listing
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Names of every entry directly inside `dir`, sorted by byte order.
    ///
    /// `fs::read_dir` does not yield `.` and `..`; `should_list` still drops
    /// them in case a platform does. Hidden names are dropped only when
    /// `skip_hidden` is set. An empty listing is `OrderError::NoFiles`.
    pub fn discover_entries(&self, dir: &Path) -> Result<Vec<OsString>> {
        let read_dir = fs::read_dir(dir).map_err(|source| OrderError::ReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| OrderError::ReadFailed {
                path: dir.to_path_buf(),
                source,
            })?;
            let name = entry.file_name();
            if self.should_list(&name) {
                entries.push(name);
            }
        }

        if entries.is_empty() {
            return Err(OrderError::NoFiles {
                path: dir.to_path_buf(),
            });
        }

        entries.sort();
        tracing::debug!(dir = %dir.display(), count = entries.len(), "listed source entries");
        Ok(entries)
    }

    pub fn should_list(&self, name: &OsString) -> bool {
        if name == "." || name == ".." {
            return false;
        }
        !(self.skip_hidden && name.to_string_lossy().starts_with('.'))
    }
}
