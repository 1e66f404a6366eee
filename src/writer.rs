use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OrderError, Result};

/// `<dst_dir>/<file_name>`, independent of a trailing separator on `dst_dir`
pub fn destination_path(dst_dir: &Path, file_name: &OsStr) -> PathBuf {
    dst_dir.join(file_name)
}

/// Write a regenerated document, replacing any existing file
pub fn save_document(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| OrderError::SaveFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "saved table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_destination_path_joins_once() {
        assert_eq!(
            destination_path(Path::new("/out"), OsStr::new("a.xml")),
            PathBuf::from("/out/a.xml")
        );
        assert_eq!(
            destination_path(Path::new("/out/"), OsStr::new("a.xml")),
            PathBuf::from("/out/a.xml")
        );
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.xml");
        save_document(&path, "old").unwrap();
        save_document(&path, "<table/>\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<table/>\n");
    }

    #[test]
    fn test_save_into_missing_folder_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("a.xml");
        let error = save_document(&path, "<table/>").unwrap_err();
        assert!(matches!(error, OrderError::SaveFailed { .. }));
        assert!(error.to_string().contains("a.xml"));
    }
}
