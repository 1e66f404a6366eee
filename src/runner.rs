//! Batch driver
//!
//! [`OrderXmlTables`] holds the run settings and processes a whole source
//! folder: preflight checks, listing, then transform and save per file in
//! ascending name order. The first failure ends the batch; files written
//! before it stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::VerbosityLevel;
use crate::document::DEFAULT_AUTHOR;
use crate::error::{OrderError, Result, RunStatus};
use crate::file_discovery::FileDiscovery;
use crate::output::StatusReporter;
use crate::transformer::TableTransformer;
use crate::writer;

/// What a successful batch produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub destination: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Settings that passed the preflight check
#[derive(Debug)]
struct Preflight<'a> {
    src: &'a Path,
    dst: &'a Path,
    tag_name: &'a str,
}

/// Sorts every table file of a folder into another folder
#[derive(Debug, Clone, Default)]
pub struct OrderXmlTables {
    folder_src_path: Option<PathBuf>,
    folder_dst_path: Option<PathBuf>,
    tag_name: Option<String>,
    author: Option<String>,
    skip_hidden: bool,
}

impl OrderXmlTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_folder_src_path(&mut self, path: impl Into<PathBuf>) {
        self.folder_src_path = Some(path.into());
    }

    pub fn set_folder_dst_path(&mut self, path: impl Into<PathBuf>) {
        self.folder_dst_path = Some(path.into());
    }

    pub fn set_tag_name(&mut self, tag_name: impl Into<String>) {
        self.tag_name = Some(tag_name.into());
    }

    /// Override the author named in generated headers
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = Some(author.into());
    }

    pub fn set_skip_hidden(&mut self, skip: bool) {
        self.skip_hidden = skip;
    }

    /// Validate settings and prepare the destination folder.
    ///
    /// Checks run in a fixed order and stop at the first failure. Only the
    /// last one touches the filesystem, creating a single missing level.
    fn check(&self) -> Result<Preflight<'_>> {
        let src = self
            .folder_src_path
            .as_deref()
            .ok_or(OrderError::SourceNotSet)?;
        let dst = self
            .folder_dst_path
            .as_deref()
            .ok_or(OrderError::DestinationNotSet)?;
        let tag_name = self.tag_name.as_deref().ok_or(OrderError::TagNotSet)?;

        if !src.is_dir() {
            return Err(OrderError::SourceMissing {
                path: src.to_path_buf(),
            });
        }

        if !dst.is_dir() {
            match fs::create_dir(dst) {
                Ok(()) => tracing::info!(path = %dst.display(), "created destination folder"),
                // lost a race against another creator
                Err(_) if dst.is_dir() => {}
                Err(source) => {
                    return Err(OrderError::CannotCreateDestination {
                        path: dst.to_path_buf(),
                        source,
                    });
                }
            }
        }

        Ok(Preflight { src, dst, tag_name })
    }

    /// Process the whole batch and describe what was written
    pub fn run_report(&self) -> Result<RunReport> {
        let preflight = self.check()?;
        let files = FileDiscovery::new()
            .with_skip_hidden(self.skip_hidden)
            .discover_entries(preflight.src)?;

        let transformer = TableTransformer::new(preflight.tag_name)
            .with_author(self.author.as_deref().unwrap_or(DEFAULT_AUTHOR));

        let mut written = Vec::with_capacity(files.len());
        for file_name in &files {
            let src_path = preflight.src.join(file_name);
            tracing::debug!(path = %src_path.display(), "processing table");

            let source =
                fs::read_to_string(&src_path).map_err(|source| OrderError::ReadFailed {
                    path: src_path.clone(),
                    source,
                })?;

            let name = file_name.to_string_lossy();
            let normalized = transformer.transform(&name, &source).map_err(|source| {
                OrderError::ParseFailed {
                    file: src_path.clone(),
                    source,
                }
            })?;

            let dst_path = writer::destination_path(preflight.dst, file_name);
            writer::save_document(&dst_path, &normalized)?;
            written.push(dst_path);
        }

        Ok(RunReport {
            destination: preflight.dst.to_path_buf(),
            written,
        })
    }

    /// Run the batch, print its status line and return the outcome
    pub fn run(&self) -> RunStatus {
        self.run_with(&StatusReporter::new(VerbosityLevel::Normal))
    }

    pub fn run_with(&self, reporter: &StatusReporter) -> RunStatus {
        let outcome = self.run_report();
        reporter.report(&outcome);
        match &outcome {
            Ok(_) => RunStatus::Success,
            Err(error) => error.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn configured(src: &Path, dst: &Path) -> OrderXmlTables {
        let mut runner = OrderXmlTables::new();
        runner.set_folder_src_path(src);
        runner.set_folder_dst_path(dst);
        runner.set_tag_name("name");
        runner
    }

    #[test]
    fn test_check_order_of_unset_settings() {
        let mut runner = OrderXmlTables::new();
        assert!(matches!(runner.check(), Err(OrderError::SourceNotSet)));

        runner.set_folder_dst_path("out");
        runner.set_tag_name("name");
        assert!(matches!(runner.check(), Err(OrderError::SourceNotSet)));

        let mut runner = OrderXmlTables::new();
        runner.set_folder_src_path("in");
        runner.set_tag_name("name");
        assert!(matches!(runner.check(), Err(OrderError::DestinationNotSet)));

        let mut runner = OrderXmlTables::new();
        runner.set_folder_src_path("in");
        runner.set_folder_dst_path("out");
        assert!(matches!(runner.check(), Err(OrderError::TagNotSet)));
    }

    #[test]
    fn test_missing_source_leaves_destination_alone() {
        let temp_dir = TempDir::new().unwrap();
        let dst = temp_dir.path().join("out");
        let runner = configured(&temp_dir.path().join("absent"), &dst);

        assert!(matches!(
            runner.check(),
            Err(OrderError::SourceMissing { .. })
        ));
        assert!(!dst.exists());
    }

    #[test]
    fn test_destination_created_single_level() {
        let temp_dir = TempDir::new().unwrap();
        let runner = configured(temp_dir.path(), &temp_dir.path().join("out"));
        assert!(runner.check().is_ok());
        assert!(temp_dir.path().join("out").is_dir());

        let nested = temp_dir.path().join("a").join("b");
        let runner = configured(temp_dir.path(), &nested);
        assert!(matches!(
            runner.check(),
            Err(OrderError::CannotCreateDestination { .. })
        ));
        assert!(!temp_dir.path().join("a").exists());
    }

    #[test]
    fn test_destination_that_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("out");
        fs::write(&blocker, "not a folder").unwrap();
        let runner = configured(temp_dir.path(), &blocker);
        assert!(matches!(
            runner.check(),
            Err(OrderError::CannotCreateDestination { .. })
        ));
    }

    #[test]
    fn test_run_report_lists_written_files() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in");
        let dst = temp_dir.path().join("out");
        fs::create_dir(&src).unwrap();
        fs::write(
            src.join("b.xml"),
            "<table><column><name>y</name></column><column><name>X</name></column></table>",
        )
        .unwrap();
        fs::write(src.join("a.xml"), "<table/>").unwrap();

        let report = configured(&src, &dst).run_report().unwrap();
        assert_eq!(report.destination, dst);
        assert_eq!(report.written, vec![dst.join("a.xml"), dst.join("b.xml")]);

        let sorted = fs::read_to_string(dst.join("b.xml")).unwrap();
        assert!(sorted.find("<name>X</name>").unwrap() < sorted.find("<name>y</name>").unwrap());
    }

    #[test]
    fn test_run_stops_at_first_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in");
        let dst = temp_dir.path().join("out");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.xml"), "<table/>").unwrap();
        fs::write(src.join("b.xml"), "<table><column>").unwrap();
        fs::write(src.join("c.xml"), "<table/>").unwrap();

        let runner = configured(&src, &dst);
        let status = runner.run_with(&StatusReporter::plain(VerbosityLevel::Quiet));
        assert_eq!(status, RunStatus::ParseFailed);
        assert!(dst.join("a.xml").exists());
        assert!(!dst.join("b.xml").exists());
        assert!(!dst.join("c.xml").exists());
    }

    #[test]
    fn test_run_double_hyphen_file_name_is_parse_failure() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in");
        let dst = temp_dir.path().join("out");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a--b.xml"), "<table/>").unwrap();

        let runner = configured(&src, &dst);
        let status = runner.run_with(&StatusReporter::plain(VerbosityLevel::Quiet));
        assert_eq!(status, RunStatus::ParseFailed);
        assert!(!dst.join("a--b.xml").exists());
    }

    #[test]
    fn test_run_subfolder_entry_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("in");
        fs::create_dir_all(src.join("nested")).unwrap();

        let runner = configured(&src, &temp_dir.path().join("out"));
        let status = runner.run_with(&StatusReporter::plain(VerbosityLevel::Quiet));
        assert_eq!(status, RunStatus::ReadFailed);
    }
}
