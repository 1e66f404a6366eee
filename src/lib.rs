//! # order-xml-tables Library
//!
//! Batch normalizer for XML table-definition files: the `column` and
//! `constraint` entries of every file in a source folder are sorted by a
//! chosen field, ignoring case, and the file is rewritten with a standard
//! header into a destination folder.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod file_discovery;
pub mod output;
pub mod runner;
pub mod table;
pub mod transformer;
pub mod writer;

pub use cli::{Cli, VerbosityLevel};
pub use config::{ConfigError, ConfigManager, Settings};
pub use document::{DEFAULT_AUTHOR, normalize, table_description};
pub use error::{OrderError, Result, RunStatus, XmlSyntaxError};
pub use file_discovery::FileDiscovery;
pub use output::StatusReporter;
pub use runner::{OrderXmlTables, RunReport};
pub use table::{COLUMN_TAG, CONSTRAINT_TAG, ElementGroup, Field, TableDocument, TableElement};
pub use transformer::TableTransformer;
