use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Closed set of outcomes a batch run can end with.
///
/// The integer values returned by [`RunStatus::code`] are kept stable so that
/// scripts driving the binary can rely on the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    Success,
    SourceNotSet,
    DestinationNotSet,
    TagNotSet,
    CannotCreateDestination,
    SaveFailed,
    NoFiles,
    SourceMissing,
    ParseFailed,
    ReadFailed,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::SourceNotSet => 1,
            RunStatus::DestinationNotSet => 2,
            RunStatus::TagNotSet => 3,
            RunStatus::CannotCreateDestination => 4,
            RunStatus::SaveFailed => 5,
            RunStatus::NoFiles => 6,
            RunStatus::SourceMissing => 7,
            RunStatus::ParseFailed => 8,
            RunStatus::ReadFailed => 9,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Well-formedness failure reported by the XML reader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("at byte {position}: {details}")]
pub struct XmlSyntaxError {
    pub position: u64,
    pub details: String,
}

impl XmlSyntaxError {
    pub fn new(position: u64, details: impl Into<String>) -> Self {
        Self {
            position,
            details: details.into(),
        }
    }
}

/// Every way a batch run can stop early
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Source folder not set.")]
    SourceNotSet,

    #[error("Destination folder not set.")]
    DestinationNotSet,

    #[error("Tag name not set.")]
    TagNotSet,

    #[error("Source folder {path} does not exist.")]
    SourceMissing { path: PathBuf },

    #[error("Can't create folder {path}: {source}")]
    CannotCreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No files on folder {path}")]
    NoFiles { path: PathBuf },

    #[error("Can't save file {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't read file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {file} {source}")]
    ParseFailed {
        file: PathBuf,
        #[source]
        source: XmlSyntaxError,
    },
}

impl OrderError {
    pub fn status(&self) -> RunStatus {
        match self {
            OrderError::SourceNotSet => RunStatus::SourceNotSet,
            OrderError::DestinationNotSet => RunStatus::DestinationNotSet,
            OrderError::TagNotSet => RunStatus::TagNotSet,
            OrderError::SourceMissing { .. } => RunStatus::SourceMissing,
            OrderError::CannotCreateDestination { .. } => RunStatus::CannotCreateDestination,
            OrderError::NoFiles { .. } => RunStatus::NoFiles,
            OrderError::SaveFailed { .. } => RunStatus::SaveFailed,
            OrderError::ReadFailed { .. } => RunStatus::ReadFailed,
            OrderError::ParseFailed { .. } => RunStatus::ParseFailed,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OrderError>;
