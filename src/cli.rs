use clap::Parser;
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Only show failures
    Quiet,
    /// Show the status line
    #[default]
    Normal,
    /// Show per-file progress
    Verbose,
    /// Show all available debugging information
    Debug,
}

/// Sort the columns and constraints of XML table definitions
#[derive(Parser, Debug, Clone)]
#[command(name = "order-xml-tables")]
#[command(
    about = "Sort column and constraint entries of XML table files and rewrite them to a destination folder"
)]
#[command(version)]
#[command(after_help = "EXAMPLES:\n  \
    order-xml-tables --src Core/Table --dst Core/TableOrdered --tag name\n  \
    order-xml-tables --config order-xml-tables.toml --verbose")]
pub struct Cli {
    /// Folder holding the table files to sort
    #[arg(long = "src", value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Folder receiving the sorted files (created if missing)
    #[arg(long = "dst", value_name = "DIR")]
    pub dst: Option<PathBuf>,

    /// Field name used as the sort key
    #[arg(long = "tag", value_name = "NAME")]
    pub tag: Option<String>,

    /// Author written into the header comment
    #[arg(long = "author", value_name = "NAME")]
    pub author: Option<String>,

    /// Leave dot-files in the source folder alone
    #[arg(long = "skip-hidden")]
    pub skip_hidden: bool,

    /// TOML settings file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long = "debug", conflicts_with = "quiet")]
    pub debug: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.debug {
            VerbosityLevel::Debug
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}
