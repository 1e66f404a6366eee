//! Status reporting
//!
//! One human-readable line on stdout per run, on success and on every
//! failure. Diagnostics go through `tracing` to stderr instead.

use crate::cli::VerbosityLevel;
use crate::error::Result;
use crate::runner::RunReport;

/// Formats and prints the final status line of a run
pub struct StatusReporter {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl StatusReporter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Reporter that never emits ANSI color codes
    pub fn plain(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    /// Status line for an outcome, `None` when the verbosity hides it
    pub fn format_outcome(&self, outcome: &Result<RunReport>) -> Option<String> {
        match outcome {
            Ok(report) => {
                if self.verbosity == VerbosityLevel::Quiet {
                    return None;
                }
                let mut line = format!(
                    "{} Look at \"{}\"",
                    self.colorize("Finished!", "32"),
                    report.destination.display()
                );
                if self.verbosity >= VerbosityLevel::Verbose {
                    let count = report.written.len();
                    line.push_str(&format!(
                        " ({} file{} written)",
                        count,
                        if count == 1 { "" } else { "s" }
                    ));
                }
                Some(line)
            }
            Err(error) => {
                let mut line = format!("{} {}", self.colorize("ERROR:", "31"), error);
                if self.verbosity == VerbosityLevel::Debug {
                    line.push_str(&format!(" [status {}]", error.status().code()));
                }
                Some(line)
            }
        }
    }

    pub fn report(&self, outcome: &Result<RunReport>) {
        if let Some(line) = self.format_outcome(outcome) {
            println!("{}", line);
        }
    }
}
