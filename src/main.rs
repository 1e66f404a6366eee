use std::process::ExitCode;

use anyhow::Context;
use tracing::Level;

use order_xml_tables::{Cli, ConfigManager, StatusReporter, VerbosityLevel};

fn init_tracing(verbosity: VerbosityLevel) {
    let level = match verbosity {
        VerbosityLevel::Quiet => Level::ERROR,
        VerbosityLevel::Normal => Level::WARN,
        VerbosityLevel::Verbose => Level::INFO,
        VerbosityLevel::Debug => Level::DEBUG,
    };

    // stdout carries the status line, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_args();
    let verbosity = cli.verbosity();
    init_tracing(verbosity);

    let settings = ConfigManager::load_settings(&cli).context("Failed to load settings")?;
    let status = settings
        .to_runner()
        .run_with(&StatusReporter::new(verbosity));

    Ok(status.exit_code())
}
