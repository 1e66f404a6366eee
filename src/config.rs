use crate::cli::Cli;
use crate::runner::OrderXmlTables;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Run settings, as read from a settings file and the command line.
///
/// Missing values stay `None` so the preflight check can report them.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Source folder
    pub src: Option<PathBuf>,
    /// Destination folder
    pub dst: Option<PathBuf>,
    /// Sort key field name
    pub tag: Option<String>,
    /// Header comment author
    pub author: Option<String>,
    /// Leave dot-files out of the listing
    pub skip_hidden: bool,
}

impl Settings {
    /// Configured runner for these settings
    pub fn to_runner(&self) -> OrderXmlTables {
        let mut runner = OrderXmlTables::new();
        if let Some(src) = &self.src {
            runner.set_folder_src_path(src);
        }
        if let Some(dst) = &self.dst {
            runner.set_folder_dst_path(dst);
        }
        if let Some(tag) = &self.tag {
            runner.set_tag_name(tag);
        }
        if let Some(author) = &self.author {
            runner.set_author(author);
        }
        runner.set_skip_hidden(self.skip_hidden);
        runner
    }
}

/// Configuration manager for loading and merging settings
pub struct ConfigManager;

impl ConfigManager {
    /// Load settings with precedence: file -> CLI
    pub fn load_settings(cli: &Cli) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(config_path) = &cli.config {
            let file_settings = Self::load_from_file(config_path)?;
            settings = Self::merge_settings(settings, file_settings);
        }

        settings = Self::merge_with_cli(settings, cli);
        Self::validate_settings(&settings)?;

        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Settings> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Merge two settings (second takes precedence for set values)
    pub fn merge_settings(mut base: Settings, override_settings: Settings) -> Settings {
        if override_settings.src.is_some() {
            base.src = override_settings.src;
        }
        if override_settings.dst.is_some() {
            base.dst = override_settings.dst;
        }
        if override_settings.tag.is_some() {
            base.tag = override_settings.tag;
        }
        if override_settings.author.is_some() {
            base.author = override_settings.author;
        }
        base.skip_hidden |= override_settings.skip_hidden;

        base
    }

    /// Merge CLI arguments with settings (CLI takes precedence)
    pub fn merge_with_cli(mut settings: Settings, cli: &Cli) -> Settings {
        if let Some(src) = &cli.src {
            settings.src = Some(src.clone());
        }
        if let Some(dst) = &cli.dst {
            settings.dst = Some(dst.clone());
        }
        if let Some(tag) = &cli.tag {
            settings.tag = Some(tag.clone());
        }
        if let Some(author) = &cli.author {
            settings.author = Some(author.clone());
        }
        settings.skip_hidden |= cli.skip_hidden;

        settings
    }

    /// Reject values that cannot be written into the generated header
    pub fn validate_settings(settings: &Settings) -> Result<()> {
        if let Some(author) = &settings.author {
            if author.contains("--") {
                return Err(ConfigError::Validation(
                    "Author must not contain \"--\"".to_string(),
                ));
            }
            if author.contains('\n') || author.contains('\r') {
                return Err(ConfigError::Validation(
                    "Author must fit on one line".to_string(),
                ));
            }
        }

        Ok(())
    }
}
