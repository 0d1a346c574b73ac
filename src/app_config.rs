use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::normalizer::TextNormalizer;

/// Application configuration module
/// This module handles loading, validating and saving the settings that
/// control parsing and reporting.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Strip bold/italic/underline tags and pipes from cue text
    #[serde(default = "default_true")]
    pub cleanup_text: bool,

    /// Report format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Extension used when scanning directories
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Report output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    // @returns: File extension for written reports
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Table => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_file_extension() -> String {
    "srt".to_string()
}

impl Config {
    /// Load configuration from a JSON file, writing defaults if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &config_json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let extension = self.file_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(anyhow!("File extension must not be empty"));
        }
        if extension.contains(['/', '\\']) {
            return Err(anyhow!("Invalid file extension: {}", self.file_extension));
        }
        Ok(())
    }

    /// Text normalizer matching this configuration
    pub fn normalizer(&self) -> TextNormalizer {
        TextNormalizer::new(self.cleanup_text)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            cleanup_text: default_true(),
            output_format: OutputFormat::default(),
            file_extension: default_file_extension(),
            log_level: LogLevel::default(),
        }
    }
}
