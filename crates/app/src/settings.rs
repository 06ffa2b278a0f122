//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `EQUALIZER__*` environment variables
//! (e.g. `EQUALIZER__APP__LEVEL=debug`).
use std::path::Path;

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Output format of the settlement report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Csv,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Report {
    pub format: Format,
    /// Print the generation time in text reports.
    pub timestamp: bool,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub report: Report,
}

impl Settings {
    /// Load settings. `path` must exist when given; otherwise `settings.toml`
    /// in the working directory is used if present.
    pub fn new(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("settings").required(false),
        };

        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("report.format", "text")?
            .set_default("report.timestamp", false)?
            .add_source(file)
            .add_source(Environment::with_prefix("EQUALIZER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
