//! Catalog configuration loading from `.catalogrc.toml`.
//!
//! Configuration is optional. If no config file exists in the working
//! directory, the CLI uses built-in defaults, and command-line flags always
//! take precedence over anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "table"
//! color = true
//! compact = false
//! truncate = true
//!
//! [ingest]
//! line_numbers = "physical"
//! ```

use catalog_core::{IngestOptions, LineNumbering};
use serde::Deserialize;

use crate::output::OutputConfig;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".catalogrc.toml";

/// Root configuration structure loaded from `.catalogrc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Course file ingestion settings.
    #[serde(default)]
    pub ingest: IngestSettings,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json` or `csv`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Auto-detected from the TTY when unset.
    #[serde(default)]
    pub color: Option<bool>,

    /// Borderless tables and single-line JSON.
    #[serde(default)]
    pub compact: Option<bool>,

    /// Whether long table cells are cut to the terminal width. Only applies
    /// when stdout is a TTY.
    #[serde(default)]
    pub truncate: Option<bool>,
}

/// Ingestion preferences.
#[derive(Debug, Deserialize, Default)]
pub struct IngestSettings {
    /// How diagnostic line numbers are counted: `physical` counts every line
    /// of the file, `non-blank` skips blank lines.
    #[serde(default)]
    pub line_numbers: Option<LineNumbering>,
}

impl CatalogConfig {
    /// Load configuration from `.catalogrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Check if colored output should be used.
    ///
    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Apply the compact and truncate preferences to `output`.
    pub fn apply_output_settings(&self, mut output: OutputConfig) -> OutputConfig {
        if self.output.compact == Some(true) {
            output = output.compact();
        }
        if self.output.truncate == Some(false) {
            output = output.without_truncation();
        }
        output
    }

    /// Build ingestion options, letting `line_numbers` override the file.
    pub fn ingest_options(&self, line_numbers: Option<LineNumbering>) -> IngestOptions {
        let line_numbering = line_numbers
            .or(self.ingest.line_numbers)
            .unwrap_or_default();
        IngestOptions::default().with_line_numbering(line_numbering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert!(config.output.format.is_none());
        assert!(config.use_color().is_none());
        assert_eq!(
            config.ingest_options(None).line_numbering,
            LineNumbering::Physical
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[output]
format = "json"
color = false
compact = true
truncate = false

[ingest]
line_numbers = "non-blank"
"#;
        let config: CatalogConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
        let output = config.apply_output_settings(OutputConfig::new(OutputFormat::Json));
        assert!(output.compact);
        assert!(!output.should_truncate());
        assert_eq!(config.ingest.line_numbers, Some(LineNumbering::NonBlank));
        assert_eq!(
            config.ingest_options(None).line_numbering,
            LineNumbering::NonBlank
        );
    }

    #[test]
    fn test_flag_overrides_config() {
        let config: CatalogConfig = toml::from_str("[ingest]\nline_numbers = \"non-blank\"").unwrap();
        assert_eq!(
            config
                .ingest_options(Some(LineNumbering::Physical))
                .line_numbering,
            LineNumbering::Physical
        );
    }

    #[test]
    fn test_unknown_line_numbering_is_rejected() {
        let result: Result<CatalogConfig, _> = toml::from_str("[ingest]\nline_numbers = \"raw\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_and_invalid_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CatalogConfig::load(dir.path());
        assert!(config.default_format().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[output\nformat = ").unwrap();
        let config = CatalogConfig::load(dir.path());
        assert!(config.default_format().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[output]\nformat = \"csv\"\n").unwrap();
        let config = CatalogConfig::load(dir.path());
        assert_eq!(config.default_format(), Some("csv"));
    }
}
