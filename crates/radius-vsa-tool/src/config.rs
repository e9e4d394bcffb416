use radius_vsa::{Dictionary, DictionaryError, ValidationMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level: "trace", "debug", "info", "warn", "error", "off" (default: "warn")
    #[serde(default)]
    pub log_level: Option<String>,

    /// Extra FreeRADIUS dictionary files, loaded in order after the
    /// built-in vendor tables
    #[serde(default)]
    pub dictionaries: Vec<String>,

    /// Load the vendor tables compiled into the tool (default: true)
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Strict validation of decoded attributes (default: true)
    /// When enabled, unknown vendors, unknown sub-types and unlisted
    /// enumeration values are reported as problems.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_include_builtin() -> bool {
    true
}

fn default_strict() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: None,
            dictionaries: vec![],
            include_builtin: default_include_builtin(),
            strict: default_strict(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::Invalid(format!("Invalid log level: {}", level)));
            }
        }

        if self.dictionaries.iter().any(|path| path.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "Dictionary path cannot be empty".to_string(),
            ));
        }

        if !self.include_builtin && self.dictionaries.is_empty() {
            return Err(ConfigError::Invalid(
                "No dictionaries: include_builtin is false and no files are listed".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective log level
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }

    /// Build the dictionary registry this configuration describes
    pub fn load_dictionary(&self) -> Result<Dictionary, ConfigError> {
        let mut dictionary = if self.include_builtin {
            Dictionary::builtin()?
        } else {
            Dictionary::new()
        };
        debug!(vendors = dictionary.len(), "Built-in vendor tables ready");

        for path in &self.dictionaries {
            dictionary.load_file(path)?;
            info!("Loaded dictionary file: {}", path);
        }

        Ok(dictionary)
    }

    /// Create an example configuration file
    pub fn example() -> Self {
        Config {
            log_level: Some("info".to_string()),
            dictionaries: vec!["/etc/raddb/dictionary.local".to_string()],
            include_builtin: true,
            strict: true,
        }
    }
}
