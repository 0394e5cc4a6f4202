//! Raw TOML settings data types
//!
//! These structs represent the exact structure of the quotacap settings
//! file. They are deserialized directly by figment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Settings validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("sources.word_file cannot be empty")]
    EmptyWordFile,

    #[error("sources.section_file cannot be empty")]
    EmptySectionFile,

    #[error("store.path cannot be empty")]
    EmptyStorePath,

    #[error("generator.max_attempts cannot be 0")]
    InvalidMaxAttempts,
}

/// Locations of the producer's generated files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourcesConfig {
    /// File carrying the `ConstellationWord = <word>` override
    pub word_file: PathBuf,
    /// File declaring one `[<word> <name>]` section per category
    pub section_file: PathBuf,
}

impl Default for FileSourcesConfig {
    fn default() -> Self {
        Self {
            word_file: PathBuf::from("config/constellations.cfg"),
            section_file: PathBuf::from("config/constellations.generated.cfg"),
        }
    }
}

/// Cap store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Path of the cap store TOML file
    pub path: PathBuf,
    /// Initial `General.DebugLogging` for a store that does not have it yet
    pub debug_logging: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/quotacap.caps.toml"),
            debug_logging: false,
        }
    }
}

/// Generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Attempts allowed before a generation run is reported as failed
    pub max_attempts: u32,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: quotacap_application::MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Complete settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sources: FileSourcesConfig,
    pub store: FileStoreConfig,
    pub generator: FileGeneratorConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sources.word_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyWordFile);
        }
        if self.sources.section_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptySectionFile);
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyStorePath);
        }
        if self.generator.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[sources]
word_file = "/game/config/words.cfg"
section_file = "/game/config/generated.cfg"

[store]
path = "/game/config/caps.toml"
debug_logging = true

[generator]
max_attempts = 5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.word_file, PathBuf::from("/game/config/words.cfg"));
        assert_eq!(
            config.sources.section_file,
            PathBuf::from("/game/config/generated.cfg")
        );
        assert_eq!(config.store.path, PathBuf::from("/game/config/caps.toml"));
        assert!(config.store.debug_logging);
        assert_eq!(config.generator.max_attempts, 5);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[store]
path = "caps.toml"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.path, PathBuf::from("caps.toml"));
        // Defaults should apply
        assert_eq!(config.generator.max_attempts, 3);
        assert!(!config.store.debug_logging);
        assert_eq!(
            config.sources.word_file,
            FileSourcesConfig::default().word_file
        );
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_attempts() {
        let toml_str = r#"
[generator]
max_attempts = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxAttempts)
        ));
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = FileConfig::default();
        config.sources.section_file = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptySectionFile)
        ));
    }
}
