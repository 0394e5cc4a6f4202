//! Settings file loading for quotacap
//!
//! This module handles file I/O and merging of settings from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUOTACAP_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./quotacap.toml` or `./.quotacap.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/quotacap/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGeneratorConfig, FileSourcesConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;
