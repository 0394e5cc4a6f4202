//! Infrastructure layer for quotacap
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including settings file loading.

pub mod category_source;
pub mod config;
pub mod store;

// Re-export commonly used types
pub use category_source::FsCategorySource;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGeneratorConfig, FileSourcesConfig,
    FileStoreConfig,
};
pub use store::TomlConfigStore;
