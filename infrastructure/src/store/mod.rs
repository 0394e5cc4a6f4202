//! Config store adapters
//!
//! Provides [`TomlConfigStore`], the file-backed implementation of the
//! [`ConfigStorePort`](quotacap_application::ConfigStorePort).

mod toml_store;

pub use toml_store::TomlConfigStore;
