//! Persisted key/value configuration store port.
//!
//! The cap registry keeps every category setting in a store addressed by
//! `(section, key)`. Each entry carries a typed scalar, created from a
//! default and a description. This port is the narrow interface the registry needs:
//! get-or-create, read, write, save and reload.
//!
//! # Built-in Implementations
//!
//! - [`MemoryConfigStore`] - Keeps entries in memory; `save`/`reload` are no-ops
//!
//! For a file-backed store, see `TomlConfigStore` in the infrastructure layer.

use quotacap_domain::Section;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// A dynamically-typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl ConfigValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Boolean(_) => "boolean",
        }
    }

    /// Whether `other` holds the same variant as `self`
    pub fn same_type(&self, other: &ConfigValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Errors from config store operations.
#[derive(Error, Debug)]
pub enum ConfigStoreError {
    /// Reading or writing the backing file failed.
    #[error("Config store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be parsed.
    #[error("Config store parse error at {path}: {message}")]
    Parse { path: String, message: String },

    /// The key does not exist in the given section.
    #[error("Unknown config key: [{section}] {key}")]
    UnknownKey { section: Section, key: String },

    /// The value has a different type than the existing entry.
    #[error("Type mismatch for [{section}] {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        section: Section,
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Port for the persisted key/value store.
///
/// Re-creating an existing entry never overwrites its stored value, unless
/// the stored value has a different type than the default: then it is reset
/// to the default and a warning is logged. File-backed implementors also
/// persist the default and description next to the entry.
pub trait ConfigStorePort: Send {
    /// Return the stored value of an entry, creating it with `default` first
    /// if it does not exist yet.
    fn get_or_create(
        &mut self,
        section: Section,
        key: &str,
        default: ConfigValue,
        description: &str,
    ) -> Result<ConfigValue, ConfigStoreError>;

    /// Get the current value of an entry, if present.
    fn get(&self, section: Section, key: &str) -> Option<ConfigValue>;

    /// Overwrite the value of an existing entry.
    ///
    /// Errors if the entry does not exist or the type differs.
    fn set(&mut self, section: Section, key: &str, value: ConfigValue)
    -> Result<(), ConfigStoreError>;

    /// Persist all entries.
    fn save(&mut self) -> Result<(), ConfigStoreError>;

    /// Discard in-memory values and re-read the persisted state.
    fn reload(&mut self) -> Result<(), ConfigStoreError>;
}

/// In-memory config store.
///
/// Useful for hosts that do not persist settings, and in tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: HashMap<(Section, String), ConfigValue>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStorePort for MemoryConfigStore {
    fn get_or_create(
        &mut self,
        section: Section,
        key: &str,
        default: ConfigValue,
        _description: &str,
    ) -> Result<ConfigValue, ConfigStoreError> {
        let entry = self
            .entries
            .entry((section, key.to_string()))
            .or_insert_with(|| default.clone());
        if !entry.same_type(&default) {
            warn!(
                "[{}] {} holds a {} value, expected {}; resetting to default",
                section,
                key,
                entry.type_name(),
                default.type_name()
            );
            *entry = default;
        }
        Ok(entry.clone())
    }

    fn get(&self, section: Section, key: &str) -> Option<ConfigValue> {
        self.entries.get(&(section, key.to_string())).cloned()
    }

    fn set(
        &mut self,
        section: Section,
        key: &str,
        value: ConfigValue,
    ) -> Result<(), ConfigStoreError> {
        let entry = self
            .entries
            .get_mut(&(section, key.to_string()))
            .ok_or_else(|| ConfigStoreError::UnknownKey {
                section,
                key: key.to_string(),
            })?;
        if !entry.same_type(&value) {
            return Err(ConfigStoreError::TypeMismatch {
                section,
                key: key.to_string(),
                expected: entry.type_name(),
                actual: value.type_name(),
            });
        }
        *entry = value;
        Ok(())
    }

    fn save(&mut self) -> Result<(), ConfigStoreError> {
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigStoreError> {
        Ok(())
    }
}
