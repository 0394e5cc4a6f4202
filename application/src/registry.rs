//! Category config registry.
//!
//! Holds the cap and enabled flag of every known category in two maps keyed
//! by [`CategoryName`], mirrored in a [`ConfigStorePort`]. The maps are the
//! read path for the quota policy: lookups are plain hash map reads with no
//! I/O. Writes go through the store first and update the maps afterwards.
//!
//! # Lifecycle
//!
//! Entries are created by [`CategoryConfigRegistry::ensure_category`], which
//! uses get-or-create semantics: a category that already has stored values
//! keeps them. Entries are never removed; categories that disappear from the
//! producer's files stay in the store.

use crate::ports::config_store::{ConfigStoreError, ConfigStorePort, ConfigValue};
use crate::use_cases::clamp_quota::validate_quota_value;
use quotacap_domain::config::{cap_description, enabled_description, lookup_key};
use quotacap_domain::{
    CapSettings, CategoryName, DEFAULT_CAP, DEFAULT_ENABLED, DomainError, Section, cap_key,
    classify_quota_value, config::DEBUG_LOGGING_KEY, enabled_key,
};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] ConfigStoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Stored value for [{section}] {key} is a {actual}, expected {expected}")]
    UnexpectedType {
        section: Section,
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Registry of per-category cap settings backed by a config store.
pub struct CategoryConfigRegistry {
    store: Box<dyn ConfigStorePort>,
    caps: HashMap<CategoryName, i64>,
    toggles: HashMap<CategoryName, bool>,
    debug_logging: bool,
    /// Value given to `General.DebugLogging` when the store lacks it
    debug_logging_default: bool,
}

impl CategoryConfigRegistry {
    /// Create a registry over `store` and load the general settings.
    ///
    /// A store that cannot provide the general settings leaves them at their
    /// defaults; the failure is logged.
    pub fn new(store: Box<dyn ConfigStorePort>) -> Self {
        Self::with_debug_logging_default(store, false)
    }

    /// Like [`new`](Self::new), seeding `General.DebugLogging` with
    /// `debug_logging` if the store does not hold it yet.
    pub fn with_debug_logging_default(
        store: Box<dyn ConfigStorePort>,
        debug_logging: bool,
    ) -> Self {
        let mut registry = Self {
            store,
            caps: HashMap::new(),
            toggles: HashMap::new(),
            debug_logging,
            debug_logging_default: debug_logging,
        };
        if let Err(e) = registry.load_general() {
            warn!("Could not load general settings, using defaults: {}", e);
        }
        registry
    }

    fn load_general(&mut self) -> Result<(), RegistryError> {
        let description = lookup_key(DEBUG_LOGGING_KEY)
            .map(|info| info.description)
            .unwrap_or_default();
        let value = self.store.get_or_create(
            Section::General,
            DEBUG_LOGGING_KEY,
            ConfigValue::Boolean(self.debug_logging_default),
            description,
        )?;
        self.debug_logging = expect_bool(Section::General, DEBUG_LOGGING_KEY, &value)?;
        Ok(())
    }

    /// Create the cap and enabled entries of a category if they are missing,
    /// and return the category's current settings.
    ///
    /// Existing stored values are never overwritten.
    pub fn ensure_category(&mut self, name: &CategoryName) -> Result<CapSettings, RegistryError> {
        let key = cap_key(name);
        let value = self.store.get_or_create(
            Section::Caps,
            &key,
            ConfigValue::Integer(DEFAULT_CAP),
            &cap_description(name),
        )?;
        let cap = expect_integer(Section::Caps, &key, &value)?;

        let key = enabled_key(name);
        let value = self.store.get_or_create(
            Section::Toggles,
            &key,
            ConfigValue::Boolean(DEFAULT_ENABLED),
            &enabled_description(name),
        )?;
        let enabled = expect_bool(Section::Toggles, &key, &value)?;

        if !classify_quota_value(cap).is_valid() {
            warn!(category = %name, cap, "Stored cap is invalid; the default cap will be applied");
        }

        self.caps.insert(name.clone(), cap);
        self.toggles.insert(name.clone(), enabled);
        debug!(category = %name, cap, enabled, "Category registered");
        Ok(CapSettings::new(cap, enabled))
    }

    /// Cap of a category, if known
    pub fn cap(&self, name: &str) -> Option<i64> {
        self.caps.get(name).copied()
    }

    /// Enabled flag of a category, if known
    pub fn enabled(&self, name: &str) -> Option<bool> {
        self.toggles.get(name).copied()
    }

    /// Both settings of a category, if it has both entries
    pub fn settings(&self, name: &str) -> Option<CapSettings> {
        Some(CapSettings::new(self.cap(name)?, self.enabled(name)?))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caps.contains_key(name) || self.toggles.contains_key(name)
    }

    /// Number of known categories
    pub fn len(&self) -> usize {
        self.caps.len().max(self.toggles.len())
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty() && self.toggles.is_empty()
    }

    /// Whether every quota decision should be logged at info level
    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    /// Name-ordered copy of every category's settings.
    pub fn snapshot(&self) -> BTreeMap<CategoryName, CapSettings> {
        self.caps
            .iter()
            .map(|(name, &cap)| {
                let enabled = self.toggles.get(name).copied().unwrap_or(DEFAULT_ENABLED);
                (name.clone(), CapSettings::new(cap, enabled))
            })
            .collect()
    }

    /// Change the cap of a known category and persist it.
    pub fn set_cap(&mut self, name: &str, cap: i64) -> Result<(), RegistryError> {
        if !validate_quota_value(cap) {
            return Err(DomainError::InvalidCapValue(cap).into());
        }
        let name = self.known_name(name)?;
        self.store
            .set(Section::Caps, &cap_key(&name), ConfigValue::Integer(cap))?;
        self.store.save()?;
        self.caps.insert(name, cap);
        Ok(())
    }

    /// Change the enabled flag of a known category and persist it.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let name = self.known_name(name)?;
        self.store.set(
            Section::Toggles,
            &enabled_key(&name),
            ConfigValue::Boolean(enabled),
        )?;
        self.store.save()?;
        self.toggles.insert(name, enabled);
        Ok(())
    }

    /// Put every known category back to the default cap and enabled flag,
    /// then persist.
    pub fn reset_all_to_defaults(&mut self) -> Result<usize, RegistryError> {
        let names: Vec<CategoryName> = self.caps.keys().cloned().collect();
        for name in &names {
            self.store.set(
                Section::Caps,
                &cap_key(name),
                ConfigValue::Integer(DEFAULT_CAP),
            )?;
            self.store.set(
                Section::Toggles,
                &enabled_key(name),
                ConfigValue::Boolean(DEFAULT_ENABLED),
            )?;
            self.caps.insert(name.clone(), DEFAULT_CAP);
            self.toggles.insert(name.clone(), DEFAULT_ENABLED);
        }
        self.store.save()?;
        Ok(names.len())
    }

    /// Persist the backing store.
    pub fn save(&mut self) -> Result<(), RegistryError> {
        self.store.save()?;
        Ok(())
    }

    /// Re-read the backing store and refresh every known category from it.
    ///
    /// Categories whose entries vanished from the store are recreated with
    /// defaults.
    pub fn reload(&mut self) -> Result<(), RegistryError> {
        self.store.reload()?;
        self.load_general()?;
        let names: Vec<CategoryName> = self.caps.keys().cloned().collect();
        for name in &names {
            self.ensure_category(name)?;
        }
        Ok(())
    }

    fn known_name(&self, name: &str) -> Result<CategoryName, RegistryError> {
        self.caps
            .get_key_value(name)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| RegistryError::UnknownCategory(name.to_string()))
    }
}

impl std::fmt::Debug for CategoryConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryConfigRegistry")
            .field("caps", &self.caps)
            .field("toggles", &self.toggles)
            .field("debug_logging", &self.debug_logging)
            .finish_non_exhaustive()
    }
}

fn expect_integer(section: Section, key: &str, value: &ConfigValue) -> Result<i64, RegistryError> {
    value.as_integer().ok_or_else(|| RegistryError::UnexpectedType {
        section,
        key: key.to_string(),
        expected: "integer",
        actual: value.type_name(),
    })
}

fn expect_bool(section: Section, key: &str, value: &ConfigValue) -> Result<bool, RegistryError> {
    value.as_bool().ok_or_else(|| RegistryError::UnexpectedType {
        section,
        key: key.to_string(),
        expected: "boolean",
        actual: value.type_name(),
    })
}
