//! Config key layout for the cap store.
//!
//! Three sections are used: [`Section::General`] holds fixed keys described
//! by [`lookup_key`], while [`Section::Caps`] and [`Section::Toggles`] hold
//! one key per category, named by [`cap_key`] and [`enabled_key`].

use crate::category::CategoryName;

/// Store section a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Plugin-wide settings
    General,
    /// One integer cap per category
    Caps,
    /// One boolean enabled flag per category
    Toggles,
}

impl Section {
    /// Section name as written in the store file
    pub fn name(&self) -> &'static str {
        match self {
            Section::General => "General",
            Section::Caps => "Caps",
            Section::Toggles => "Toggles",
        }
    }

    pub fn all() -> [Section; 3] {
        [Section::General, Section::Caps, Section::Toggles]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of the debug logging flag in [`Section::General`].
pub const DEBUG_LOGGING_KEY: &str = "DebugLogging";

/// Metadata for a fixed config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    pub section: Section,
    pub key: &'static str,
    /// Human-readable description, written next to the key in the store
    pub description: &'static str,
}

/// Look up a fixed key by name.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 1] = [ConfigKeyInfo {
    section: Section::General,
    key: DEBUG_LOGGING_KEY,
    description: "Log every quota decision at info level",
}];

/// Key of a category's cap, e.g. `Orion_Cap`.
pub fn cap_key(name: &CategoryName) -> String {
    format!("{}_Cap", name)
}

/// Key of a category's enabled flag, e.g. `Orion_Enabled`.
pub fn enabled_key(name: &CategoryName) -> String {
    format!("{}_Enabled", name)
}

pub fn cap_description(name: &CategoryName) -> String {
    format!("Maximum quota while in {} (-1 = no cap)", name)
}

pub fn enabled_description(name: &CategoryName) -> String {
    format!("Apply the quota cap while in {}", name)
}
