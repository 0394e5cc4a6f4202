//! TOML file backed config store.
//!
//! Every section of the store is a TOML table. Entries created through
//! [`ConfigStorePort::get_or_create`] carry a description and a default,
//! which are written as comments above the key:
//!
//! ```toml
//! [Caps]
//!
//! ## Maximum quota while in Orion (-1 = no cap)
//! # Setting type: Integer
//! # Default value: 4000
//! Orion_Cap = 4000
//! ```
//!
//! Keys found in the file that nobody asked for are kept and written back
//! unchanged on save.

use quotacap_application::{ConfigStoreError, ConfigStorePort, ConfigValue};
use quotacap_domain::Section;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
struct StoredEntry {
    value: ConfigValue,
    /// Default and description, present once the entry was requested
    meta: Option<EntryMeta>,
}

#[derive(Debug, Clone, PartialEq)]
struct EntryMeta {
    default: ConfigValue,
    description: String,
}

type Sections = BTreeMap<String, BTreeMap<String, StoredEntry>>;

/// Config store persisted as a TOML file.
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    sections: Sections,
}

impl TomlConfigStore {
    /// Open the store at `path`.
    ///
    /// A missing file opens an empty store; the file is created on the
    /// first [`save`](ConfigStorePort::save).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigStoreError> {
        let path = path.into();
        let sections = read_sections(&path)?;
        debug!("Opened config store at {:?}", path);
        Ok(Self { path, sections })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the store as TOML text.
    pub fn render(&self) -> String {
        let mut out = String::from("## Quota caps per category, generated by quotacap\n");

        let known: Vec<&str> = Section::all().iter().map(|s| s.name()).collect();
        let order = known.iter().copied().chain(
            self.sections
                .keys()
                .map(String::as_str)
                .filter(|name| !known.contains(name)),
        );

        for name in order {
            let Some(entries) = self.sections.get(name) else {
                continue;
            };
            out.push('\n');
            out.push_str(&format!("[{}]\n", format_key(name)));
            for (key, entry) in entries {
                out.push('\n');
                if let Some(meta) = &entry.meta {
                    if !meta.description.is_empty() {
                        out.push_str(&format!("## {}\n", comment_text(&meta.description)));
                    }
                    out.push_str(&format!(
                        "# Setting type: {}\n",
                        setting_type(&meta.default)
                    ));
                    out.push_str(&format!(
                        "# Default value: {}\n",
                        format_value(&meta.default)
                    ));
                }
                out.push_str(&format!(
                    "{} = {}\n",
                    format_key(key),
                    format_value(&entry.value)
                ));
            }
        }

        out
    }

    fn entry_mut(&mut self, section: Section, key: &str) -> Option<&mut StoredEntry> {
        self.sections.get_mut(section.name())?.get_mut(key)
    }
}

impl ConfigStorePort for TomlConfigStore {
    fn get_or_create(
        &mut self,
        section: Section,
        key: &str,
        default: ConfigValue,
        description: &str,
    ) -> Result<ConfigValue, ConfigStoreError> {
        let meta = EntryMeta {
            default: default.clone(),
            description: description.to_string(),
        };
        let entries = self.sections.entry(section.name().to_string()).or_default();

        match entries.get_mut(key) {
            Some(entry) if entry.value.same_type(&default) => {
                entry.meta = Some(meta);
                Ok(entry.value.clone())
            }
            Some(entry) => {
                warn!(
                    "[{}] {} holds a {} value, expected {}; resetting to default",
                    section,
                    key,
                    entry.value.type_name(),
                    default.type_name()
                );
                entry.value = default.clone();
                entry.meta = Some(meta);
                Ok(default)
            }
            None => {
                entries.insert(
                    key.to_string(),
                    StoredEntry {
                        value: default.clone(),
                        meta: Some(meta),
                    },
                );
                Ok(default)
            }
        }
    }

    fn get(&self, section: Section, key: &str) -> Option<ConfigValue> {
        self.sections
            .get(section.name())?
            .get(key)
            .map(|e| e.value.clone())
    }

    fn set(
        &mut self,
        section: Section,
        key: &str,
        value: ConfigValue,
    ) -> Result<(), ConfigStoreError> {
        let entry = self
            .entry_mut(section, key)
            .ok_or_else(|| ConfigStoreError::UnknownKey {
                section,
                key: key.to_string(),
            })?;
        if !entry.value.same_type(&value) {
            return Err(ConfigStoreError::TypeMismatch {
                section,
                key: key.to_string(),
                expected: entry.value.type_name(),
                actual: value.type_name(),
            });
        }
        entry.value = value;
        Ok(())
    }

    fn save(&mut self) -> Result<(), ConfigStoreError> {
        let io_err = |source| ConfigStoreError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, self.render()).map_err(io_err)?;
        debug!("Saved config store to {:?}", self.path);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ConfigStoreError> {
        let mut fresh = read_sections(&self.path)?;

        // Requested entries keep their metadata; a value missing from the
        // file or of the wrong type falls back to the default.
        for (section, entries) in &self.sections {
            for (key, entry) in entries {
                let Some(meta) = &entry.meta else {
                    continue;
                };
                let target = fresh
                    .entry(section.clone())
                    .or_default()
                    .entry(key.clone())
                    .or_insert_with(|| StoredEntry {
                        value: meta.default.clone(),
                        meta: None,
                    });
                if !target.value.same_type(&meta.default) {
                    warn!(
                        "[{}] {} has the wrong type after reload; using default",
                        section, key
                    );
                    target.value = meta.default.clone();
                }
                target.meta = Some(meta.clone());
            }
        }

        self.sections = fresh;
        debug!("Reloaded config store from {:?}", self.path);
        Ok(())
    }
}

fn read_sections(path: &Path) -> Result<Sections, ConfigStoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Sections::new()),
        Err(source) => {
            return Err(ConfigStoreError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
        ConfigStoreError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    let mut sections = Sections::new();
    for (name, value) in table {
        let toml::Value::Table(entries) = value else {
            warn!("Ignoring top-level key '{}' outside any section in {:?}", name, path);
            continue;
        };
        let section = sections.entry(name.clone()).or_default();
        for (key, value) in entries {
            match from_toml(&value) {
                Some(value) => {
                    section.insert(key, StoredEntry { value, meta: None });
                }
                None => warn!(
                    "Ignoring [{}] {}: unsupported value type {}",
                    name,
                    key,
                    value.type_str()
                ),
            }
        }
    }
    Ok(sections)
}

fn from_toml(value: &toml::Value) -> Option<ConfigValue> {
    match value {
        toml::Value::String(s) => Some(ConfigValue::String(s.clone())),
        toml::Value::Integer(n) => Some(ConfigValue::Integer(*n)),
        toml::Value::Boolean(b) => Some(ConfigValue::Boolean(*b)),
        _ => None,
    }
}

fn to_toml(value: &ConfigValue) -> toml::Value {
    match value {
        ConfigValue::String(s) => toml::Value::String(s.clone()),
        ConfigValue::Integer(n) => toml::Value::Integer(*n),
        ConfigValue::Boolean(b) => toml::Value::Boolean(*b),
    }
}

fn format_value(value: &ConfigValue) -> String {
    to_toml(value).to_string()
}

fn setting_type(value: &ConfigValue) -> &'static str {
    match value {
        ConfigValue::String(_) => "String",
        ConfigValue::Integer(_) => "Integer",
        ConfigValue::Boolean(_) => "Boolean",
    }
}

/// TOML comments may not hold control characters; write them escaped.
fn comment_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Bare keys when possible, quoted otherwise (category names may hold spaces).
fn format_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        toml::Value::String(key.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category_source::FsCategorySource;
    use quotacap_application::QuotaCapService;
    use quotacap_domain::CapSettings;
    use std::sync::Arc;

    fn store_in(dir: &tempfile::TempDir) -> TomlConfigStore {
        TomlConfigStore::open(dir.path().join("caps.toml")).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.get(Section::Caps, "Orion_Cap").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .get_or_create(
                Section::Caps,
                "Alpha Centauri_Cap",
                ConfigValue::Integer(4000),
                "Maximum quota",
            )
            .unwrap();
        store
            .get_or_create(
                Section::Toggles,
                "Alpha Centauri_Enabled",
                ConfigValue::Boolean(true),
                "Apply cap",
            )
            .unwrap();
        store
            .set(Section::Caps, "Alpha Centauri_Cap", ConfigValue::Integer(-1))
            .unwrap();
        store.save().unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get(Section::Caps, "Alpha Centauri_Cap"),
            Some(ConfigValue::Integer(-1))
        );
        assert_eq!(
            reopened.get(Section::Toggles, "Alpha Centauri_Enabled"),
            Some(ConfigValue::Boolean(true))
        );
    }

    #[test]
    fn test_render_writes_comments() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .get_or_create(
                Section::Caps,
                "Orion_Cap",
                ConfigValue::Integer(4000),
                "Maximum quota while in Orion",
            )
            .unwrap();
        store
            .get_or_create(
                Section::General,
                "DebugLogging",
                ConfigValue::Boolean(false),
                "Verbose",
            )
            .unwrap();

        let text = store.render();
        assert!(text.contains("## Maximum quota while in Orion\n"));
        assert!(text.contains("# Setting type: Integer\n"));
        assert!(text.contains("# Default value: 4000\n"));
        assert!(text.contains("Orion_Cap = 4000\n"));
        // General comes before Caps
        assert!(text.find("[General]").unwrap() < text.find("[Caps]").unwrap());
    }

    #[test]
    fn test_existing_value_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caps.toml");
        fs::write(&path, "[Caps]\nOrion_Cap = 120\n").unwrap();

        let mut store = TomlConfigStore::open(&path).unwrap();
        let value = store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(4000), "")
            .unwrap();
        assert_eq!(value, ConfigValue::Integer(120));
    }

    #[test]
    fn test_wrong_type_resets_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caps.toml");
        fs::write(&path, "[Caps]\nOrion_Cap = \"lots\"\n").unwrap();

        let mut store = TomlConfigStore::open(&path).unwrap();
        let value = store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(4000), "")
            .unwrap();
        assert_eq!(value, ConfigValue::Integer(4000));
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caps.toml");
        fs::write(&path, "[Caps]\nStale_Cap = 7\n\n[Extra]\nnote = \"keep me\"\n").unwrap();

        let mut store = TomlConfigStore::open(&path).unwrap();
        store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(4000), "")
            .unwrap();
        store.save().unwrap();

        let reopened = TomlConfigStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(Section::Caps, "Stale_Cap"),
            Some(ConfigValue::Integer(7))
        );
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[Extra]"));
        assert!(text.contains("note = \"keep me\""));
    }

    #[test]
    fn test_reload_picks_up_external_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(4000), "cap")
            .unwrap();
        store.save().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        fs::write(
            store.path(),
            text.replace("Orion_Cap = 4000", "Orion_Cap = 55"),
        )
        .unwrap();

        store.reload().unwrap();
        assert_eq!(
            store.get(Section::Caps, "Orion_Cap"),
            Some(ConfigValue::Integer(55))
        );
    }

    #[test]
    fn test_reload_restores_default_for_removed_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .get_or_create(Section::Toggles, "Orion_Enabled", ConfigValue::Boolean(true), "")
            .unwrap();
        store
            .set(Section::Toggles, "Orion_Enabled", ConfigValue::Boolean(false))
            .unwrap();
        fs::write(store.path(), "[Toggles]\n").unwrap();

        store.reload().unwrap();
        assert_eq!(
            store.get(Section::Toggles, "Orion_Enabled"),
            Some(ConfigValue::Boolean(true))
        );
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caps.toml");
        fs::write(&path, "[Caps\nbroken").unwrap();

        let err = TomlConfigStore::open(&path).unwrap_err();
        let message = match err {
            ConfigStoreError::Parse { message, .. } => message,
            other => panic!("expected a parse error, got {:?}", other),
        };
        assert!(!message.is_empty());
    }

    #[test]
    fn test_control_characters_in_description_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .get_or_create(
                Section::Caps,
                "A\u{1}B_Cap",
                ConfigValue::Integer(4000),
                "Maximum quota while in A\u{1}B",
            )
            .unwrap();
        store.save().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("## Maximum quota while in A\\u{1}B\n"));

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get(Section::Caps, "A\u{1}B_Cap"),
            Some(ConfigValue::Integer(4000))
        );
    }

    #[test]
    fn test_set_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let err = store
            .set(Section::Caps, "Nope_Cap", ConfigValue::Integer(1))
            .unwrap_err();
        assert!(matches!(err, ConfigStoreError::UnknownKey { .. }));
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key("Orion_Cap"), "Orion_Cap");
        assert_eq!(format_key("Alpha Centauri_Cap"), "\"Alpha Centauri_Cap\"");
    }

    #[test]
    fn test_comment_text_escapes_control_characters() {
        assert_eq!(comment_text("plain text"), "plain text");
        assert_eq!(comment_text("a\u{1}b\nc"), "a\\u{1}b\\nc");
    }

    // ==================== Service over the file store ====================

    fn service_in(dir: &tempfile::TempDir, sections: &str) -> QuotaCapService {
        let section_file = dir.path().join("generated.cfg");
        fs::write(&section_file, sections).unwrap();
        let source = Arc::new(FsCategorySource::new(
            dir.path().join("words.cfg"),
            section_file,
        ));
        QuotaCapService::new(Box::new(store_in(dir)), source)
    }

    #[test]
    fn test_service_keeps_edits_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service_in(&dir, "[Constellation Orion]\n[Constellation Lyra]\n");
        assert!(service.generate());
        service.set_cap("Orion", 12).unwrap();
        service.set_enabled("Lyra", false).unwrap();
        drop(service);

        let mut service = service_in(
            &dir,
            "[Constellation Orion]\n[Constellation Lyra]\n[Constellation Vega]\n",
        );
        assert!(service.generate());
        let status = service.status();
        assert_eq!(status["Orion"], CapSettings::new(12, true));
        assert_eq!(status["Lyra"], CapSettings::new(4000, false));
        assert_eq!(status["Vega"], CapSettings::default());
        assert_eq!(service.clamp_quota(Some("Orion"), 100), 12);
    }

    #[test]
    fn test_service_reload_picks_up_file_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service_in(&dir, "[Constellation Orion]\n");
        assert!(service.generate());
        assert!(!service.registry().debug_logging());

        let path = dir.path().join("caps.toml");
        let text = fs::read_to_string(&path).unwrap();
        let edited = text
            .replace("Orion_Cap = 4000", "Orion_Cap = 55")
            .replace("DebugLogging = false", "DebugLogging = true");
        fs::write(&path, edited).unwrap();

        assert!(service.reload());
        assert_eq!(service.status()["Orion"].cap, 55);
        assert_eq!(service.clamp_quota(Some("Orion"), 100), 55);
        assert!(service.registry().debug_logging());
    }

    #[test]
    fn test_service_control_character_name_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = service_in(&dir, "[Constellation A\u{1}B]\n");
        assert!(service.generate());
        service.set_cap("A\u{1}B", 7).unwrap();
        drop(service);

        let mut service = service_in(&dir, "[Constellation A\u{1}B]\n");
        assert!(service.generate());
        assert_eq!(service.status()["A\u{1}B"].cap, 7);
    }
}
