//! Clamp quota use case
//!
//! The quota cap policy engine. Given the active category and the raw quota
//! the host just computed, returns the value the host should use.
//!
//! This runs on the host's recompute path, so it only reads in-memory
//! registry state: no I/O, no locks, no allocation beyond logging. Every
//! path returns a value; when in doubt, the raw quota comes back unchanged.
//!
//! # Decision order
//!
//! 1. No active category → raw value
//! 2. Empty registry → raw value
//! 3. Look up cap (default [`DEFAULT_CAP`]) and enabled flag (default `true`)
//! 4. Apply [`apply_cap`]: disabled or `-1` → raw value; invalid cap → default
//!    cap; otherwise `min(raw, cap)`

use crate::ports::active_category::ActiveCategoryQuery;
use crate::registry::CategoryConfigRegistry;
use quotacap_domain::{
    CapSettings, DEFAULT_CAP, DEFAULT_ENABLED, SOFT_CEILING, apply_cap, classify_quota_value,
};
use tracing::{debug, info, warn};

/// Check whether `value` may be used as a cap.
///
/// `-1` and anything `>= 0` is valid. Values above [`SOFT_CEILING`] are
/// valid but logged as a warning.
pub fn validate_quota_value(value: i64) -> bool {
    let validation = classify_quota_value(value);
    if validation.is_flagged() {
        warn!(
            value,
            ceiling = SOFT_CEILING,
            "Quota cap is unusually high"
        );
    } else if !validation.is_valid() {
        debug!(value, "Quota cap is invalid");
    }
    validation.is_valid()
}

/// Quota cap policy engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampQuotaUseCase;

impl ClampQuotaUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Return the quota the host should use while `active_category` is active.
    pub fn execute(
        &self,
        registry: &CategoryConfigRegistry,
        active_category: Option<&str>,
        raw: i64,
    ) -> i64 {
        let category = match active_category.map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => return raw,
        };

        if registry.is_empty() {
            return raw;
        }

        let settings = CapSettings::new(
            registry.cap(category).unwrap_or(DEFAULT_CAP),
            registry.enabled(category).unwrap_or(DEFAULT_ENABLED),
        );
        let decision = apply_cap(settings, raw);

        // Warned about once at registration.
        if decision.cap_replaced {
            debug!(
                category,
                cap = settings.cap,
                "Invalid quota cap, using default of {}",
                DEFAULT_CAP
            );
        }

        if decision.modified() {
            if registry.debug_logging() {
                info!(category, raw, cap = ?decision.effective_cap, "Quota clamped");
            } else {
                debug!(category, raw, cap = ?decision.effective_cap, "Quota clamped");
            }
        } else if registry.debug_logging() {
            info!(
                category,
                raw,
                cap = ?decision.effective_cap,
                outcome = ?decision.outcome,
                "Quota left unchanged"
            );
        }

        decision.value
    }

    /// Same as [`execute`](Self::execute), reading the active category from
    /// the host.
    pub fn execute_for_host(
        &self,
        registry: &CategoryConfigRegistry,
        host: &dyn ActiveCategoryQuery,
        raw: i64,
    ) -> i64 {
        let active = host.active_category();
        self.execute(registry, active.as_deref(), raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::active_category::FixedActiveCategory;
    use crate::ports::config_store::MemoryConfigStore;
    use quotacap_domain::CategoryName;

    fn registry_with(categories: &[(&str, i64, bool)]) -> CategoryConfigRegistry {
        let mut registry = CategoryConfigRegistry::new(Box::new(MemoryConfigStore::new()));
        for &(name, cap, enabled) in categories {
            registry
                .ensure_category(&CategoryName::try_new(name).unwrap())
                .unwrap();
            if cap >= -1 {
                registry.set_cap(name, cap).unwrap();
            }
            registry.set_enabled(name, enabled).unwrap();
        }
        registry
    }

    const VALUES: [i64; 7] = [i64::MIN, -5, 0, 99, 100, 101, i64::MAX];

    #[test]
    fn test_validate_quota_value_boundaries() {
        assert!(validate_quota_value(-1));
        assert!(!validate_quota_value(-2));
        assert!(validate_quota_value(0));
        assert!(validate_quota_value(1_000_001));
    }

    #[test]
    fn test_no_active_category() {
        let registry = registry_with(&[("Orion", 100, true)]);
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            assert_eq!(engine.execute(&registry, None, v), v);
            assert_eq!(engine.execute(&registry, Some(""), v), v);
            assert_eq!(engine.execute(&registry, Some("   "), v), v);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = registry_with(&[]);
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            assert_eq!(engine.execute(&registry, Some("Orion"), v), v);
        }
    }

    #[test]
    fn test_enabled_cap_is_min() {
        let registry = registry_with(&[("Orion", 100, true)]);
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            assert_eq!(engine.execute(&registry, Some("Orion"), v), v.min(100));
        }
    }

    #[test]
    fn test_zero_cap() {
        let registry = registry_with(&[("Orion", 0, true)]);
        let engine = ClampQuotaUseCase::new();
        assert_eq!(engine.execute(&registry, Some("Orion"), 50), 0);
        assert_eq!(engine.execute(&registry, Some("Orion"), -5), -5);
    }

    #[test]
    fn test_disabled_category_unchanged() {
        let registry = registry_with(&[("Orion", 100, false)]);
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            assert_eq!(engine.execute(&registry, Some("Orion"), v), v);
        }
    }

    #[test]
    fn test_sentinel_cap_unchanged() {
        let registry = registry_with(&[("Orion", -1, true)]);
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            assert_eq!(engine.execute(&registry, Some("Orion"), v), v);
        }
    }

    #[test]
    fn test_unknown_category_uses_default_cap() {
        let registry = registry_with(&[("Orion", 100, true)]);
        let engine = ClampQuotaUseCase::new();
        assert_eq!(engine.execute(&registry, Some("Lyra"), 5000), DEFAULT_CAP);
        assert_eq!(engine.execute(&registry, Some("Lyra"), 3999), 3999);
    }

    #[test]
    fn test_invalid_stored_cap_uses_default() {
        use crate::ports::config_store::{ConfigStorePort, ConfigValue};
        use quotacap_domain::Section;

        let mut store = MemoryConfigStore::new();
        store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(-5), "")
            .unwrap();
        let mut registry = CategoryConfigRegistry::new(Box::new(store));
        registry
            .ensure_category(&CategoryName::try_new("Orion").unwrap())
            .unwrap();

        let engine = ClampQuotaUseCase::new();
        assert_eq!(engine.execute(&registry, Some("Orion"), 9000), DEFAULT_CAP);
        assert_eq!(engine.execute(&registry, Some("Orion"), 10), 10);
    }

    #[test]
    fn test_execute_does_not_mutate_registry() {
        let registry = registry_with(&[("Orion", 100, true)]);
        let before = registry.snapshot();
        let engine = ClampQuotaUseCase::new();
        for v in VALUES {
            engine.execute(&registry, Some("Orion"), v);
            engine.execute(&registry, Some("Unknown"), v);
        }
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_execute_for_host() {
        let registry = registry_with(&[("Orion", 100, true)]);
        let engine = ClampQuotaUseCase::new();

        let host = FixedActiveCategory::new(Some("Orion".to_string()));
        assert_eq!(engine.execute_for_host(&registry, &host, 500), 100);

        let outside = FixedActiveCategory::none();
        assert_eq!(engine.execute_for_host(&registry, &outside, 500), 500);
    }

    #[test]
    fn test_invalid_stored_cap_is_not_warned_per_clamp() {
        use crate::ports::config_store::{ConfigStorePort, ConfigValue};
        use quotacap_domain::Section;
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut store = MemoryConfigStore::new();
        store
            .get_or_create(Section::Caps, "Orion_Cap", ConfigValue::Integer(-5), "")
            .unwrap();
        let mut registry = CategoryConfigRegistry::new(Box::new(store));
        registry
            .ensure_category(&CategoryName::try_new("Orion").unwrap())
            .unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let engine = ClampQuotaUseCase::new();
        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..100 {
                assert_eq!(engine.execute(&registry, Some("Orion"), 9000), DEFAULT_CAP);
            }
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.is_empty(), "unexpected warnings: {}", output);
    }
}
