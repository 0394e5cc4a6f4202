//! Quota cap service
//!
//! The surface the embedding host talks to. Owns the registry, the
//! generator and the policy engine, and turns every failure into a logged
//! boolean or an unchanged value so nothing propagates into the host.
//!
//! # Usage
//!
//! ```ignore
//! let mut service = QuotaCapService::new(store, source);
//! if !service.generate() && service.can_retry() {
//!     // reschedule on the host's own timer, or:
//!     service.immediate_retry();
//! }
//!
//! // on every quota recompute
//! let quota = service.clamp_quota(Some("Orion"), raw_quota);
//! ```

use crate::ports::active_category::ActiveCategoryQuery;
use crate::ports::category_source::CategorySourcePort;
use crate::ports::config_store::ConfigStorePort;
use crate::registry::{CategoryConfigRegistry, RegistryError};
use crate::use_cases::clamp_quota::{ClampQuotaUseCase, validate_quota_value};
use crate::use_cases::generate_categories::{GenerateCategoriesUseCase, RetryBudget};
use quotacap_domain::{CapSettings, CategoryName};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Entry point for the embedding host.
pub struct QuotaCapService {
    registry: CategoryConfigRegistry,
    generator: GenerateCategoriesUseCase,
    policy: ClampQuotaUseCase,
}

impl QuotaCapService {
    pub fn new(store: Box<dyn ConfigStorePort>, source: Arc<dyn CategorySourcePort>) -> Self {
        Self::with_registry(CategoryConfigRegistry::new(store), source)
    }

    /// Build the service around an already configured registry.
    pub fn with_registry(
        registry: CategoryConfigRegistry,
        source: Arc<dyn CategorySourcePort>,
    ) -> Self {
        Self {
            registry,
            generator: GenerateCategoriesUseCase::new(source),
            policy: ClampQuotaUseCase::new(),
        }
    }

    /// Use a retry budget other than the default three attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.generator = self.generator.with_max_attempts(max_attempts);
        self
    }

    /// Discover categories and create their config entries.
    ///
    /// See [`GenerateCategoriesUseCase::execute`].
    pub fn generate(&mut self) -> bool {
        self.generator.execute(&mut self.registry)
    }

    /// Whether a failed generation may be retried
    pub fn can_retry(&self) -> bool {
        self.generator.can_retry()
    }

    pub fn retry_budget(&self) -> RetryBudget {
        self.generator.retry_budget()
    }

    /// Retry generation synchronously, if budget remains.
    pub fn immediate_retry(&mut self) -> bool {
        self.generator.immediate_retry(&mut self.registry)
    }

    /// Quota the host should use for `raw` while `category` is active.
    pub fn clamp_quota(&self, category: Option<&str>, raw: i64) -> i64 {
        self.policy.execute(&self.registry, category, raw)
    }

    /// Quota the host should use for `raw`, asking the host for the active
    /// category.
    pub fn clamp_for_host(&self, host: &dyn ActiveCategoryQuery, raw: i64) -> i64 {
        self.policy.execute_for_host(&self.registry, host, raw)
    }

    /// Check whether `value` may be used as a cap.
    pub fn validate_quota_value(&self, value: i64) -> bool {
        validate_quota_value(value)
    }

    /// Current settings of every known category, ordered by name.
    pub fn status(&self) -> BTreeMap<CategoryName, CapSettings> {
        self.registry.snapshot()
    }

    /// Reset every known category to the default cap and enabled flag.
    pub fn reset_all_to_defaults(&mut self) -> bool {
        match self.registry.reset_all_to_defaults() {
            Ok(count) => {
                info!(count, "Reset category configs to defaults");
                true
            }
            Err(e) => {
                error!("Failed to reset category configs: {}", e);
                false
            }
        }
    }

    /// Change a category's cap and persist it.
    ///
    /// Rejected with [`RegistryError::Domain`] when
    /// [`validate_quota_value`] fails.
    pub fn set_cap(&mut self, category: &str, cap: i64) -> Result<(), RegistryError> {
        self.registry.set_cap(category, cap)?;
        info!(category, cap, "Updated quota cap");
        Ok(())
    }

    /// Turn a category's cap on or off and persist it.
    pub fn set_enabled(&mut self, category: &str, enabled: bool) -> Result<(), RegistryError> {
        self.registry.set_enabled(category, enabled)?;
        info!(category, enabled, "Updated quota cap toggle");
        Ok(())
    }

    /// Re-read the store so out-of-band edits take effect.
    pub fn reload(&mut self) -> bool {
        match self.registry.reload() {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to reload category configs: {}", e);
                false
            }
        }
    }

    pub fn registry(&self) -> &CategoryConfigRegistry {
        &self.registry
    }
}
