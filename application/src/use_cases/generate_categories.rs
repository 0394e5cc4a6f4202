//! Generate category configs use case
//!
//! Discovers the categories declared by the producer's files and makes sure
//! each one has a cap entry and an enabled entry in the registry, then
//! persists the store.
//!
//! # Retry
//!
//! Finding no categories, or failing to create or save an entry, counts as a
//! failed attempt. Attempts are tracked by a [`RetryBudget`] of
//! [`MAX_GENERATION_ATTEMPTS`]. The use case does not schedule anything
//! itself: the caller checks [`GenerateCategoriesUseCase::can_retry`] and
//! either waits on its own timer or calls
//! [`GenerateCategoriesUseCase::immediate_retry`].
//!
//! ```text
//! generate() ── ok ──────────────────────────► budget reset, true
//!     │
//!     └─ fail ─► attempts += 1 ─┬─ attempts < max ─► false (can_retry)
//!                               └─ attempts = max ─► error logged, false
//!                                                    (next generate() starts
//!                                                     with a fresh budget)
//! ```

use super::discover_categories::DiscoverCategoriesUseCase;
use crate::ports::category_source::CategorySourcePort;
use crate::registry::{CategoryConfigRegistry, RegistryError};
use quotacap_domain::{CategoryName, CategoryWord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Attempts allowed before a generation run is reported as failed.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// Errors that make a generation attempt fail.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No categories found for word '{word}'")]
    NoCategoriesFound { word: String },

    #[error("Failed to create config for category {category}: {source}")]
    CreateFailed {
        category: String,
        #[source]
        source: RegistryError,
    },

    #[error("Failed to save category configs: {0}")]
    SaveFailed(#[source] RegistryError),
}

/// Bounded counter of consecutive failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    attempts: u32,
    max_attempts: u32,
}

impl RetryBudget {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
        }
    }

    /// Failed attempts since the last success or reset
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Attempts left before the budget is exhausted
    pub fn remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts)
    }

    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }

    pub fn is_exhausted(&self) -> bool {
        !self.can_retry()
    }

    /// Count a failed attempt and return the new attempt count.
    pub fn record_failure(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1).min(self.max_attempts);
        self.attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(MAX_GENERATION_ATTEMPTS)
    }
}

/// Output of a successful generation attempt
#[derive(Debug, Clone)]
pub struct GenerateCategoriesOutput {
    pub word: CategoryWord,
    pub categories: Vec<CategoryName>,
}

/// Use case for materializing per-category configs
pub struct GenerateCategoriesUseCase {
    discovery: DiscoverCategoriesUseCase,
    retry: RetryBudget,
}

impl GenerateCategoriesUseCase {
    pub fn new(source: Arc<dyn CategorySourcePort>) -> Self {
        Self {
            discovery: DiscoverCategoriesUseCase::new(source),
            retry: RetryBudget::default(),
        }
    }

    /// Use a retry budget other than [`MAX_GENERATION_ATTEMPTS`].
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry = RetryBudget::new(max_attempts);
        self
    }

    pub fn retry_budget(&self) -> RetryBudget {
        self.retry
    }

    /// Whether another attempt is allowed before the budget runs out
    pub fn can_retry(&self) -> bool {
        self.retry.can_retry()
    }

    /// Run one generation attempt.
    ///
    /// Returns `true` only if at least one category was found and every
    /// entry was created and saved. Failures are logged and counted against
    /// the retry budget; they are never returned to the caller.
    pub fn execute(&mut self, registry: &mut CategoryConfigRegistry) -> bool {
        if self.retry.is_exhausted() {
            info!("Starting category generation with a fresh retry budget");
            self.retry.reset();
        }

        match self.try_generate(registry) {
            Ok(output) => {
                self.retry.reset();
                info!(
                    word = %output.word,
                    count = output.categories.len(),
                    "Generated category configs"
                );
                true
            }
            Err(e) => {
                self.handle_failure(&e);
                false
            }
        }
    }

    /// Run one more attempt right away, if the budget allows it.
    pub fn immediate_retry(&mut self, registry: &mut CategoryConfigRegistry) -> bool {
        if !self.retry.can_retry() {
            warn!("Category generation retry budget exhausted; not retrying");
            return false;
        }
        info!(
            attempt = self.retry.attempts() + 1,
            max = self.retry.max_attempts(),
            "Retrying category generation"
        );
        self.execute(registry)
    }

    fn try_generate(
        &self,
        registry: &mut CategoryConfigRegistry,
    ) -> Result<GenerateCategoriesOutput, GenerationError> {
        let (word, categories) = self.discovery.execute();

        if categories.is_empty() {
            return Err(GenerationError::NoCategoriesFound {
                word: word.to_string(),
            });
        }

        for name in &categories {
            registry
                .ensure_category(name)
                .map_err(|source| GenerationError::CreateFailed {
                    category: name.to_string(),
                    source,
                })?;
        }

        registry.save().map_err(GenerationError::SaveFailed)?;

        Ok(GenerateCategoriesOutput { word, categories })
    }

    fn handle_failure(&mut self, e: &GenerationError) {
        let attempt = self.retry.record_failure();
        if self.retry.can_retry() {
            warn!(
                attempt,
                max = self.retry.max_attempts(),
                "Category generation failed, retry available: {}",
                e
            );
        } else {
            error!(
                attempts = attempt,
                "Category generation failed after all attempts: {}", e
            );
        }
    }
}
