//! Application layer for quotacap
//!
//! This crate contains use cases, port definitions, and the category
//! registry. It depends only on the domain layer.

pub mod ports;
pub mod registry;
pub mod service;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    active_category::{ActiveCategoryQuery, FixedActiveCategory},
    category_source::{CategorySourcePort, SourceError},
    config_store::{ConfigStoreError, ConfigStorePort, ConfigValue, MemoryConfigStore},
};
pub use registry::{CategoryConfigRegistry, RegistryError};
pub use service::QuotaCapService;
pub use use_cases::clamp_quota::{ClampQuotaUseCase, validate_quota_value};
pub use use_cases::discover_categories::DiscoverCategoriesUseCase;
pub use use_cases::generate_categories::{
    GenerateCategoriesOutput, GenerateCategoriesUseCase, GenerationError, MAX_GENERATION_ATTEMPTS,
    RetryBudget,
};
