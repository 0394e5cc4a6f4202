//! Domain layer for quotacap
//!
//! This crate contains the core value objects and rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Categories
//!
//! A category is a named section of the producer's generated config file,
//! declared by a `[<word> <name>]` header. Each category gets a cap and an
//! enabled flag.
//!
//! ## Caps
//!
//! The host recomputes a quota periodically. While a category is active and
//! its cap applies, the quota is lowered to the cap. A cap of `-1` means
//! "no cap".

pub mod cap;
pub mod category;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use cap::{
    CapSettings, ClampDecision, ClampOutcome, DEFAULT_CAP, DEFAULT_ENABLED, DISABLED_SENTINEL,
    QuotaValidation, SOFT_CEILING, apply_cap, classify_quota_value,
};
pub use category::{
    CATEGORY_WORD_MARKER, CategoryName, CategoryWord, DEFAULT_CATEGORY_WORD,
    parse_category_names, parse_category_word,
};
pub use config::{Section, cap_key, enabled_key};
pub use core::error::DomainError;
