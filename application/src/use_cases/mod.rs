//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod clamp_quota;
pub mod discover_categories;
pub mod generate_categories;
