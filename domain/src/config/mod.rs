//! Configuration key layout for the cap store
//!
//! These are domain concepts describing where category settings live in the
//! persisted key/value store. Formatting only; persistence is elsewhere.

mod config_key;

pub use config_key::{
    ConfigKeyInfo, DEBUG_LOGGING_KEY, Section, cap_description, cap_key, enabled_description,
    enabled_key, lookup_key,
};
