//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters and the
//! embedding host must implement.

pub mod active_category;
pub mod category_source;
pub mod config_store;
