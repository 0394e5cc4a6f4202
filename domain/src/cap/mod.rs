//! Quota caps and the clamping rule.
//!
//! - [`value`]: cap constants and value classification
//! - [`policy`]: [`CapSettings`] and the pure clamp rule applied to a raw quota

pub mod policy;
pub mod value;

pub use policy::{CapSettings, ClampDecision, ClampOutcome, apply_cap};
pub use value::{
    DEFAULT_CAP, DEFAULT_ENABLED, DISABLED_SENTINEL, QuotaValidation, SOFT_CEILING,
    classify_quota_value,
};
