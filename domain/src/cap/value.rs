//! Cap value constants and classification

/// Cap given to a category when its entry is first created.
pub const DEFAULT_CAP: i64 = 4000;

/// Enabled flag given to a category when its entry is first created.
pub const DEFAULT_ENABLED: bool = true;

/// Cap value meaning "no cap" for a category.
pub const DISABLED_SENTINEL: i64 = -1;

/// Caps above this are accepted but reported as suspicious.
pub const SOFT_CEILING: i64 = 1_000_000;

/// Classification of a candidate cap value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaValidation {
    /// The `-1` sentinel (uncapped)
    Sentinel,
    /// Zero up to and including [`SOFT_CEILING`]
    InRange,
    /// Valid, but above [`SOFT_CEILING`]
    AboveSoftCeiling,
    /// Negative and not the sentinel
    Invalid,
}

impl QuotaValidation {
    /// Whether the value may be stored as a cap
    pub fn is_valid(self) -> bool {
        !matches!(self, QuotaValidation::Invalid)
    }

    /// Whether the value deserves a diagnostic warning even though it is valid
    pub fn is_flagged(self) -> bool {
        matches!(self, QuotaValidation::AboveSoftCeiling)
    }
}

/// Classify a cap value.
///
/// # Examples
///
/// ```
/// use quotacap_domain::cap::{QuotaValidation, classify_quota_value};
///
/// assert_eq!(classify_quota_value(-1), QuotaValidation::Sentinel);
/// assert_eq!(classify_quota_value(-2), QuotaValidation::Invalid);
/// assert!(classify_quota_value(1_000_001).is_valid());
/// ```
pub fn classify_quota_value(value: i64) -> QuotaValidation {
    match value {
        DISABLED_SENTINEL => QuotaValidation::Sentinel,
        v if v < 0 => QuotaValidation::Invalid,
        v if v > SOFT_CEILING => QuotaValidation::AboveSoftCeiling,
        _ => QuotaValidation::InRange,
    }
}
