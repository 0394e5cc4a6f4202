//! Clamp rule for a single category.
//!
//! [`apply_cap`] covers the part of the quota policy that only depends on a
//! category's own settings. Looking the settings up (and deciding what to do
//! when there is no active category) is the application layer's job.

use super::value::{DEFAULT_CAP, DEFAULT_ENABLED, DISABLED_SENTINEL, classify_quota_value};
use serde::{Deserialize, Serialize};

/// Cap settings of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapSettings {
    /// Maximum quota, or `-1` for no cap
    pub cap: i64,
    /// Whether the cap is applied at all
    pub enabled: bool,
}

impl CapSettings {
    pub fn new(cap: i64, enabled: bool) -> Self {
        Self { cap, enabled }
    }
}

impl Default for CapSettings {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            enabled: DEFAULT_ENABLED,
        }
    }
}

/// What the clamp rule did with a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampOutcome {
    /// The category's toggle is off
    Disabled,
    /// The cap holds the `-1` sentinel
    Uncapped,
    /// The raw value was at or below the cap
    WithinCap,
    /// The raw value exceeded the cap and was lowered to it
    Clamped,
}

/// Result of applying a category's settings to a raw quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampDecision {
    /// Value to hand back to the host
    pub value: i64,
    pub outcome: ClampOutcome,
    /// Cap actually compared against, if any
    pub effective_cap: Option<i64>,
    /// The configured cap was invalid and [`DEFAULT_CAP`] was used instead
    pub cap_replaced: bool,
}

impl ClampDecision {
    fn unchanged(raw: i64, outcome: ClampOutcome) -> Self {
        Self {
            value: raw,
            outcome,
            effective_cap: None,
            cap_replaced: false,
        }
    }

    /// Whether the returned value differs from the raw input
    pub fn modified(&self) -> bool {
        self.outcome == ClampOutcome::Clamped
    }
}

/// Apply a category's cap settings to a raw quota.
///
/// The checks run in a fixed order: a disabled toggle wins, then the `-1`
/// sentinel, then an invalid cap is swapped for [`DEFAULT_CAP`], and finally
/// the raw value is lowered to the cap if it exceeds it.
///
/// # Examples
///
/// ```
/// use quotacap_domain::cap::{CapSettings, ClampOutcome, apply_cap};
///
/// let decision = apply_cap(CapSettings::new(100, true), 250);
/// assert_eq!(decision.value, 100);
/// assert_eq!(decision.outcome, ClampOutcome::Clamped);
///
/// let decision = apply_cap(CapSettings::new(100, false), 250);
/// assert_eq!(decision.value, 250);
/// ```
pub fn apply_cap(settings: CapSettings, raw: i64) -> ClampDecision {
    if !settings.enabled {
        return ClampDecision::unchanged(raw, ClampOutcome::Disabled);
    }
    if settings.cap == DISABLED_SENTINEL {
        return ClampDecision::unchanged(raw, ClampOutcome::Uncapped);
    }

    let cap_replaced = !classify_quota_value(settings.cap).is_valid();
    let cap = if cap_replaced { DEFAULT_CAP } else { settings.cap };

    let (value, outcome) = if raw > cap {
        (cap, ClampOutcome::Clamped)
    } else {
        (raw, ClampOutcome::WithinCap)
    };

    ClampDecision {
        value,
        outcome,
        effective_cap: Some(cap),
        cap_replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CapSettings::default();
        assert_eq!(settings.cap, 4000);
        assert!(settings.enabled);
    }

    #[test]
    fn test_disabled_returns_raw() {
        for raw in [-10, 0, 5000, i64::MAX] {
            let decision = apply_cap(CapSettings::new(100, false), raw);
            assert_eq!(decision.value, raw);
            assert_eq!(decision.outcome, ClampOutcome::Disabled);
        }
    }

    #[test]
    fn test_sentinel_returns_raw() {
        for raw in [0, 4001, i64::MAX] {
            let decision = apply_cap(CapSettings::new(-1, true), raw);
            assert_eq!(decision.value, raw);
            assert_eq!(decision.outcome, ClampOutcome::Uncapped);
            assert_eq!(decision.effective_cap, None);
        }
    }

    #[test]
    fn test_disabled_takes_precedence_over_sentinel() {
        let decision = apply_cap(CapSettings::new(-1, false), 10);
        assert_eq!(decision.outcome, ClampOutcome::Disabled);
    }

    #[test]
    fn test_clamps_to_min() {
        for (cap, raw) in [(0, 1), (100, 100), (100, 99), (100, 101), (4000, 10_000)] {
            let decision = apply_cap(CapSettings::new(cap, true), raw);
            assert_eq!(decision.value, raw.min(cap));
        }
    }

    #[test]
    fn test_equal_is_within_cap() {
        let decision = apply_cap(CapSettings::new(100, true), 100);
        assert_eq!(decision.outcome, ClampOutcome::WithinCap);
        assert!(!decision.modified());
    }

    #[test]
    fn test_invalid_cap_uses_default() {
        let decision = apply_cap(CapSettings::new(-7, true), 5000);
        assert!(decision.cap_replaced);
        assert_eq!(decision.effective_cap, Some(DEFAULT_CAP));
        assert_eq!(decision.value, DEFAULT_CAP);
        assert!(decision.modified());

        let decision = apply_cap(CapSettings::new(-7, true), 10);
        assert_eq!(decision.value, 10);
    }

    #[test]
    fn test_serialize_settings() {
        let json = serde_json::to_string(&CapSettings::new(50, false)).unwrap();
        assert_eq!(json, r#"{"cap":50,"enabled":false}"#);
    }
}
