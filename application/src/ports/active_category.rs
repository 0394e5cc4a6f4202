//! Host query port for the currently active category.
//!
//! The host owns the notion of "where the player currently is". The policy
//! engine only needs to read it at call time, so the host hands in anything
//! implementing [`ActiveCategoryQuery`] instead of the engine reaching for a
//! global.

/// Read-only access to the host's currently active category.
pub trait ActiveCategoryQuery {
    /// Name of the active category, or `None` when the host is outside any.
    fn active_category(&self) -> Option<String>;
}

impl<F> ActiveCategoryQuery for F
where
    F: Fn() -> Option<String>,
{
    fn active_category(&self) -> Option<String> {
        self()
    }
}

/// A query that always reports the same category.
#[derive(Debug, Clone, Default)]
pub struct FixedActiveCategory(Option<String>);

impl FixedActiveCategory {
    pub fn new(category: Option<String>) -> Self {
        Self(category)
    }

    /// No category is active
    pub fn none() -> Self {
        Self(None)
    }
}

impl ActiveCategoryQuery for FixedActiveCategory {
    fn active_category(&self) -> Option<String> {
        self.0.clone()
    }
}
