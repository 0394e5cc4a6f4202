//! Category name and category word value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Word used in section headers when the producer does not override it.
pub const DEFAULT_CATEGORY_WORD: &str = "Constellation";

/// Line prefix in the word file that carries the vocabulary override.
pub const CATEGORY_WORD_MARKER: &str = "ConstellationWord = ";

/// Name of a single category (Value Object)
///
/// Always non-empty and trimmed. Used as the key for both the cap and the
/// enabled flag of a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Try to create a category name, rejecting empty or blank input
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCategoryName);
        }
        if trimmed.len() == name.len() {
            Ok(Self(name))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for CategoryName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

/// Vocabulary word prefixing every category section header
///
/// `Constellation` unless the producer's word file overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWord(String);

impl CategoryWord {
    /// Try to create a category word, rejecting empty or blank input
    pub fn try_new(word: impl Into<String>) -> Result<Self, DomainError> {
        let word = word.into();
        let trimmed = word.trim();
        if trimmed.is_empty() {
            Err(DomainError::EmptyCategoryWord)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Get the word as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header prefix for this word, e.g. `"[Constellation "`
    pub fn section_prefix(&self) -> String {
        format!("[{} ", self.0)
    }

    /// Whether this is the built-in default word
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CATEGORY_WORD
    }
}

impl Default for CategoryWord {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY_WORD.to_string())
    }
}

impl std::fmt::Display for CategoryWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
