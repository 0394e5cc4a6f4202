//! Discover categories use case
//!
//! Reads the producer's word file and section file through a
//! [`CategorySourcePort`] and turns them into a [`CategoryWord`] and a list
//! of [`CategoryName`]s.
//!
//! Discovery never fails outward. A missing file falls back to a default
//! (the default word, or no categories) with a warning, and a read error is
//! logged and treated the same way.

use crate::ports::category_source::CategorySourcePort;
use quotacap_domain::{CategoryName, CategoryWord, parse_category_names, parse_category_word};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for discovering category names from the producer's files
#[derive(Clone)]
pub struct DiscoverCategoriesUseCase {
    source: Arc<dyn CategorySourcePort>,
}

impl DiscoverCategoriesUseCase {
    pub fn new(source: Arc<dyn CategorySourcePort>) -> Self {
        Self { source }
    }

    /// Resolve the word used in category section headers.
    ///
    /// Falls back to [`CategoryWord::default`] when the word file is absent,
    /// unreadable, or has no `ConstellationWord = ` line.
    pub fn resolve_category_word(&self) -> CategoryWord {
        let content = match self.source.read_word_file() {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!(
                    "Category word file not found at {}, using default word",
                    self.source.word_file_location()
                );
                return CategoryWord::default();
            }
            Err(e) => {
                warn!("Could not read category word file, using default word: {}", e);
                return CategoryWord::default();
            }
        };

        match parse_category_word(&content) {
            Some(word) => {
                info!(word = %word, "Resolved category word");
                word
            }
            None => {
                debug!(
                    "No category word override in {}, using default",
                    self.source.word_file_location()
                );
                CategoryWord::default()
            }
        }
    }

    /// Collect the category names declared with `word` in the section file.
    ///
    /// Returns an empty list when the section file is absent or unreadable.
    pub fn parse_category_names(&self, word: &CategoryWord) -> Vec<CategoryName> {
        let content = match self.source.read_section_file() {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!(
                    "Category section file not found at {}",
                    self.source.section_file_location()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read category section file: {}", e);
                return Vec::new();
            }
        };

        let names = parse_category_names(&content, word);
        debug!(word = %word, count = names.len(), "Parsed category names");
        names
    }

    /// Resolve the word and parse the names in one step.
    pub fn execute(&self) -> (CategoryWord, Vec<CategoryName>) {
        let word = self.resolve_category_word();
        let names = self.parse_category_names(&word);
        (word, names)
    }
}
