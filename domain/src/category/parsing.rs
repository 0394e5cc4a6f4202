//! Category discovery parsing.
//!
//! These functions extract the category vocabulary and the category names
//! from the text of the producer's generated files. They are pure domain
//! logic: no I/O, just line matching.
//!
//! # Functions
//!
//! | Function | Input | Looks for |
//! |----------|-------|-----------|
//! | [`parse_category_word`] | word file | `ConstellationWord = <word>` |
//! | [`parse_category_names`] | section file | `[<word> <name>]` |

use super::name::{CATEGORY_WORD_MARKER, CategoryName, CategoryWord};
use std::collections::HashSet;

/// Find the category word override in the word file content.
///
/// Returns the trimmed remainder of the first line that starts with
/// [`CATEGORY_WORD_MARKER`]. Returns `None` when no line matches or the
/// first matching line has an empty value; callers fall back to
/// [`CategoryWord::default`].
///
/// # Examples
///
/// ```
/// use quotacap_domain::category::parse_category_word;
///
/// let content = "SomeOtherKey = 1\nConstellationWord = Sector\n";
/// assert_eq!(parse_category_word(content).unwrap().as_str(), "Sector");
/// assert!(parse_category_word("Unrelated = value").is_none());
/// ```
pub fn parse_category_word(content: &str) -> Option<CategoryWord> {
    strip_bom(content)
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix(CATEGORY_WORD_MARKER))
        .and_then(|value| CategoryWord::try_new(value).ok())
}

/// Extract every category name declared by a `[<word> <name>]` header.
///
/// Names come back in file order. Lines that do not start with the word's
/// header prefix are ignored, as are headers with no closing `]`, headers
/// whose name is blank, and repeats of a name already seen.
///
/// # Examples
///
/// ```
/// use quotacap_domain::category::{CategoryWord, parse_category_names};
///
/// let word = CategoryWord::try_new("Sector").unwrap();
/// let content = "[Sector Alpha]\nkey = 1\n[Sector Beta]\n";
/// let names: Vec<_> = parse_category_names(content, &word)
///     .into_iter()
///     .map(String::from)
///     .collect();
/// assert_eq!(names, vec!["Alpha", "Beta"]);
/// ```
pub fn parse_category_names(content: &str, word: &CategoryWord) -> Vec<CategoryName> {
    let prefix = word.section_prefix();
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for line in strip_bom(content).lines() {
        let Some(rest) = line.trim().strip_prefix(prefix.as_str()) else {
            continue;
        };
        let Some(end) = rest.rfind(']') else {
            continue;
        };
        let Ok(name) = CategoryName::try_new(&rest[..end]) else {
            continue;
        };
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

/// Drop a leading UTF-8 byte order mark; `trim` does not treat it as
/// whitespace.
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{FEFF}').unwrap_or(content)
}
