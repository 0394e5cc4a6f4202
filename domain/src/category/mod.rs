//! Categories discovered from the external section file.
//!
//! A category is identified by a [`CategoryName`] extracted from headers
//! of the form `[<word> <name>]`, where `<word>` is the [`CategoryWord`]
//! the producing application uses as its vocabulary.
//!
//! Parsing lives in [`parsing`]; it is pure text matching with no I/O.

pub mod name;
pub mod parsing;

pub use name::{CATEGORY_WORD_MARKER, CategoryName, CategoryWord, DEFAULT_CATEGORY_WORD};
pub use parsing::{parse_category_names, parse_category_word};
