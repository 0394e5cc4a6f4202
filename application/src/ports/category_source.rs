//! Category source port.
//!
//! Gives the discovery use case access to the two files written by the
//! producing application: the word file (which may override the category
//! vocabulary) and the section file (which declares one section per
//! category). Absence of either file is not an error and is reported as
//! `Ok(None)`.

use thiserror::Error;

/// Errors from reading a category source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Port for reading the producer's generated files.
pub trait CategorySourcePort: Send + Sync {
    /// Content of the word file, or `None` if it does not exist.
    fn read_word_file(&self) -> Result<Option<String>, SourceError>;

    /// Content of the section file, or `None` if it does not exist.
    fn read_section_file(&self) -> Result<Option<String>, SourceError>;

    /// Human-readable location of the word file, for diagnostics.
    fn word_file_location(&self) -> String;

    /// Human-readable location of the section file, for diagnostics.
    fn section_file_location(&self) -> String;
}
