//! Category source reading from the local file system.

use quotacap_application::{CategorySourcePort, SourceError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Category source backed by two files on disk.
///
/// A missing file reads as `Ok(None)`; any other I/O failure is returned as
/// [`SourceError::Io`] with the path attached.
#[derive(Debug, Clone)]
pub struct FsCategorySource {
    word_file: PathBuf,
    section_file: PathBuf,
}

impl FsCategorySource {
    pub fn new(word_file: impl Into<PathBuf>, section_file: impl Into<PathBuf>) -> Self {
        Self {
            word_file: word_file.into(),
            section_file: section_file.into(),
        }
    }

    pub fn word_file(&self) -> &Path {
        &self.word_file
    }

    pub fn section_file(&self) -> &Path {
        &self.section_file
    }

    fn read_optional(path: &Path) -> Result<Option<String>, SourceError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Read category source: {:?}", path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

impl CategorySourcePort for FsCategorySource {
    fn read_word_file(&self) -> Result<Option<String>, SourceError> {
        Self::read_optional(&self.word_file)
    }

    fn read_section_file(&self) -> Result<Option<String>, SourceError> {
        Self::read_optional(&self.section_file)
    }

    fn word_file_location(&self) -> String {
        self.word_file.display().to_string()
    }

    fn section_file_location(&self) -> String {
        self.section_file.display().to_string()
    }
}
