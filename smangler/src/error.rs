//! All error types for the smangler crate.
//!
//! These are returned from all fallible operations (loading, parsing, merging, writing, etc.).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("source and destination are the same directory: {}", .0.display())]
    SameDirectory(PathBuf),

    #[error("a name pattern is required for this operation")]
    MissingPattern,
}

impl Error {
    /// Attaches the offending file to a parse failure.
    pub(crate) fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            Error::InvalidResource(msg) => {
                Error::InvalidResource(format!("{}: {}", path.display(), msg))
            }
            other => other,
        }
    }
}
