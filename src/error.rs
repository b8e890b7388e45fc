//! Error type shared by every library module.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnaError {
    /// Rejected argument (zero length, empty identifier, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `RecordStore::add` hit an existing identifier and no resolution was given.
    #[error("sequence with id '{0}' already exists")]
    DuplicateIdentifier(String),

    /// The raw sequence does not start with one of A, C, G, T.
    #[error("no leading marker symbol (found {})", describe_found(.found))]
    MarkerNotFound { found: Option<char> },

    #[error("record header has an empty identifier")]
    EmptyIdentifier,

    #[error("cannot compute statistics of a sequence without A, C, G or T")]
    EmptySequenceStatistics,

    #[error("marker position {position} is past the end of a {len}-symbol sequence")]
    MarkerPositionOutOfRange { position: usize, len: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{c}'"),
        None => "empty sequence".to_string(),
    }
}

impl DnaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DnaError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DnaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_not_found_messages() {
        let e = DnaError::MarkerNotFound { found: Some('x') };
        assert_eq!(e.to_string(), "no leading marker symbol (found 'x')");
        let e = DnaError::MarkerNotFound { found: None };
        assert_eq!(e.to_string(), "no leading marker symbol (found empty sequence)");
    }

    #[test]
    fn io_error_names_path() {
        let e = DnaError::io("fasta_files/a.fasta", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(e.to_string().starts_with("I/O error on fasta_files/a.fasta"));
    }
}
