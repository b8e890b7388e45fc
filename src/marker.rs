//! Recovery of the hidden marker from persisted sequence text.
//!
//! Only a single leading `A`, `C`, `G` or `T` is taken as the marker and
//! stripped; a longer marker inserted by [`crate::generator::insert_marker`]
//! is *not* searched for and its remainder stays in the cleaned sequence.
//! Round-tripping a record therefore keeps `sequence_with_marker` intact but
//! generally not the original marker.
use crate::error::{DnaError, Result};
use crate::record::ALPHABET;

/// What [`extract`] recovered from a raw sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredMarker {
    pub marker: char,
    /// Always 0: the match is anchored at the start of the text.
    pub position: usize,
    pub cleaned: String,
}

pub fn extract(raw: &str) -> Result<RecoveredMarker> {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if ALPHABET.contains(&c) => Ok(RecoveredMarker {
            marker: c,
            position: 0,
            cleaned: chars.as_str().to_string(),
        }),
        found => Err(DnaError::MarkerNotFound { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_leading_symbol() {
        let m = extract("GATTACA").unwrap();
        assert_eq!(m, RecoveredMarker { marker: 'G', position: 0, cleaned: "ATTACA".into() });
    }

    #[test]
    fn multi_char_marker_is_not_removed() {
        // "Anna" was inserted at 0; only the 'A' comes back
        let m = extract("AnnaCGT").unwrap();
        assert_eq!(m.marker, 'A');
        assert_eq!(m.cleaned, "nnaCGT");
    }

    #[test]
    fn lowercase_digit_and_empty_fail() {
        assert!(matches!(extract("acgt"), Err(DnaError::MarkerNotFound { found: Some('a') })));
        assert!(matches!(extract("7ACGT"), Err(DnaError::MarkerNotFound { found: Some('7') })));
        assert!(matches!(extract(""), Err(DnaError::MarkerNotFound { found: None })));
    }

    #[test]
    fn single_symbol_leaves_empty_sequence() {
        let m = extract("T").unwrap();
        assert_eq!(m.cleaned, "");
    }
}
