use serde::Serialize;

use crate::error::{DnaError, Result};

/// Symbols a generated sequence is drawn from.
pub const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

/// A synthetic sequence together with the marker hidden inside it.
///
/// `sequence_with_marker` is always `clean_sequence` with `marker_text`
/// spliced in at `marker_position` (counted in characters), and it is the
/// exact text written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceRecord {
    identifier: String,
    description: String,
    clean_sequence: String,
    sequence_with_marker: String,
    marker_text: String,
    marker_position: usize,
}

impl SequenceRecord {
    /// Build a record, splicing the marker into the clean sequence.
    pub fn new(
        identifier: impl Into<String>,
        description: impl Into<String>,
        clean_sequence: impl Into<String>,
        marker_text: impl Into<String>,
        marker_position: usize,
    ) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() { return Err(DnaError::EmptyIdentifier); }
        let clean_sequence = clean_sequence.into();
        let marker_text = marker_text.into();
        let len = clean_sequence.chars().count();
        if marker_position > len {
            return Err(DnaError::MarkerPositionOutOfRange { position: marker_position, len });
        }
        let sequence_with_marker = splice(&clean_sequence, &marker_text, marker_position);
        Ok(Self {
            identifier,
            description: description.into(),
            clean_sequence,
            sequence_with_marker,
            marker_text,
            marker_position,
        })
    }

    pub fn identifier(&self) -> &str { &self.identifier }

    pub fn description(&self) -> &str { &self.description }

    /// Sequence with the marker removed; statistics are computed on this.
    pub fn clean_sequence(&self) -> &str { &self.clean_sequence }

    /// Persisted form: clean sequence with the marker embedded.
    pub fn sequence_with_marker(&self) -> &str { &self.sequence_with_marker }

    pub fn marker_text(&self) -> &str { &self.marker_text }

    pub fn marker_position(&self) -> usize { self.marker_position }
}

/// Insert `marker` into `sequence` before the character at `position`.
/// Positions past the end append.
pub(crate) fn splice(sequence: &str, marker: &str, position: usize) -> String {
    let at = sequence.char_indices().nth(position).map(|(i, _)| i).unwrap_or(sequence.len());
    let mut out = String::with_capacity(sequence.len() + marker.len());
    out.push_str(&sequence[..at]);
    out.push_str(marker);
    out.push_str(&sequence[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_splices_marker() {
        let r = SequenceRecord::new("s1", "test", "ACGTACGT", "Anna", 3).unwrap();
        assert_eq!(r.sequence_with_marker(), "ACGAnnaTACGT");
        assert_eq!(r.clean_sequence(), "ACGTACGT");
        assert_eq!(r.marker_position(), 3);
    }

    #[test]
    fn splice_at_both_ends() {
        assert_eq!(splice("ACGT", "x", 0), "xACGT");
        assert_eq!(splice("ACGT", "x", 4), "ACGTx");
        assert_eq!(splice("", "x", 0), "x");
    }

    #[test]
    fn splice_counts_characters_not_bytes() {
        // recovered sequences may carry non-ASCII leftovers of a marker
        assert_eq!(splice("ŁuCG", "A", 2), "ŁuACG");
    }

    #[test]
    fn rejects_bad_position_and_empty_id() {
        assert!(matches!(
            SequenceRecord::new("s1", "", "ACG", "x", 4),
            Err(DnaError::MarkerPositionOutOfRange { position: 4, len: 3 })
        ));
        assert!(matches!(SequenceRecord::new("", "", "ACG", "x", 0), Err(DnaError::EmptyIdentifier)));
    }

    #[test]
    fn serializes_the_spliced_form() {
        // records are only ever written out; reading goes through `new`
        let r = SequenceRecord::new("s1", "d", "ACGT", "x", 2).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["identifier"], "s1");
        assert_eq!(v["sequence_with_marker"], "ACxGT");
        assert_eq!(v["marker_position"], 2);
    }
}
