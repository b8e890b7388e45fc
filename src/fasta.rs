//! Reader and writer for the FASTA-like text format.
//!
//! ```text
//! >IDENTIFIER DESCRIPTION
//! SEQUENCE_LINE_1
//! SEQUENCE_LINE_2
//! ```
//!
//! Writing emits each sequence (marker included) on a single line. Reading
//! joins every non-blank line after a header until the next header, then
//! recovers the marker with [`crate::marker::extract`]. Entries whose marker
//! cannot be recovered are dropped with a diagnostic and the rest of the
//! input still loads.
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DnaError, Result};
use crate::marker;
use crate::record::SequenceRecord;
use crate::store::{AddOutcome, RecordStore, Resolution};

/// One header plus its accumulated sequence text, before marker recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub identifier: String,
    pub description: String,
    pub raw_sequence: String,
}

impl RawEntry {
    fn from_header(header: &str) -> Self {
        let (identifier, description) = header.split_once(' ').unwrap_or((header, ""));
        Self { identifier: identifier.to_string(), description: description.to_string(), raw_sequence: String::new() }
    }

    /// Recover the marker and build the record. Fails when the identifier is
    /// empty or the sequence does not start with A, C, G or T.
    pub fn into_record(self) -> Result<SequenceRecord> {
        if self.identifier.is_empty() {
            return Err(DnaError::EmptyIdentifier);
        }
        let recovered = marker::extract(&self.raw_sequence)?;
        let record = SequenceRecord::new(
            self.identifier,
            self.description,
            recovered.cleaned,
            recovered.marker.to_string(),
            recovered.position,
        )?;
        debug_assert_eq!(record.sequence_with_marker(), self.raw_sequence);
        Ok(record)
    }
}

/// Write records in store order.
pub fn serialize(records: &[SequenceRecord]) -> String {
    let mut out = String::new();
    for r in records {
        out.push('>');
        out.push_str(r.identifier());
        if !r.description().is_empty() {
            out.push(' ');
            out.push_str(r.description());
        }
        out.push('\n');
        out.push_str(r.sequence_with_marker());
        out.push('\n');
    }
    out
}

enum State {
    NoRecord,
    InRecord(RawEntry),
}

/// Split text into header/sequence entries. No marker recovery happens here.
pub fn parse(text: &str) -> Vec<RawEntry> {
    let mut entries = Vec::new();
    let mut state = State::NoRecord;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue; }
        if let Some(header) = line.strip_prefix('>') {
            if let State::InRecord(done) = std::mem::replace(&mut state, State::NoRecord) {
                entries.push(done);
            }
            state = State::InRecord(RawEntry::from_header(header));
            continue;
        }
        match &mut state {
            State::InRecord(entry) => entry.raw_sequence.push_str(line),
            State::NoRecord => warn!(line = lineno + 1, "sequence line before any header ignored"),
        }
    }
    if let State::InRecord(done) = state {
        entries.push(done);
    }
    debug!(entries = entries.len(), "parsed fasta text");
    entries
}

/// What happened to one entry of a loaded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoadOutcome {
    Stored(AddOutcome),
    /// The entry could not become a record; the reason is kept for display.
    Discarded(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadEntry {
    pub identifier: String,
    pub outcome: LoadOutcome,
    /// The record as it was stored by this entry; `None` when skipped or
    /// discarded. Later entries may overwrite it in the store.
    pub stored: Option<SequenceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub entries: Vec<LoadEntry>,
}

impl LoadReport {
    fn count(&self, want: &LoadOutcome) -> usize {
        self.entries.iter().filter(|e| &e.outcome == want).count()
    }

    pub fn added(&self) -> usize { self.count(&LoadOutcome::Stored(AddOutcome::Added)) }

    pub fn overwritten(&self) -> usize { self.count(&LoadOutcome::Stored(AddOutcome::Overwritten)) }

    pub fn skipped(&self) -> usize { self.count(&LoadOutcome::Stored(AddOutcome::Skipped)) }

    pub fn discarded(&self) -> usize {
        self.entries.iter().filter(|e| matches!(e.outcome, LoadOutcome::Discarded(_))).count()
    }
}

/// Parse `text` and put every recoverable entry into `store`, in file order.
///
/// `resolve` is called once per entry whose identifier is already stored,
/// including identifiers repeated inside `text` itself.
pub fn load_into<F>(store: &mut RecordStore, text: &str, mut resolve: F) -> LoadReport
where
    F: FnMut(&SequenceRecord, &SequenceRecord) -> Resolution,
{
    let mut report = LoadReport::default();
    for entry in parse(text) {
        let identifier = entry.identifier.clone();
        let (outcome, stored) = match entry.into_record() {
            Ok(record) => {
                let snapshot = record.clone();
                match store.insert_with(record, &mut resolve) {
                    AddOutcome::Skipped => (LoadOutcome::Stored(AddOutcome::Skipped), None),
                    kept => (LoadOutcome::Stored(kept), Some(snapshot)),
                }
            }
            Err(e) => {
                warn!(identifier = identifier.as_str(), error = %e, "discarding record");
                (LoadOutcome::Discarded(e.to_string()), None)
            }
        };
        report.entries.push(LoadEntry { identifier, outcome, stored });
    }
    info!(
        added = report.added(),
        overwritten = report.overwritten(),
        skipped = report.skipped(),
        discarded = report.discarded(),
        "load finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip_all(_: &SequenceRecord, _: &SequenceRecord) -> Resolution { Resolution::Skip }

    #[test]
    fn serialize_header_and_single_line() {
        let a = SequenceRecord::new("s1", "my seq", "ACGTACGT", "Ola", 4).unwrap();
        let b = SequenceRecord::new("s2", "", "TT", "", 0).unwrap();
        assert_eq!(serialize(&[a, b]), ">s1 my seq\nACGTOlaACGT\n>s2\nTT\n");
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn parse_joins_multiline_and_skips_blanks() {
        let text = ">X1 first record\nACGT\n\nTTGG\n   \n>X2\nCC\n";
        let entries = parse(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, "X1");
        assert_eq!(entries[0].description, "first record");
        assert_eq!(entries[0].raw_sequence, "ACGTTTGG");
        assert_eq!(entries[1].identifier, "X2");
        assert_eq!(entries[1].description, "");
        assert_eq!(entries[1].raw_sequence, "CC");
    }

    #[test]
    fn parse_handles_crlf_and_missing_final_newline() {
        let entries = parse(">a d\r\nAC\r\nGT");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "d");
        assert_eq!(entries[0].raw_sequence, "ACGT");
    }

    #[test]
    fn parse_ignores_lines_before_first_header() {
        let entries = parse("GGGG\n>a\nAC\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_sequence, "AC");
        assert!(parse("").is_empty());
        assert!(parse("ACGT\n\n").is_empty());
    }

    #[test]
    fn header_without_sequence_is_an_entry() {
        let entries = parse(">a\n>b\nAC");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].raw_sequence, "");
    }

    #[test]
    fn into_record_recovers_one_symbol() {
        let r = RawEntry { identifier: "a".into(), description: "".into(), raw_sequence: "CGAnnaT".into() }
            .into_record()
            .unwrap();
        assert_eq!(r.marker_text(), "C");
        assert_eq!(r.marker_position(), 0);
        assert_eq!(r.clean_sequence(), "GAnnaT");
        assert_eq!(r.sequence_with_marker(), "CGAnnaT");
    }

    #[test]
    fn load_discards_bad_entries_and_continues() {
        let text = ">ok1\nACGT\n>bad\nacgt\n>nums\n12AC\n>empty\n>\nACGT\n>ok2\nTTAA\n";
        let mut store = RecordStore::new();
        let report = load_into(&mut store, text, skip_all);
        assert_eq!(report.entries.len(), 6);
        assert_eq!(report.added(), 2);
        assert_eq!(report.discarded(), 4);
        let ids: Vec<_> = store.list_all().iter().map(|r| r.identifier()).collect();
        assert_eq!(ids, ["ok1", "ok2"]);
        assert!(matches!(&report.entries[1].outcome, LoadOutcome::Discarded(msg) if msg.contains("'a'")));
    }

    #[test]
    fn load_resolves_duplicates_inside_one_file() {
        let text = ">X1 first\nAAAA\n>X1 second\nCCCC\n>X1 third\nGGGG\n";
        let mut calls = 0;
        let mut store = RecordStore::new();
        let report = load_into(&mut store, text, |_, _| { calls += 1; Resolution::Overwrite });
        assert_eq!(calls, 2);
        assert_eq!(report.added(), 1);
        assert_eq!(report.overwritten(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("X1").unwrap().description(), "third");
    }

    #[test]
    fn load_report_keeps_each_stored_version() {
        let text = ">X1 first\nAAAA\n>X1 second\nCCCC\n>X1 third\nGGGG\n>bad\nxx\n";
        let mut answers = [Resolution::Overwrite, Resolution::Skip].into_iter();
        let mut store = RecordStore::new();
        let report = load_into(&mut store, text, |_, _| answers.next().unwrap_or(Resolution::Skip));
        let stored: Vec<_> = report.entries.iter().map(|e| e.stored.as_ref().map(|r| r.description())).collect();
        assert_eq!(stored, [Some("first"), Some("second"), None, None]);
        assert_eq!(report.entries[0].stored.as_ref().unwrap().sequence_with_marker(), "AAAA");
        assert_eq!(store.get("X1").unwrap().description(), "second");
    }
}
