//! In-memory, insertion-ordered collection of sequence records.
//!
//! Identifiers are unique at all times. [`RecordStore::add`] refuses a
//! conflicting identifier; the caller settles the conflict explicitly with
//! [`RecordStore::overwrite`] or [`RecordStore::skip`], or hands a resolver
//! to [`RecordStore::insert_with`].
use serde::Serialize;
use tracing::debug;

use crate::error::{DnaError, Result};
use crate::record::SequenceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddOutcome {
    Added,
    Overwritten,
    Skipped,
}

/// Decision for an incoming record whose identifier is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Overwrite,
    Skip,
}

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<SequenceRecord>,
}

impl RecordStore {
    pub fn new() -> Self { Self::default() }

    fn index_of(&self, identifier: &str) -> Option<usize> {
        self.records.iter().position(|r| r.identifier() == identifier)
    }

    /// Insert a record whose identifier is not stored yet.
    pub fn add(&mut self, record: SequenceRecord) -> Result<AddOutcome> {
        if self.contains(record.identifier()) {
            return Err(DnaError::DuplicateIdentifier(record.identifier().to_string()));
        }
        debug!(identifier = record.identifier(), "record added");
        self.records.push(record);
        Ok(AddOutcome::Added)
    }

    /// Replace the stored record with the same identifier, keeping its place
    /// in the order. Appends when nothing matches.
    pub fn overwrite(&mut self, record: SequenceRecord) -> AddOutcome {
        match self.index_of(record.identifier()) {
            Some(i) => {
                debug!(identifier = record.identifier(), "record overwritten");
                self.records[i] = record;
                AddOutcome::Overwritten
            }
            None => {
                self.records.push(record);
                AddOutcome::Added
            }
        }
    }

    /// Drop the incoming record and keep the stored one.
    pub fn skip(&mut self, record: SequenceRecord) -> AddOutcome {
        debug!(identifier = record.identifier(), "record skipped");
        AddOutcome::Skipped
    }

    /// Add `record`, asking `resolve` once if its identifier is taken.
    pub fn insert_with<F>(&mut self, record: SequenceRecord, mut resolve: F) -> AddOutcome
    where
        F: FnMut(&SequenceRecord, &SequenceRecord) -> Resolution,
    {
        let Some(i) = self.index_of(record.identifier()) else {
            self.records.push(record);
            return AddOutcome::Added;
        };
        match resolve(&self.records[i], &record) {
            Resolution::Overwrite => self.overwrite(record),
            Resolution::Skip => self.skip(record),
        }
    }

    pub fn list_all(&self) -> &[SequenceRecord] { &self.records }

    pub fn get(&self, identifier: &str) -> Option<&SequenceRecord> {
        self.index_of(identifier).map(|i| &self.records[i])
    }

    pub fn contains(&self, identifier: &str) -> bool { self.index_of(identifier).is_some() }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn clear(&mut self) { self.records.clear(); }

    /// Remove and return every record, leaving the store empty.
    pub fn take_all(&mut self) -> Vec<SequenceRecord> { std::mem::take(&mut self.records) }
}
