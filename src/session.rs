//! Command surface used by the binaries.
//!
//! A [`Session`] owns the record store and the directory files are read from
//! and written to. Every menu action maps to one method taking already
//! validated arguments; prompting stays in the caller.
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{DnaError, Result};
use crate::fasta::{self, LoadReport};
use crate::generator;
use crate::record::SequenceRecord;
use crate::stats::{self, Composition};
use crate::store::{RecordStore, Resolution};

/// Extension every saved file ends with.
pub const FASTA_EXTENSION: &str = "fasta";

#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Records that were written; the store no longer holds them.
    pub records: Vec<SequenceRecord>,
}

#[derive(Debug)]
pub struct Session {
    base_dir: PathBuf,
    store: RecordStore,
}

impl Session {
    /// Start a session rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| DnaError::io(&base_dir, e))?;
        Ok(Self { base_dir, store: RecordStore::new() })
    }

    pub fn base_dir(&self) -> &Path { &self.base_dir }

    pub fn list_records(&self) -> &[SequenceRecord] { self.store.list_all() }

    pub fn record(&self, identifier: &str) -> Option<&SequenceRecord> { self.store.get(identifier) }

    pub fn has_unsaved(&self) -> bool { !self.store.is_empty() }

    /// Generate a sequence of `length` symbols, hide `marker` in it and store it.
    pub fn create_from_input<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        length: usize,
        identifier: &str,
        description: &str,
        marker: &str,
    ) -> Result<&SequenceRecord> {
        if length == 0 {
            return Err(DnaError::InvalidInput("sequence length must be positive".into()));
        }
        check_identifier(identifier)?;
        check_description(description)?;
        check_marker(marker)?;
        if self.store.contains(identifier) {
            return Err(DnaError::DuplicateIdentifier(identifier.to_string()));
        }
        let clean = generator::generate(rng, length);
        let (_, position) = generator::insert_marker(rng, &clean, marker);
        let record = SequenceRecord::new(identifier, description, clean, marker, position)?;
        self.store.add(record)?;
        info!(identifier, length, position, "sequence created");
        let records = self.store.list_all();
        Ok(&records[records.len() - 1])
    }

    /// Read `name` from the base directory and merge its records.
    pub fn load_file<F>(&mut self, name: &str, resolve: F) -> Result<LoadReport>
    where
        F: FnMut(&SequenceRecord, &SequenceRecord) -> Resolution,
    {
        let path = self.base_dir.join(name);
        let text = fs::read_to_string(&path).map_err(|e| DnaError::io(&path, e))?;
        info!(path = %path.display(), "loading");
        Ok(fasta::load_into(&mut self.store, &text, resolve))
    }

    /// Write every record to `name` (`.fasta` appended unless already there)
    /// and empty the store. On failure the store is left intact.
    pub fn save_file(&mut self, name: &str) -> Result<SaveReport> {
        let path = self.fasta_path(name);
        let text = fasta::serialize(self.store.list_all());
        fs::write(&path, text).map_err(|e| DnaError::io(&path, e))?;
        let records = self.store.take_all();
        info!(path = %path.display(), records = records.len(), "saved");
        Ok(SaveReport { path, records })
    }

    /// Names of regular files in the base directory, sorted.
    pub fn list_files(&self) -> Result<Vec<String>> {
        let dir = fs::read_dir(&self.base_dir).map_err(|e| DnaError::io(&self.base_dir, e))?;
        let mut names = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| DnaError::io(&self.base_dir, e))?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn statistics(&self, record: &SequenceRecord) -> Result<Composition> {
        stats::composition(record.clean_sequence())
    }

    fn fasta_path(&self, name: &str) -> PathBuf {
        let path = self.base_dir.join(name);
        if path.extension().is_some_and(|e| e == FASTA_EXTENSION) {
            path
        } else {
            self.base_dir.join(format!("{name}.{FASTA_EXTENSION}"))
        }
    }
}

/// Identifiers end at the first space of a header line, so they must be
/// non-empty and free of whitespace.
pub fn check_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(DnaError::InvalidInput("sequence id must not be empty".into()));
    }
    if identifier.chars().any(char::is_whitespace) {
        return Err(DnaError::InvalidInput(format!("sequence id '{identifier}' must not contain whitespace")));
    }
    Ok(())
}

/// Descriptions live on the header line, whose trailing whitespace is
/// trimmed on read.
pub fn check_description(description: &str) -> Result<()> {
    if description.contains(['\r', '\n']) {
        return Err(DnaError::InvalidInput("description must fit on one line".into()));
    }
    if description.trim_end() != description {
        return Err(DnaError::InvalidInput("description must not end with whitespace".into()));
    }
    Ok(())
}

/// The marker is written inside the sequence line, which is trimmed on read:
/// line breaks and whitespace at either end of the marker would not survive.
pub fn check_marker(marker: &str) -> Result<()> {
    if marker.contains(['\r', '\n']) {
        return Err(DnaError::InvalidInput("name must fit on one line".into()));
    }
    if marker.trim() != marker {
        return Err(DnaError::InvalidInput(format!("name '{marker}' must not start or end with whitespace")));
    }
    Ok(())
}
