//! Synthetic DNA record library.
//!
//! This crate provides the core types and logic used by the interactive
//! `dna_records` binary and the `inspect` tool:
//!
//! - `record`: the sequence record and its marker-splicing invariant
//! - `generator`: random A/C/G/T sequences and marker insertion
//! - `marker`: recovery of the (single leading symbol) marker from raw text
//! - `stats`: per-symbol percentages and the CG/AT ratio
//! - `store`: insertion-ordered records with overwrite/skip on duplicate ids
//! - `fasta`: the text format, with per-record fault tolerance on load
//! - `session`: one method per menu action, rooted at a base directory
//!
//! There is no global state: the binaries own a [`session::Session`] and pass
//! it around explicitly.
pub mod error;
pub mod record;
pub mod generator;
pub mod marker;
pub mod stats;
pub mod store;
pub mod fasta;
pub mod session;

pub use error::{DnaError, Result};
