use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dna_records::fasta::{self, LoadOutcome};
use dna_records::stats::{self, Composition};
use dna_records::store::{RecordStore, Resolution};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnDuplicate {
    Overwrite,
    Skip,
}

#[derive(Debug, Parser)]
#[command(about = "Read a FASTA file of marked sequences and print composition statistics")]
struct Args {
    /// Input FASTA file
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// What to keep when an identifier repeats inside the file
    #[arg(long, value_enum, default_value_t = OnDuplicate::Skip)]
    on_duplicate: OnDuplicate,

    /// Print a JSON summary instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RecordSummary<'a> {
    identifier: &'a str,
    description: &'a str,
    length: usize,
    recovered_marker: &'a str,
    sequence_with_marker: &'a str,
    statistics: Option<Composition>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let text = fs::read_to_string(&args.input).with_context(|| format!("open {:?}", args.input))?;
    let policy = match args.on_duplicate {
        OnDuplicate::Overwrite => Resolution::Overwrite,
        OnDuplicate::Skip => Resolution::Skip,
    };
    let mut store = RecordStore::new();
    let report = fasta::load_into(&mut store, &text, |_, _| policy);

    if args.json {
        let records: Vec<_> = store
            .list_all()
            .iter()
            .map(|r| RecordSummary {
                identifier: r.identifier(),
                description: r.description(),
                length: r.clean_sequence().chars().count(),
                recovered_marker: r.marker_text(),
                sequence_with_marker: r.sequence_with_marker(),
                statistics: stats::composition(r.clean_sequence()).ok(),
            })
            .collect();
        let out = serde_json::json!({ "records": records, "load": report });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for e in &report.entries {
        if let LoadOutcome::Discarded(reason) = &e.outcome {
            println!("Discarded '{}': {reason}", e.identifier);
        }
    }
    for r in store.list_all() {
        println!("Sequence {} statistics:", r.identifier());
        match stats::composition(r.clean_sequence()) {
            Ok(c) => println!("{c}"),
            Err(e) => println!("\t{e}"),
        }
    }
    eprintln!(
        "Read {} entries: {} added, {} overwritten, {} skipped, {} discarded.",
        report.entries.len(),
        report.added(),
        report.overwritten(),
        report.skipped(),
        report.discarded()
    );
    Ok(())
}
