use anyhow::{Context, Result};
use clap::Parser;
use dna_records::fasta::{LoadOutcome, LoadReport};
use dna_records::generator::{entropy_rng, seeded_rng};
use dna_records::record::SequenceRecord;
use dna_records::session::{check_description, check_identifier, check_marker, Session};
use dna_records::store::{AddOutcome, Resolution};
use dna_records::DnaError;
use dotenvy::dotenv;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Generate, load and save synthetic DNA sequences in FASTA files")]
struct Args {
    /// Directory FASTA files are listed from, loaded from and saved to
    #[arg(long, env = "FASTA_DIR", default_value = "fasta_files")]
    dir: PathBuf,

    /// Seed for the sequence generator (random when absent)
    #[arg(long, env = "DNA_SEED")]
    seed: Option<u64>,
}

const DATE_FMT: &[BorrowedFormatItem<'static>] = format_description!("[year]_[month]_[day]");

/// Line-oriented prompts over any buffered input.
struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    /// Print `prompt` and read one line without its terminator. `None` on EOF.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 { return Ok(None); }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Y/N question; EOF counts as "no".
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            match self.ask(&format!("{prompt} [Y/N]\n$: "))?.map(|s| s.trim().to_uppercase()) {
                None => return Ok(false),
                Some(c) if c == "Y" => return Ok(true),
                Some(c) if c == "N" => return Ok(false),
                Some(_) => println!("Invalid input. Please enter Y or N."),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn print_statistics(session: &Session, record: &SequenceRecord) {
    println!("Sequence {} statistics:", record.identifier());
    match session.statistics(record) {
        Ok(c) => println!("{c}"),
        Err(e) => println!("\t{e}"),
    }
}

/// Save name used when the user just presses enter: `sequences_YYYY_MM_DD`.
fn default_file_name() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    match now.format(DATE_FMT) {
        Ok(d) => format!("sequences_{d}"),
        Err(_) => "sequences".to_string(),
    }
}

fn create_sequence<R: BufRead>(console: &mut Console<R>, session: &mut Session, rng: &mut impl Rng) -> Result<()> {
    let length = loop {
        let Some(s) = console.ask("Sequence length: ")? else { return Ok(()) };
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => break n,
            Ok(_) => println!("Err: Length must be positive."),
            Err(_) => println!("Err: Not a number."),
        }
    };
    let identifier = loop {
        let Some(id) = console.ask("Sequence ID: ")? else { return Ok(()) };
        if let Err(e) = check_identifier(&id) {
            println!("Err: {e}");
        } else if session.record(&id).is_some() {
            println!("Err: Sequence with this ID already exists.");
        } else {
            break id;
        }
    };
    let description = loop {
        let Some(d) = console.ask("Sequence description: ")? else { return Ok(()) };
        match check_description(&d) {
            Ok(()) => break d,
            Err(e) => println!("Err: {e}"),
        }
    };
    let marker = loop {
        let Some(m) = console.ask("Name: ")? else { return Ok(()) };
        match check_marker(&m) {
            Ok(()) => break m,
            Err(e) => println!("Err: {e}"),
        }
    };

    match session.create_from_input(rng, length, &identifier, &description, &marker) {
        Ok(r) => println!("Info: Sequence {} added.", r.identifier()),
        Err(e @ (DnaError::InvalidInput(_) | DnaError::DuplicateIdentifier(_))) => println!("Err: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn choose_file<R: BufRead>(console: &mut Console<R>, session: &Session) -> Result<Option<String>> {
    let files = session.list_files()?;
    if files.is_empty() {
        println!("{} is empty. Aborting...", session.base_dir().display());
        return Ok(None);
    }
    println!("Files inside directory '{}':", session.base_dir().display());
    for (i, f) in files.iter().enumerate() {
        println!("\t*{f} ({i})");
    }
    loop {
        let Some(s) = console.ask("Choose a file (by number)\n$: ")? else { return Ok(None) };
        match s.trim().parse::<usize>().ok().and_then(|i| files.get(i)) {
            Some(f) => return Ok(Some(f.clone())),
            None => println!("Err: Invalid selection."),
        }
    }
}

fn report_load(session: &Session, report: &LoadReport) {
    for e in &report.entries {
        match &e.outcome {
            LoadOutcome::Stored(AddOutcome::Skipped) => println!("Sequence {} skipped.", e.identifier),
            LoadOutcome::Stored(outcome) => {
                let verb = if *outcome == AddOutcome::Added { "added" } else { "overwritten" };
                println!("Sequence {} {verb}.", e.identifier);
                if let Some(r) = &e.stored {
                    print_statistics(session, r);
                }
            }
            LoadOutcome::Discarded(reason) => println!("Error reading fasta record '{}': {reason}", e.identifier),
        }
    }
}

fn load_sequences<R: BufRead>(console: &mut Console<R>, session: &mut Session) -> Result<()> {
    let Some(file) = choose_file(console, session)? else { return Ok(()) };
    let mut prompt_err = None;
    let loaded = session.load_file(&file, |_, incoming| {
        let question = format!("Sequence {} already exists. Overwrite?", incoming.identifier());
        match console.confirm(&question) {
            Ok(true) => Resolution::Overwrite,
            Ok(false) => Resolution::Skip,
            Err(e) => {
                if prompt_err.is_none() { prompt_err = Some(e); }
                Resolution::Skip
            }
        }
    });
    if let Some(e) = prompt_err { return Err(e); }
    match loaded {
        Ok(report) => report_load(session, &report),
        Err(e @ DnaError::Io { .. }) => println!("Err: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn save_sequences<R: BufRead>(console: &mut Console<R>, session: &mut Session) -> Result<()> {
    let Some(name) = console.ask("Please provide a filename (without .fasta, empty for today's date)\n$: ")? else { return Ok(()) };
    let name = if name.trim().is_empty() { default_file_name() } else { name.trim().to_string() };
    let saved = match session.save_file(&name) {
        Ok(s) => s,
        Err(e @ DnaError::Io { .. }) => { println!("Err: {e}"); return Ok(()); }
        Err(e) => return Err(e.into()),
    };
    println!("Sequences saved to {}", saved.path.display());
    for r in &saved.records {
        print_statistics(session, r);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    let args = Args::parse();
    init_tracing();

    let mut session = Session::open(&args.dir).with_context(|| format!("prepare {}", args.dir.display()))?;
    let mut rng = match args.seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    };
    let stdin = io::stdin();
    let mut console = Console { input: stdin.lock() };

    loop {
        let save_line = if session.has_unsaved() { "\n\t*Save file (4)" } else { "" };
        let question = format!(
            "Choose one of the following:\n\t*Exit program (1)\n\t*Load sequences from file (2)\n\t*Add new sequence to file (3){save_line}\n$: "
        );
        let Some(choice) = console.ask(&question)? else { break };
        match choice.trim() {
            "1" => {
                if session.has_unsaved()
                    && !console.confirm("Warning: unsaved sequences in memory. Are you sure you want to quit?")?
                {
                    println!("Cancelling...");
                    continue;
                }
                println!("Quitting program...");
                break;
            }
            "2" => load_sequences(&mut console, &mut session)?,
            "3" => create_sequence(&mut console, &mut session, &mut rng)?,
            "4" if session.has_unsaved() => save_sequences(&mut console, &mut session)?,
            _ => println!("Invalid command."),
        }
    }
    Ok(())
}
