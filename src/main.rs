// src/main.rs
mod config;
mod extractors;
mod latex;
mod storage;
mod utils;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use config::{Config, DEFAULT_CONFIG_PATH};
use extractors::{extract_text, Section, Segmenter};
use latex::{template, Transliterator};
use storage::OutputTarget;
use utils::AppError;

/// Exit code when the user declines to overwrite the output file.
const EXIT_DECLINED: u8 = 1;
/// Exit code for any fatal error.
const EXIT_FAILURE: u8 = 2;

/// Command Line Interface for the LaTeX homework converter
#[derive(Parser, Debug)]
#[command(author, version, about = "Turn extracted homework text into a LaTeX document", long_about = None)]
struct Args {
    /// Source document to split into numbered problems (text, HTML or PDF)
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Output .tex file
    #[arg(short, long)]
    save: PathBuf,

    /// Do not prompt before overwriting an existing output file
    #[arg(short, long)]
    force: bool,

    /// Config file with title, authors, packages, commands and environments
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

enum Outcome {
    Written,
    Declined,
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    match run(&args) {
        Ok(Outcome::Written) => ExitCode::SUCCESS,
        Ok(Outcome::Declined) => {
            tracing::info!("Not overwriting {}", args.save.display());
            ExitCode::from(EXIT_DECLINED)
        }
        Err(e) => {
            tracing::error!("Run failed: {e}");
            // Still shown when RUST_LOG filters errors out
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &Args) -> Result<Outcome, AppError> {
    // 3. Overwrite gate, before anything touches the disk
    let target = OutputTarget::new(&args.save);
    if target.exists() && !args.force {
        let stdin = io::stdin();
        if !target.confirm_overwrite(stdin.lock(), io::stdout())? {
            return Ok(Outcome::Declined);
        }
    }
    target.prepare()?;

    // 4. Load (or create) the config
    let config = Config::load_or_create(&args.config)?;
    let transliterator = Transliterator::new(&config.transliterations)?;

    // 5. Extract, transliterate and segment the source
    let sections = match &args.load {
        Some(source) => load_sections(source, &transliterator)?,
        None => {
            tracing::info!("No source given, writing a document without subsections");
            Vec::new()
        }
    };

    // 6. Render and save
    let date = chrono::Local::now().format("%B %Y").to_string();
    let document = template::render(&config, &sections, &date);
    target.write(&document)?;

    tracing::info!(
        "Wrote {} subsections to {}",
        sections.len(),
        target.path().display()
    );
    Ok(Outcome::Written)
}

fn load_sections(source: &Path, transliterator: &Transliterator) -> Result<Vec<Section>, AppError> {
    let raw = extract_text(source)?;
    let normalized = transliterator.encode(&raw);
    tracing::debug!(
        "Transliterated {} bytes into {} ASCII bytes",
        raw.len(),
        normalized.len()
    );

    let sections = Segmenter::new().segment(&normalized);
    tracing::info!("Found {} numbered sections in {}", sections.len(), source.display());
    Ok(sections)
}
