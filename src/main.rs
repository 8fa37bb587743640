mod category;
mod config;
mod dictionary;
mod egg;
mod engine;
mod error;
mod invasion;
mod normalize;
mod pokedex;
mod research;
mod resolver;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::config::DataTables;
use crate::error::PipelineError;

#[derive(Parser)]
#[command(
    name = "pogo_extract",
    about = "Localizes scraped game-data extracts into JSON artifacts"
)]
struct Cli {
    /// Directory holding the rule/tag/lexicon/dex tables
    #[arg(long, default_value = "data")]
    data: PathBuf,
    /// Directory holding the HTML-extraction collaborator's JSON output
    #[arg(long, default_value = "extracts")]
    extracts: PathBuf,
    /// Artifact output directory
    #[arg(long, default_value = "artifacts")]
    out: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Field research tasks → researches.json
    Research,
    /// Team GO Rocket lineups → rocket-invasions.json
    Invasions,
    /// Egg hatch pools → eggs.json
    Eggs,
    /// Every source; a failing source does not abort the others
    All,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let tables = match DataTables::load(&cli.data) {
        Ok(tables) => tables,
        Err(err) => {
            error!(%err, "failed to load data tables");
            return ExitCode::FAILURE;
        }
    };

    let sources: &[SourceKind] = match cli.command {
        Some(Command::Research) => &[SourceKind::Research],
        Some(Command::Invasions) => &[SourceKind::Invasions],
        Some(Command::Eggs) => &[SourceKind::Eggs],
        Some(Command::All) | None => {
            &[SourceKind::Research, SourceKind::Invasions, SourceKind::Eggs]
        }
    };

    let mut any_failed = false;
    for source in sources {
        match run_source(*source, &cli, &tables) {
            Ok(()) => info!(source = source.name(), "artifacts written"),
            Err(err) => {
                // One broken source page must not cost us the others.
                error!(source = source.name(), %err, "source failed");
                any_failed = true;
            }
        }
    }

    if any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Debug, Clone, Copy)]
enum SourceKind {
    Research,
    Invasions,
    Eggs,
}

impl SourceKind {
    fn name(self) -> &'static str {
        match self {
            Self::Research => "researches",
            Self::Invasions => "rocket-invasions",
            Self::Eggs => "eggs",
        }
    }
}

fn run_source(source: SourceKind, cli: &Cli, tables: &DataTables) -> Result<(), PipelineError> {
    let extract_path = cli.extracts.join(format!("{}.json", source.name()));
    match source {
        SourceKind::Research => {
            let records = research::build(read_extract(&extract_path)?, tables);
            write_artifacts(&cli.out, source.name(), &records)
        }
        SourceKind::Invasions => {
            let records = invasion::build(read_extract(&extract_path)?, tables);
            write_artifacts(&cli.out, source.name(), &records)
        }
        SourceKind::Eggs => {
            let records = egg::build(read_extract(&extract_path)?, tables);
            write_artifacts(&cli.out, source.name(), &records)
        }
    }
}

fn read_extract<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PipelineError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Write the pretty artifact plus its minified sibling for publishing.
fn write_artifacts<T: Serialize>(
    out_dir: &Path,
    stem: &str,
    records: &[T],
) -> Result<(), PipelineError> {
    fs::create_dir_all(out_dir)?;
    fs::write(
        out_dir.join(format!("{stem}.json")),
        serde_json::to_string_pretty(records)?,
    )?;
    fs::write(
        out_dir.join(format!("{stem}.min.json")),
        serde_json::to_string(records)?,
    )?;
    Ok(())
}
