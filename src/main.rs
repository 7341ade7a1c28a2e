//! TTS deck builder - Main Binary
//!
//! Converts an ARDB-style deck list into a Tabletop Simulator deck using the
//! VtES TTS module.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tts_deck::{
    loader::find_catalog, write_deck, Catalog, ConvertConfig, DeckAssembler, DeckLoader,
};

/// Log level for diagnostics on stderr (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(LevelFilter);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(LevelFilter::OFF)),
            "normal" | "1" => Ok(VerbosityArg(LevelFilter::WARN)),
            "verbose" | "2" => Ok(VerbosityArg(LevelFilter::INFO)),
            "debug" | "3" => Ok(VerbosityArg(LevelFilter::DEBUG)),
            "trace" | "4" => Ok(VerbosityArg(LevelFilter::TRACE)),
            _ => Err(format!(
                "invalid verbosity level '{s}' \
                 (expected: silent/0, normal/1, verbose/2, debug/3, trace/4)"
            )),
        }
    }
}

impl From<VerbosityArg> for LevelFilter {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "tts-deck")]
#[command(
    about = "Convert an ARDB deck list into a Tabletop Simulator VtES deck",
    long_about = None
)]
struct Cli {
    /// Deck list exported from ARDB (or any tool using its text format)
    #[arg(value_name = "DECK_LIST")]
    deck: PathBuf,

    /// VtES TTS module (default: 1955001917.json in the TTS workshop folder)
    #[arg(value_name = "TTS_JSON")]
    catalog: Option<PathBuf>,

    /// Deck template (default: template.json next to the executable)
    #[arg(long, value_name = "TEMPLATE")]
    template: Option<PathBuf>,

    /// Output file
    #[arg(long, short = 'o', default_value = "Deck.json")]
    output: PathBuf,

    /// Treat card name OLD as NEW when matching (repeatable)
    #[arg(long = "rename", value_name = "OLD=NEW")]
    renames: Vec<String>,

    /// Verbosity level for diagnostics (0=silent, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(long, short = 'v', default_value = "normal")]
    verbosity: VerbosityArg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(cli.verbosity))
        .with_target(false)
        .init();

    let mut config = ConvertConfig::default();
    if let Some(template) = &cli.template {
        config.template_path = template.clone();
    }
    config.output_path = cli.output.clone();
    for rename in &cli.renames {
        config.add_rename(rename)?;
    }

    run(&cli, &config)
}

fn run(cli: &Cli, config: &ConvertConfig) -> anyhow::Result<()> {
    let catalog_path = match &cli.catalog {
        Some(path) => path.clone(),
        None => find_catalog(&config.catalog_file_name)?,
    };
    println!("Using {} for TTS data", catalog_path.display());

    let normalizer = config.normalizer();
    let catalog = Catalog::load_from_file(&catalog_path, config, &normalizer)
        .with_context(|| format!("Error loading TTS module {}", catalog_path.display()))?;

    let deck = DeckLoader::load_from_file(&cli.deck, &normalizer)
        .with_context(|| format!("Error reading deck list {}", cli.deck.display()))?;

    let template = DeckAssembler::load_template(&config.template_path).with_context(|| {
        format!("Error loading deck template {}", config.template_path.display())
    })?;

    let document = DeckAssembler::new(&catalog, config).assemble(&deck, &template)?;
    write_deck(&document, &config.output_path)
        .with_context(|| format!("Error writing {}", config.output_path.display()))?;

    println!(
        "Wrote {} ({} crypt, {} library cards)",
        config.output_path.display(),
        deck.total_crypt(),
        deck.total_library()
    );

    Ok(())
}
