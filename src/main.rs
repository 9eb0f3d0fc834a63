use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use codesieve_lib::config::{default_config_path, load_config};
use codesieve_lib::data::datasieve;
use codesieve_lib::error::SieveError;
use codesieve_lib::sieve::{DistanceKind, Granularity};
use codesieve_lib::tree_sitter::{Language, TreeSitterError};

/// Extract aligned before/after code grains from an edited file
#[derive(Parser, Debug)]
#[command(name = "codesieve", version)]
struct Cli {
    /// File before the edit
    source: PathBuf,
    /// File after the edit
    target: PathBuf,
    /// Grammar to parse with (inferred from the source extension by default)
    #[arg(short, long)]
    language: Option<Language>,
    /// line, function or class
    #[arg(short, long)]
    granularity: Option<Granularity>,
    /// Ancestor depth, or context width for line grains
    #[arg(long)]
    level: Option<usize>,
    /// Maximum characters per input text
    #[arg(long)]
    limit: Option<usize>,
    /// s2s, e2e, btw, s2e or e2s
    #[arg(short, long)]
    distance: Option<DistanceKind>,
    /// Config file (defaults to the per-user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Pair<'a> {
    source: &'a str,
    target: &'a str,
}

fn main() -> Result<(), SieveError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path);
    if let Some(granularity) = cli.granularity {
        config.granularity = granularity;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(distance) = cli.distance {
        config.distance = distance;
    }

    let language = match cli.language {
        Some(language) => language,
        None => Language::from_path(&cli.source.to_string_lossy()).ok_or_else(|| {
            TreeSitterError::UnsupportedLanguage(cli.source.display().to_string())
        })?,
    };

    let src = fs::read_to_string(&cli.source)?;
    let tgt = fs::read_to_string(&cli.target)?;
    let mut src_parser = language.parser()?;
    let mut tgt_parser = language.parser()?;
    let options = config.options(language.ancestor_kinds());

    let pairs = datasieve(
        &mut src_parser,
        &mut tgt_parser,
        &src,
        &tgt,
        config.granularity,
        &options,
    )?;
    tracing::info!(
        %language,
        granularity = %config.granularity,
        pairs = pairs.len(),
        "sieved"
    );

    let out: Vec<Pair> = pairs
        .iter()
        .map(|(source, target)| Pair { source, target })
        .collect();
    let json = if cli.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    println!("{}", json);

    Ok(())
}
