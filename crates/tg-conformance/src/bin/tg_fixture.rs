#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tg_conformance::{HarnessConfig, ResourceResolver, fixture_digest};
use tracing_subscriber::EnvFilter;

/// Inspect golden fixtures without binding a predictor.
#[derive(Debug, Parser)]
#[command(name = "tg_fixture", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print sample count, feature width and digest of a fixture.
    Inspect(FixtureArgs),
    /// Print the SHA-256 digest of a fixture's text.
    Digest(FixtureArgs),
}

#[derive(Debug, Args)]
struct FixtureArgs {
    /// Directory fixture names are resolved against. Defaults to the
    /// fixtures bundled with tg-conformance.
    #[arg(long)]
    fixture_root: Option<PathBuf>,
    /// Fixture name relative to the root, e.g. `random_forest.json`.
    #[arg(long)]
    name: String,
}

impl FixtureArgs {
    fn config(&self) -> HarnessConfig {
        match &self.fixture_root {
            Some(root) => HarnessConfig::default().with_fixture_root(root),
            None => HarnessConfig::default(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Inspect(args) => cmd_inspect(&args),
        Command::Digest(args) => cmd_digest(&args),
    }
}

fn cmd_inspect(args: &FixtureArgs) -> Result<(), String> {
    let config = args.config();
    let loaded = config
        .loader()
        .load_with_digest(&args.name)
        .map_err(|err| err.to_string())?;
    let dataset = &loaded.dataset;

    println!("fixture: {}", dataset.name());
    println!("root: {}", config.fixture_root.display());
    println!("samples: {}", dataset.len());
    match dataset.feature_width() {
        Some(width) => println!("feature width: {width}"),
        None => println!("feature width: -"),
    }
    println!("rectangular: {}", dataset.is_rectangular());
    println!("sha256: {}", loaded.digest);
    Ok(())
}

fn cmd_digest(args: &FixtureArgs) -> Result<(), String> {
    let loader = args.config().loader();
    let text = loader
        .resolver()
        .resolve(&args.name)
        .map_err(|err| err.to_string())?;
    println!("{}  {}", fixture_digest(&text), args.name);
    Ok(())
}
