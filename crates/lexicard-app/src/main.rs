use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lexicard_cache::CacheStore;
use lexicard_core::{Pipeline, PipelineOptions, extract_all};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod deck;
mod input;
mod profile;
mod providers;

use self::deck::JsonDeckWriter;

#[derive(Parser)]
#[command(name = "lexicard")]
#[command(about = "Turn highlighted words into flashcard-ready definitions")]
#[command(version)]
struct Cli {
    /// Text file with one highlighted fragment per line
    #[arg(required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Known words to leave out, one per line
    #[arg(short, long)]
    exclude: Option<PathBuf>,

    /// Directory the deck files are written to
    #[arg(short, long, default_value = "decks")]
    out_dir: PathBuf,

    #[arg(long, default_value = "lexicard")]
    deck_name: String,

    /// Records per deck file, 0 writes a single file
    #[arg(short, long)]
    batch_size: Option<i64>,

    /// Words resolved at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// JSON config file, defaults and environment otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default config file to this path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,

    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    if let Some(path) = &cli.init_config {
        if !profile::init_config(path)? {
            tracing::warn!("{} already exists, left untouched", path.display());
        }
        return Ok(());
    }

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(batch_size) = cli.batch_size {
        config.pipeline.batch_size = batch_size;
    }
    if let Some(concurrency) = cli.concurrency {
        config.pipeline.concurrency = concurrency;
    }

    let cache = CacheStore::new(&config.cache.root);
    tracing::info!("Using cache at {}", cache.root().display());
    let chain = providers::build_chain(&config, cache)?;

    let input_path = cli.input.context("An input file is required")?;
    let rows = input::read_rows(&input_path).await?;
    let words = extract_all(&rows);
    let exclude = match &cli.exclude {
        Some(path) => input::read_exclusions(path).await?,
        None => HashSet::new(),
    };

    let pipeline = Pipeline::new(chain).with_options(PipelineOptions {
        batch_size: config.pipeline.batch_size,
        concurrency: config.pipeline.concurrency,
        shuffle: config.pipeline.shuffle,
        shuffle_seed: config.pipeline.shuffle_seed,
    });

    // Shutdown on Ctrl+C, words already in flight still finish
    let cancel = pipeline.cancel_token();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
    });

    let writer = JsonDeckWriter::new(cli.out_dir, cli.deck_name);
    let report = pipeline
        .run(&words, &exclude, &writer)
        .await
        .context("Failed to build decks")?;

    tracing::info!(
        "Done: {} of {} words resolved into {} deck files ({} excluded)",
        report.resolved,
        report.attempted,
        report.batches,
        report.excluded
    );

    Ok(())
}
