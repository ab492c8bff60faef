use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use game_core::{Clock, UtcClock, WordList, WordSource};
use game_server::{
    artifact::write_artifact, config::Config, dictionary::MerriamWebsterProvider,
    generator::build_daily_artifact,
};

/// Builds the daily-word artifact the game front-end loads.
#[derive(Parser)]
#[command(name = "generate-daily-word", version)]
struct Cli {
    /// Date to generate for (YYYY-MM-DD, UTC). Defaults to today.
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Where to write the artifact. Defaults to DAILY_ARTIFACT_PATH.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the artifact to stdout instead of writing it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let Some(api_key) = config.dictionary_api_key.clone() else {
        bail!("MERRIAM_WEBSTER_API_KEY is not set");
    };

    let words = WordList::load(&config.word_list_path)?;
    info!(
        "Loaded {} words from {}",
        words.len(),
        config.word_list_path.display()
    );
    let source = WordSource::new(words, config.epoch)?;

    let date = cli.date.unwrap_or_else(|| UtcClock.today());
    let provider = MerriamWebsterProvider::new(config.dictionary_api_base.clone(), api_key);

    let artifact = build_daily_artifact(&provider, &source, date, config.max_retries)
        .await
        .with_context(|| format!("Failed to generate the word for {}", date))?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(|| config.daily_artifact_path.clone());
    write_artifact(&output, &artifact).await?;
    Ok(())
}
