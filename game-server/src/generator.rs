use chrono::NaiveDate;
use tracing::info;

use game_core::{SelectionError, WordDataProvider, WordSource, select_word_data};
use game_types::DailyArtifact;

/// Builds the artifact for `date`, trying up to `max_retries` words from the day's slot onward.
pub async fn build_daily_artifact(
    provider: &dyn WordDataProvider,
    source: &WordSource,
    date: NaiveDate,
    max_retries: usize,
) -> Result<DailyArtifact, SelectionError> {
    info!(
        "Generating artifact for {} (day {}, scheduled word '{}')",
        date,
        source.days_since_epoch(date),
        source.word_for_day(date)
    );

    let selected = select_word_data(provider, source, date, max_retries).await?;
    if selected.attempts > 1 {
        info!(
            "Scheduled word was replaced by '{}' after {} attempts",
            selected.word_data.word, selected.attempts
        );
    }

    Ok(DailyArtifact {
        date,
        word_data: selected.word_data,
    })
}
