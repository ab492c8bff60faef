use async_trait::async_trait;
use chrono::NaiveDate;
use game_types::{MASK_TOKEN, WordData};
use regex::RegexBuilder;
use thiserror::Error;
use tracing::{info, warn};

use crate::WordSource;

pub const MAX_RETRIES: usize = 50;
pub const MIN_DEFINITION_LEN: usize = 15;

/// Why fetched word data failed the quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("no definitions")]
    MissingDefinition,
    #[error("no part of speech")]
    MissingPartOfSpeech,
    #[error("no example sentence survived masking")]
    MissingSentence,
    #[error("no definition of at least {MIN_DEFINITION_LEN} characters")]
    DefinitionTooShort,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("`{0}` not found in the dictionary")]
    NotFound(String),
    #[error("`{word}` rejected: {reason}")]
    Rejected { word: String, reason: RejectReason },
    #[error("unexpected dictionary response for `{word}`: {message}")]
    Malformed { word: String, message: String },
    #[error("dictionary request failed: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Failures that say something about this word rather than about the provider.
    pub fn is_candidate_failure(&self) -> bool {
        !matches!(self, ProviderError::Transport(_))
    }
}

/// Source of enriched word metadata. Implementations adapt one dictionary API.
#[async_trait]
pub trait WordDataProvider: Send + Sync {
    async fn fetch_word_data(&self, word: &str) -> Result<WordData, ProviderError>;
}

/// Quality gate applied to every candidate before it is published.
pub fn validate_word_data(word_data: &WordData) -> Result<(), RejectReason> {
    let definition = word_data
        .primary_definition()
        .ok_or(RejectReason::MissingDefinition)?;

    if !definition.part_of_speech.iter().any(|pos| !pos.trim().is_empty()) {
        return Err(RejectReason::MissingPartOfSpeech);
    }
    if !definition.sentence.iter().any(|s| s.contains(MASK_TOKEN)) {
        return Err(RejectReason::MissingSentence);
    }
    if !definition
        .definition
        .iter()
        .any(|d| d.trim().chars().count() >= MIN_DEFINITION_LEN)
    {
        return Err(RejectReason::DefinitionTooShort);
    }
    Ok(())
}

/// Replaces every whole-word, case-insensitive occurrence of any form with the mask.
pub fn mask_word_forms<S: AsRef<str>>(text: &str, forms: &[S]) -> String {
    let mut masked = text.to_string();
    for form in forms {
        let form = form.as_ref().trim();
        if form.is_empty() {
            continue;
        }
        let pattern = format!(r"\b{}\b", regex::escape(form));
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => masked = re.replace_all(&masked, MASK_TOKEN).into_owned(),
            Err(e) => warn!("Skipping unmaskable form '{}': {}", form, e),
        }
    }
    masked
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedWord {
    pub word_data: WordData,
    /// Number of candidates tried, including the one selected.
    pub attempts: usize,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("none of {attempts} candidates starting at `{start_word}` produced usable word data")]
    RetriesExhausted { start_word: String, attempts: usize },
    #[error("selection aborted at `{word}`")]
    Aborted {
        word: String,
        #[source]
        source: ProviderError,
    },
}

/// Picks the day's word, moving on to the following words in list order while
/// candidates fail. A transport failure stops the search instead of burning
/// through the list.
pub async fn select_word_data(
    provider: &dyn WordDataProvider,
    source: &WordSource,
    date: NaiveDate,
    max_retries: usize,
) -> Result<SelectedWord, SelectionError> {
    let mut attempts = 0;

    for word in source.candidates(date, max_retries) {
        attempts += 1;

        let word_data = match provider.fetch_word_data(word).await {
            Ok(data) => data,
            Err(e) if e.is_candidate_failure() => {
                warn!("Candidate {} ({}) skipped: {}", attempts, word, e);
                continue;
            }
            Err(error) => {
                return Err(SelectionError::Aborted {
                    word: word.to_string(),
                    source: error,
                });
            }
        };

        if let Err(reason) = validate_word_data(&word_data) {
            warn!("Candidate {} ({}) rejected: {}", attempts, word, reason);
            continue;
        }

        info!("Selected '{}' for {} after {} attempt(s)", word, date, attempts);
        return Ok(SelectedWord {
            word_data,
            attempts,
        });
    }

    Err(SelectionError::RetriesExhausted {
        start_word: source.word_for_day(date).to_string(),
        attempts,
    })
}
