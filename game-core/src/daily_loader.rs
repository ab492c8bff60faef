use async_trait::async_trait;
use chrono::NaiveDate;
use game_types::{DailyArtifact, Definition, LoadNotice, WordData};
use thiserror::Error;
use tracing::{info, warn};

use crate::DailyCache;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("artifact request failed: {0}")]
    Http(String),
}

/// Read-only access to the published daily artifact.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch_artifact(&self) -> Result<DailyArtifact, ArtifactError>;
}

/// Where the word being played came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrigin {
    Cache,
    Artifact,
    StaleArtifact { artifact_date: NaiveDate },
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWord {
    pub word_data: WordData,
    pub origin: WordOrigin,
    pub notice: Option<LoadNotice>,
}

/// Word played when the daily artifact cannot be fetched.
pub fn fallback_word_data() -> WordData {
    WordData::new(
        "discipline",
        3,
        Definition {
            part_of_speech: vec!["noun".to_string()],
            synonym: Vec::new(),
            sentence: vec![
                "struggled to maintain _______ in the classroom".to_string(),
                "The troops were praised for their dedication and _______.".to_string(),
                "lacked the _______ to practice regularly".to_string(),
            ],
            definition: vec!["control gained by enforcing obedience or order".to_string()],
        },
    )
}

/// Resolves the word for a day: device cache first, then the published
/// artifact, then the built-in fallback. Never fails.
pub struct DailyWordLoader<F> {
    cache: DailyCache,
    fetcher: F,
}

impl<F: ArtifactFetcher> DailyWordLoader<F> {
    pub fn new(cache: DailyCache, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    pub async fn load(&self, today: NaiveDate) -> LoadedWord {
        match self.cache.get(today).await {
            Ok(Some(word_data)) => {
                info!("Using cached word for {}", today);
                return LoadedWord {
                    word_data,
                    origin: WordOrigin::Cache,
                    notice: None,
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Daily cache unavailable: {:#}", e),
        }

        let artifact = match self.fetcher.fetch_artifact().await {
            Ok(artifact) => DailyArtifact {
                word_data: artifact.word_data.normalized(),
                ..artifact
            },
            Err(e) => {
                warn!("Failed to fetch daily word, using fallback: {}", e);
                return LoadedWord {
                    word_data: fallback_word_data(),
                    origin: WordOrigin::Fallback,
                    notice: Some(LoadNotice::FallbackWord {
                        reason: e.to_string(),
                    }),
                };
            }
        };

        // Cached under its own date, so a stale file is fetched again next time
        if let Err(e) = self.cache.put(artifact.date, &artifact.word_data).await {
            warn!("Failed to cache daily word: {:#}", e);
        }

        if artifact.date == today {
            return LoadedWord {
                word_data: artifact.word_data,
                origin: WordOrigin::Artifact,
                notice: None,
            };
        }

        warn!(
            "Daily word file is not from today ({}), date in file: {}",
            today, artifact.date
        );
        LoadedWord {
            word_data: artifact.word_data,
            origin: WordOrigin::StaleArtifact {
                artifact_date: artifact.date,
            },
            notice: Some(LoadNotice::StaleArtifact {
                artifact_date: artifact.date,
            }),
        }
    }
}
