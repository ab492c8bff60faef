use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// User-visible notices raised while loading the day's word. None of them stop play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LoadNotice {
    /// The daily file could not be fetched; a built-in word is being played instead.
    FallbackWord { reason: String },
    /// The daily file is for another day, so it has not been regenerated yet.
    StaleArtifact { artifact_date: NaiveDate },
}

impl LoadNotice {
    pub fn message(&self) -> String {
        match self {
            LoadNotice::FallbackWord { .. } => "Failed to load word. Using fallback.".to_string(),
            LoadNotice::StaleArtifact { artifact_date } => {
                format!("Today's word is not ready yet, playing the word from {}", artifact_date)
            }
        }
    }
}
