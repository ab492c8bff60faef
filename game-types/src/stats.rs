use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameOutcome, GameSummary};

/// One concluded game, as stored in the score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub date: NaiveDate,
    pub score: u32,
    pub won: bool,
    pub guesses: u32,
    pub hints_used: u32,
}

impl GameResult {
    pub fn from_summary(date: NaiveDate, summary: &GameSummary) -> Self {
        Self {
            date,
            score: summary.score,
            won: summary.outcome == GameOutcome::Won,
            guesses: summary.guesses,
            hints_used: summary.hints_used,
        }
    }
}

/// Cross-day record kept on the player's device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_played_date: Option<NaiveDate>,
    /// Most recent first.
    pub score_history: Vec<GameResult>,
}

impl PlayerStats {
    pub fn result_for(&self, date: NaiveDate) -> Option<&GameResult> {
        self.score_history.iter().find(|result| result.date == date)
    }

    pub fn games_won(&self) -> usize {
        self.score_history.iter().filter(|result| result.won).count()
    }
}
