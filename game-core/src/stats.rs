use anyhow::Result;
use chrono::Days;
use game_types::{GameResult, PlayerStats};
use tracing::{debug, info};

use crate::{STATS_KEY, SharedStore, load_json, save_json};

pub const MAX_HISTORY: usize = 10;

/// Folds one concluded game into the player's record.
///
/// A second result for the same day only replaces that day's history entry,
/// and only when it scores strictly higher; the streak is left alone.
pub fn apply_result(mut stats: PlayerStats, result: GameResult, max_history: usize) -> PlayerStats {
    let today = result.date;

    if stats.last_played_date == Some(today) {
        if let Some(existing) = stats
            .score_history
            .iter_mut()
            .find(|entry| entry.date == today)
        {
            if result.score > existing.score {
                debug!("Replacing {} result: {} -> {}", today, existing.score, result.score);
                *existing = result;
            }
        }
        return stats;
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    stats.current_streak = match stats.last_played_date {
        Some(last) if Some(last) == yesterday => stats.current_streak + 1,
        // First game ever, a missed day, or a last-played date in the future
        _ => 1,
    };
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);

    stats.score_history.insert(0, result);
    stats.score_history.truncate(max_history);
    stats.last_played_date = Some(today);

    stats
}

/// Loads and updates [`PlayerStats`] in the device store.
pub struct StatsTracker {
    store: SharedStore,
    max_history: usize,
}

impl StatsTracker {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            max_history: MAX_HISTORY,
        }
    }

    pub fn with_max_history(store: SharedStore, max_history: usize) -> Self {
        Self { store, max_history }
    }

    /// Stats for a player who has never finished a game are all zero.
    pub async fn load(&self) -> Result<PlayerStats> {
        Ok(load_json(self.store.as_ref(), STATS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Call once per concluded session.
    pub async fn record(&self, result: GameResult) -> Result<PlayerStats> {
        let stats = self.load().await?;
        let stats = apply_result(stats, result, self.max_history);
        save_json(self.store.as_ref(), STATS_KEY, &stats).await?;

        info!(
            "Recorded game for {:?}: streak {} (longest {})",
            stats.last_played_date, stats.current_streak, stats.longest_streak
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn result(d: &str, score: u32) -> GameResult {
        GameResult {
            date: date(d),
            score,
            won: score > 0,
            guesses: 3,
            hints_used: 1,
        }
    }

    fn stats_last_played(d: &str, streak: u32) -> PlayerStats {
        PlayerStats {
            current_streak: streak,
            longest_streak: streak,
            last_played_date: Some(date(d)),
            score_history: vec![result(d, 500)],
        }
    }

    #[test]
    fn test_first_game_starts_streak() {
        let stats = apply_result(PlayerStats::default(), result("2025-06-01", 700), MAX_HISTORY);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.last_played_date, Some(date("2025-06-01")));
        assert_eq!(stats.score_history.len(), 1);
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let stats = apply_result(stats_last_played("2025-06-01", 4), result("2025-06-02", 600), MAX_HISTORY);
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.score_history[0].date, date("2025-06-02"));
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        let stats = apply_result(stats_last_played("2025-06-01", 4), result("2025-06-10", 600), MAX_HISTORY);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 4);
    }

    #[test]
    fn test_future_last_played_resets_streak() {
        let stats = apply_result(stats_last_played("2025-06-05", 3), result("2025-06-02", 600), MAX_HISTORY);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.last_played_date, Some(date("2025-06-02")));
    }

    #[test]
    fn test_same_day_replay_only_replaces_higher_score() {
        let stats = stats_last_played("2025-06-01", 2);

        let lower = apply_result(stats.clone(), result("2025-06-01", 300), MAX_HISTORY);
        assert_eq!(lower, stats);

        let equal = apply_result(stats.clone(), result("2025-06-01", 500), MAX_HISTORY);
        assert_eq!(equal, stats);

        let higher = apply_result(stats.clone(), result("2025-06-01", 900), MAX_HISTORY);
        assert_eq!(higher.current_streak, 2);
        assert_eq!(higher.score_history.len(), 1);
        assert_eq!(higher.score_history[0].score, 900);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stats = PlayerStats::default();
        let start = date("2025-06-01");
        for day in 0..11u64 {
            let d = start.checked_add_days(Days::new(day)).unwrap();
            stats = apply_result(
                stats,
                GameResult { date: d, score: 100 * day as u32, won: true, guesses: 1, hints_used: 0 },
                MAX_HISTORY,
            );
        }

        assert_eq!(stats.score_history.len(), MAX_HISTORY);
        assert_eq!(stats.score_history[0].date, date("2025-06-11"));
        // 2025-06-01 was evicted
        assert!(stats.result_for(start).is_none());
        assert_eq!(stats.current_streak, 11);
    }
}
