use chrono::NaiveDate;
use game_types::{
    GameOutcome, GamePhase, GameResult, GameState, GameSummary, Hint, SessionId, WordData,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{GameEvent, GameEventBus, GameEventHandler, HintCurriculum, KeyInput, ScoringRules, hint_for};

/// Result of an accepted guess submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessVerdict {
    Won,
    Wrong { score: u32 },
    Lost,
}

/// Result of an accepted hint request.
#[derive(Debug, Clone, PartialEq)]
pub enum HintVerdict {
    Revealed(Hint),
    /// The player could not afford the hint and forfeits the game.
    Lost,
}

/// Edits to the guess being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessEdit {
    Append(char),
    Backspace,
}

/// Single-player state machine: `Loading -> Playing -> {Won, Lost}`.
///
/// Every operation on a terminal or not-yet-started session is a no-op.
/// `start` is the only way out of a terminal phase and always begins a fresh session.
#[derive(Debug)]
pub struct GameEngine {
    rules: ScoringRules,
    phase: GamePhase,
    word_data: Option<WordData>,
    curriculum: HintCurriculum,
    state: GameState,
    result_taken: bool,
    event_bus: GameEventBus,
}

impl GameEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            rules,
            phase: GamePhase::Loading,
            word_data: None,
            curriculum: HintCurriculum::from_levels(Vec::new()),
            state: GameState::new(Uuid::nil(), rules.starting_score),
            result_taken: false,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn start(&mut self, word_data: WordData) -> SessionId {
        let session_id = Uuid::new_v4();
        self.curriculum = HintCurriculum::for_word(&word_data);
        self.state = GameState::new(session_id, self.rules.starting_score);
        self.result_taken = false;
        self.phase = GamePhase::Playing;

        info!(
            "Started session {} ({} letters, {} hints)",
            session_id,
            word_data.num_of_letters,
            self.curriculum.max_hints()
        );
        self.event_bus.publish(GameEvent::GameStarted {
            session_id,
            word_length: word_data.num_of_letters,
            max_hints: self.curriculum.max_hints(),
        });
        self.word_data = Some(word_data);

        session_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rules(&self) -> ScoringRules {
        self.rules
    }

    pub fn word_data(&self) -> Option<&WordData> {
        self.word_data.as_ref()
    }

    pub fn max_hints(&self) -> u32 {
        self.curriculum.max_hints()
    }

    fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing && !self.state.game_over
    }

    /// Longest guess the input accepts: the target's letter count.
    fn guess_capacity(&self) -> usize {
        self.word_data
            .as_ref()
            .map(|data| data.num_of_letters as usize)
            .unwrap_or(0)
    }

    /// Returns false when the edit was ignored.
    pub fn edit_guess(&mut self, edit: GuessEdit) -> bool {
        if !self.accepts_input() {
            return false;
        }

        match edit {
            GuessEdit::Append(letter) => {
                if !letter.is_ascii_alphabetic()
                    || self.state.current_guess.chars().count() >= self.guess_capacity()
                {
                    return false;
                }
                self.state.current_guess.push(letter.to_ascii_uppercase());
                true
            }
            GuessEdit::Backspace => self.state.current_guess.pop().is_some(),
        }
    }

    /// Submits whatever has been typed so far.
    pub fn submit_current_guess(&mut self) -> Option<GuessVerdict> {
        let text = self.state.current_guess.clone();
        self.submit_guess(&text)
    }

    /// Free-text entry: trims and uppercases before submitting.
    pub fn submit_text(&mut self, text: &str) -> Option<GuessVerdict> {
        let normalized = text.trim().to_uppercase();
        self.submit_guess(&normalized)
    }

    /// `text` must already be upper case; the comparison with the target is exact.
    pub fn submit_guess(&mut self, text: &str) -> Option<GuessVerdict> {
        if !self.accepts_input() || text.is_empty() {
            return None;
        }
        let correct = self.word_data.as_ref()?.word == text;

        self.state.guesses.push(text.to_string());
        self.state.current_guess.clear();

        let verdict = if correct {
            GuessVerdict::Won
        } else {
            self.state.score = self.state.score.saturating_sub(self.rules.guess_penalty);
            if self.state.score == 0 {
                GuessVerdict::Lost
            } else {
                GuessVerdict::Wrong {
                    score: self.state.score,
                }
            }
        };

        debug!(
            "Session {} guess #{} correct={} score={}",
            self.state.session_id,
            self.state.guesses.len(),
            correct,
            self.state.score
        );
        self.event_bus.publish(GameEvent::GuessSubmitted {
            session_id: self.state.session_id,
            guess: text.to_string(),
            correct,
            score: self.state.score,
        });

        match verdict {
            GuessVerdict::Won => self.finish(GameOutcome::Won),
            GuessVerdict::Lost => self.finish(GameOutcome::Lost),
            GuessVerdict::Wrong { .. } => {}
        }

        Some(verdict)
    }

    pub fn request_hint(&mut self) -> Option<HintVerdict> {
        if !self.accepts_input() || self.state.hints_unlocked >= self.curriculum.max_hints() {
            return None;
        }

        if self.state.score < self.rules.hint_penalty {
            self.state.score = 0;
            self.finish(GameOutcome::Lost);
            return Some(HintVerdict::Lost);
        }

        let level = self.state.hints_unlocked + 1;
        let kind = self.curriculum.kind_for_level(level)?;
        let hint = hint_for(kind, self.word_data.as_ref()?);

        self.state.score -= self.rules.hint_penalty;
        self.state.hints_unlocked = level;
        self.state.hints.push(hint.clone());

        debug!(
            "Session {} unlocked hint {} ({:?}), score={}",
            self.state.session_id, level, kind, self.state.score
        );
        self.event_bus.publish(GameEvent::HintUnlocked {
            session_id: self.state.session_id,
            hint: hint.clone(),
            hints_unlocked: level,
            score: self.state.score,
        });

        Some(HintVerdict::Revealed(hint))
    }

    /// Hint button guard: disabled one penalty step before a hint would cost the game.
    pub fn is_hint_disabled(&self) -> bool {
        !self.accepts_input()
            || self.state.hints_unlocked >= self.curriculum.max_hints()
            || self.state.score <= self.rules.hint_penalty
    }

    /// Routes a mapped key press. Returns true when the state changed.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Letter(letter) => self.edit_guess(GuessEdit::Append(letter)),
            KeyInput::Backspace => self.edit_guess(GuessEdit::Backspace),
            KeyInput::Enter => self.submit_current_guess().is_some(),
        }
    }

    pub fn summary(&self) -> Option<GameSummary> {
        if !self.phase.is_terminal() {
            return None;
        }
        Some(GameSummary {
            word: self.word_data.as_ref()?.word.clone(),
            guesses: self.state.guesses.len() as u32,
            hints_used: self.state.hints_unlocked,
            score: self.state.score,
            outcome: self.state.outcome,
        })
    }

    /// Hands out the session's result once, after the game has ended.
    pub fn take_result(&mut self, date: NaiveDate) -> Option<GameResult> {
        if self.result_taken {
            return None;
        }
        let summary = self.summary()?;
        self.result_taken = true;
        Some(GameResult::from_summary(date, &summary))
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.state.game_over = true;
        self.state.outcome = outcome;
        self.phase = match outcome {
            GameOutcome::Won => GamePhase::Won,
            _ => GamePhase::Lost,
        };

        let Some(summary) = self.summary() else {
            return;
        };
        let session_id = self.state.session_id;
        info!(
            "Session {} ended {:?} with score {} after {} guesses and {} hints",
            session_id, outcome, summary.score, summary.guesses, summary.hints_used
        );

        let event = match outcome {
            GameOutcome::Won => GameEvent::GameWon { session_id, summary },
            _ => GameEvent::GameLost { session_id, summary },
        };
        self.event_bus.publish(event);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(ScoringRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::{Definition, HintKind};

    fn test_word() -> WordData {
        WordData::new(
            "cat",
            1,
            Definition {
                part_of_speech: vec!["noun".to_string()],
                synonym: Vec::new(),
                sentence: vec!["the _______ sat on the mat".to_string()],
                definition: vec!["a small domesticated carnivorous mammal".to_string()],
            },
        )
    }

    fn started_engine() -> GameEngine {
        let mut engine = GameEngine::default();
        engine.start(test_word());
        engine
    }

    #[test]
    fn test_new_engine_is_loading_and_inert() {
        let mut engine = GameEngine::default();
        assert_eq!(engine.phase(), GamePhase::Loading);
        assert_eq!(engine.submit_guess("CAT"), None);
        assert_eq!(engine.request_hint(), None);
        assert!(!engine.edit_guess(GuessEdit::Append('C')));
        assert!(engine.is_hint_disabled());
    }

    #[test]
    fn test_start_resets_state() {
        let engine = started_engine();
        let state = engine.state();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(state.score, 1000);
        assert!(state.guesses.is_empty());
        assert!(state.hints.is_empty());
        assert_eq!(state.hints_unlocked, 0);
        assert!(!state.game_over);
        assert_eq!(state.outcome, GameOutcome::Unresolved);
        assert_eq!(engine.max_hints(), 5);
    }

    #[test]
    fn test_correct_guess_wins_without_penalty() {
        let mut engine = started_engine();
        assert_eq!(engine.submit_guess("DOG"), Some(GuessVerdict::Wrong { score: 900 }));
        assert_eq!(engine.submit_guess("CAT"), Some(GuessVerdict::Won));

        let state = engine.state();
        assert_eq!(state.score, 900);
        assert!(state.game_over);
        assert_eq!(state.outcome, GameOutcome::Won);
        assert_eq!(state.guesses, vec!["DOG", "CAT"]);
        assert_eq!(engine.phase(), GamePhase::Won);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let mut engine = started_engine();
        assert_eq!(engine.submit_guess("cat"), Some(GuessVerdict::Wrong { score: 900 }));
    }

    #[test]
    fn test_free_text_is_normalized() {
        let mut engine = started_engine();
        assert_eq!(engine.submit_text("  cat "), Some(GuessVerdict::Won));
        assert_eq!(engine.state().guesses, vec!["CAT"]);
    }

    #[test]
    fn test_empty_guess_is_noop() {
        let mut engine = started_engine();
        assert_eq!(engine.submit_guess(""), None);
        assert_eq!(engine.submit_current_guess(), None);
        assert_eq!(engine.state().score, 1000);
        assert!(engine.state().guesses.is_empty());
    }

    #[test]
    fn test_ten_wrong_guesses_lose() {
        let mut engine = started_engine();
        for k in 1..10 {
            assert_eq!(
                engine.submit_guess("DOG"),
                Some(GuessVerdict::Wrong { score: 1000 - 100 * k })
            );
            assert!(!engine.state().game_over);
        }
        assert_eq!(engine.submit_guess("DOG"), Some(GuessVerdict::Lost));
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().outcome, GameOutcome::Lost);
        assert_eq!(engine.phase(), GamePhase::Lost);
    }

    #[test]
    fn test_editing_and_capacity() {
        let mut engine = started_engine();
        assert!(engine.edit_guess(GuessEdit::Append('c')));
        assert!(engine.edit_guess(GuessEdit::Append('A')));
        assert!(!engine.edit_guess(GuessEdit::Append('1')));
        assert!(engine.edit_guess(GuessEdit::Append('T')));
        // Capped at the target length
        assert!(!engine.edit_guess(GuessEdit::Append('S')));
        assert_eq!(engine.state().current_guess, "CAT");

        assert!(engine.edit_guess(GuessEdit::Backspace));
        assert_eq!(engine.state().current_guess, "CA");
        assert!(engine.edit_guess(GuessEdit::Backspace));
        assert!(engine.edit_guess(GuessEdit::Backspace));
        assert!(!engine.edit_guess(GuessEdit::Backspace));
    }

    #[test]
    fn test_submission_clears_current_guess() {
        let mut engine = started_engine();
        engine.edit_guess(GuessEdit::Append('D'));
        engine.edit_guess(GuessEdit::Append('O'));
        engine.edit_guess(GuessEdit::Append('G'));
        assert_eq!(engine.submit_current_guess(), Some(GuessVerdict::Wrong { score: 900 }));
        assert_eq!(engine.state().current_guess, "");
    }

    #[test]
    fn test_hints_follow_curriculum() {
        let mut engine = started_engine();

        let first = engine.request_hint().unwrap();
        assert_eq!(
            first,
            HintVerdict::Revealed(Hint::Count { topic: HintKind::LetterCount, value: 3 })
        );
        for _ in 1..5 {
            assert!(matches!(engine.request_hint(), Some(HintVerdict::Revealed(_))));
        }

        let state = engine.state();
        assert_eq!(state.hints_unlocked, 5);
        assert_eq!(state.hints.len(), 5);
        assert_eq!(state.score, 500);
        assert_eq!(state.hints[4].topic(), HintKind::Definition);

        // All hints used
        assert_eq!(engine.request_hint(), None);
        assert!(engine.is_hint_disabled());
        assert_eq!(engine.state().score, 500);
    }

    #[test]
    fn test_hint_at_exactly_penalty_succeeds() {
        let mut engine = started_engine();
        for _ in 0..9 {
            engine.submit_guess("DOG");
        }
        assert_eq!(engine.state().score, 100);
        assert!(engine.is_hint_disabled());

        assert!(matches!(engine.request_hint(), Some(HintVerdict::Revealed(_))));
        assert_eq!(engine.state().score, 0);
        assert!(!engine.state().game_over);

        // Now broke: the next hint forfeits
        assert_eq!(engine.request_hint(), Some(HintVerdict::Lost));
        assert!(engine.state().game_over);
        assert_eq!(engine.state().outcome, GameOutcome::Lost);
        assert_eq!(engine.state().hints_unlocked, 1);
    }

    #[test]
    fn test_unaffordable_hint_forfeits_with_clamp() {
        let rules = ScoringRules {
            starting_score: 150,
            ..ScoringRules::default()
        };
        let mut engine = GameEngine::new(rules);
        engine.start(test_word());
        engine.submit_guess("DOG");
        assert_eq!(engine.state().score, 50);

        assert_eq!(engine.request_hint(), Some(HintVerdict::Lost));
        assert_eq!(engine.state().score, 0);
        assert!(engine.state().hints.is_empty());
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut engine = started_engine();
        engine.request_hint();
        engine.submit_guess("CAT");
        let frozen = engine.state().clone();

        assert_eq!(engine.submit_guess("DOG"), None);
        assert_eq!(engine.request_hint(), None);
        assert!(!engine.edit_guess(GuessEdit::Append('A')));
        assert!(!engine.edit_guess(GuessEdit::Backspace));
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_play_again_starts_new_session() {
        let mut engine = started_engine();
        let first_session = engine.state().session_id;
        engine.submit_guess("CAT");
        assert!(engine.state().game_over);

        let second_session = engine.start(test_word());
        assert_ne!(first_session, second_session);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.state().score, 1000);
    }

    #[test]
    fn test_result_is_taken_once() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let mut engine = started_engine();
        assert_eq!(engine.take_result(date), None);

        engine.request_hint();
        engine.submit_guess("DOG");
        engine.submit_guess("CAT");

        let result = engine.take_result(date).unwrap();
        assert_eq!(result.date, date);
        assert_eq!(result.score, 800);
        assert!(result.won);
        assert_eq!(result.guesses, 2);
        assert_eq!(result.hints_used, 1);
        assert_eq!(engine.take_result(date), None);
    }

    #[test]
    fn test_handle_key() {
        let mut engine = started_engine();
        assert!(engine.handle_key(KeyInput::Letter('C')));
        assert!(engine.handle_key(KeyInput::Letter('A')));
        assert!(engine.handle_key(KeyInput::Letter('T')));
        assert!(engine.handle_key(KeyInput::Enter));
        assert_eq!(engine.state().outcome, GameOutcome::Won);
        assert!(!engine.handle_key(KeyInput::Enter));
    }
}
