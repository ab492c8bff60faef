use game_types::{GameSummary, Hint, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted {
        session_id: SessionId,
        word_length: u32,
        max_hints: u32,
    },
    GuessSubmitted {
        session_id: SessionId,
        guess: String,
        correct: bool,
        score: u32,
    },
    HintUnlocked {
        session_id: SessionId,
        hint: Hint,
        hints_unlocked: u32,
        score: u32,
    },
    GameWon {
        session_id: SessionId,
        summary: GameSummary,
    },
    GameLost {
        session_id: SessionId,
        summary: GameSummary,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            GameEvent::GameStarted { session_id, .. }
            | GameEvent::GuessSubmitted { session_id, .. }
            | GameEvent::HintUnlocked { session_id, .. }
            | GameEvent::GameWon { session_id, .. }
            | GameEvent::GameLost { session_id, .. } => *session_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameWon { .. } | GameEvent::GameLost { .. })
    }
}

/// Observer of engine transitions, e.g. analytics or the stats recorder.
pub trait GameEventHandler {
    fn on_event(&mut self, event: &GameEvent);
}

/// Fans each transition out to the registered handlers in registration order.
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.handlers
            .iter_mut()
            .for_each(|handler| handler.on_event(&event));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    struct Recorder {
        label: &'static str,
        seen: Arc<Mutex<Vec<(&'static str, GameEvent)>>>,
    }

    impl GameEventHandler for Recorder {
        fn on_event(&mut self, event: &GameEvent) {
            self.seen.lock().unwrap().push((self.label, event.clone()));
        }
    }

    #[test]
    fn test_handlers_see_events_in_registration_order() {
        let mut bus = GameEventBus::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(Recorder { label: "first", seen: seen.clone() }));
        bus.add_handler(Box::new(Recorder { label: "second", seen: seen.clone() }));
        assert_eq!(bus.handler_count(), 2);

        let session_id = Uuid::new_v4();
        bus.publish(GameEvent::GameStarted {
            session_id,
            word_length: 10,
            max_hints: 5,
        });

        let seen = seen.lock().unwrap();
        let labels: Vec<_> = seen.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["first", "second"]);
        assert_eq!(seen[0].1.session_id(), session_id);
        assert!(!seen[1].1.is_terminal());
    }
}
