#![allow(dead_code)]

use chrono::NaiveDate;
use game_core::{GameEngine, GameEvent, GameEventHandler, WordList, WordSource};
use game_types::{Definition, GameResult, WordData};
use std::sync::{Arc, Mutex};

/// Creates a WordSource over a small known list, starting at the default epoch
pub fn create_test_source() -> WordSource {
    WordSource::new(WordList::parse("cat\ndog\nemu"), game_core::default_epoch()).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Word data that passes the quality gate
pub fn create_word_data(word: &str) -> WordData {
    WordData::new(
        word,
        2,
        Definition {
            part_of_speech: vec!["noun".to_string()],
            synonym: vec!["ratite".to_string()],
            sentence: vec!["an _______ cannot fly".to_string()],
            definition: vec!["a large flightless Australian bird".to_string()],
        },
    )
}

/// Creates an engine already playing the given word
pub fn create_started_engine(word: &str) -> GameEngine {
    let mut engine = GameEngine::default();
    engine.start(create_word_data(word));
    engine
}

pub fn create_result(d: &str, score: u32) -> GameResult {
    GameResult {
        date: date(d),
        score,
        won: score > 0,
        guesses: 2,
        hints_used: 1,
    }
}

/// Records every engine event it sees.
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn count_where(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| predicate(e)).count()
    }
}

impl GameEventHandler for EventCollector {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
