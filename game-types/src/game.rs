use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::SessionId;

/// One sense of the target word, as produced by the daily build job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(default)]
    pub synonym: Vec<String>,
    /// Example sentences with the target word masked.
    #[serde(default)]
    pub sentence: Vec<String>,
    /// Older artifacts carry a single string here, newer ones a list.
    #[serde(default, deserialize_with = "string_or_list")]
    pub definition: Vec<String>,
}

impl Definition {
    pub fn first_definition(&self) -> Option<&str> {
        self.definition.first().map(String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(text) if text.is_empty() => Vec::new(),
        StringOrList::One(text) => vec![text],
        StringOrList::Many(list) => list,
    })
}

/// Everything a session needs to know about the day's word. Immutable once a game starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub word: String,
    pub num_of_letters: u32,
    #[serde(default)]
    pub num_of_syllables: u32,
    pub definitions: BTreeMap<u32, Definition>,
}

impl WordData {
    pub fn new(word: &str, num_of_syllables: u32, definition: Definition) -> Self {
        let word = word.trim().to_uppercase();
        let mut definitions = BTreeMap::new();
        definitions.insert(1, definition);

        Self {
            num_of_letters: word.chars().count() as u32,
            word,
            num_of_syllables,
            definitions,
        }
    }

    /// Canonical form of data read from outside: trimmed upper-case word and a
    /// letter count that agrees with it.
    pub fn normalized(mut self) -> Self {
        self.word = self.word.trim().to_uppercase();
        self.num_of_letters = self.word.chars().count() as u32;
        self
    }

    /// Sense 1, or the lowest-numbered sense when an artifact skipped it.
    pub fn primary_definition(&self) -> Option<&Definition> {
        self.definitions
            .get(&1)
            .or_else(|| self.definitions.values().next())
    }
}

/// The static file published once per day: `{ "date": "YYYY-MM-DD", "wordData": { .. } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyArtifact {
    pub date: NaiveDate,
    pub word_data: WordData,
}

/// Hint levels, cheapest and least specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum HintKind {
    LetterCount,
    SyllableCount,
    PartsOfSpeech,
    Synonyms,
    ExampleSentences,
    Definition,
}

impl HintKind {
    pub fn label(self) -> &'static str {
        match self {
            HintKind::LetterCount => "Number of letters",
            HintKind::SyllableCount => "Number of syllables",
            HintKind::PartsOfSpeech => "Parts of speech",
            HintKind::Synonyms => "Synonyms",
            HintKind::ExampleSentences => "Word used in a sentence",
            HintKind::Definition => "Definition",
        }
    }
}

/// A revealed hint. Every unlocked level contributes exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Hint {
    Count { topic: HintKind, value: u32 },
    Text { topic: HintKind, value: String },
    TextList { topic: HintKind, values: Vec<String> },
}

impl Hint {
    pub fn topic(&self) -> HintKind {
        match self {
            Hint::Count { topic, .. } | Hint::Text { topic, .. } | Hint::TextList { topic, .. } => {
                *topic
            }
        }
    }

    /// Text shown next to the hint label.
    pub fn display_value(&self) -> String {
        match self {
            Hint::Count { value, .. } => value.to_string(),
            Hint::Text { value, .. } => value.clone(),
            Hint::TextList { values, .. } => values.join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum GameOutcome {
    Unresolved,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Loading,
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Per-session state, owned exclusively by the engine and handed out read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub session_id: SessionId,
    pub current_guess: String,
    pub guesses: Vec<String>,
    pub score: u32,
    pub hints_unlocked: u32,
    pub hints: Vec<Hint>,
    pub game_over: bool,
    pub outcome: GameOutcome,
}

impl GameState {
    pub fn new(session_id: SessionId, starting_score: u32) -> Self {
        Self {
            session_id,
            current_guess: String::new(),
            guesses: Vec::new(),
            score: starting_score,
            hints_unlocked: 0,
            hints: Vec::new(),
            game_over: false,
            outcome: GameOutcome::Unresolved,
        }
    }
}

/// End-of-game figures shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub word: String,
    pub guesses: u32,
    pub hints_used: u32,
    pub score: u32,
    pub outcome: GameOutcome,
}

/// Display band for the running score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
    Critical,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            700.. => ScoreBand::High,
            400..=699 => ScoreBand::Medium,
            200..=399 => ScoreBand::Low,
            _ => ScoreBand::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_with_single_string_definition() {
        let json = r#"{
            "date": "2026-02-01",
            "wordData": {
                "word": "DISCIPLINE",
                "numOfLetters": 10,
                "numOfSyllables": 3,
                "definitions": {
                    "1": {
                        "partOfSpeech": ["noun"],
                        "sentence": ["lacked the _______ to practice regularly"],
                        "definition": "control gained by enforcing obedience or order"
                    }
                }
            }
        }"#;

        let artifact: DailyArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        let definition = artifact.word_data.primary_definition().unwrap();
        assert_eq!(
            definition.first_definition(),
            Some("control gained by enforcing obedience or order")
        );
        assert!(definition.synonym.is_empty());
    }

    #[test]
    fn test_definition_list_and_missing_syllables() {
        let json = r#"{
            "word": "EMU",
            "numOfLetters": 3,
            "definitions": {
                "2": { "partOfSpeech": ["noun"], "definition": ["a large flightless bird", "second"] }
            }
        }"#;

        let data: WordData = serde_json::from_str(json).unwrap();
        assert_eq!(data.num_of_syllables, 0);
        // Falls back to the lowest sense when 1 is missing
        assert_eq!(data.primary_definition().unwrap().definition.len(), 2);
    }

    #[test]
    fn test_word_data_new_normalizes_word() {
        let data = WordData::new(" discipline ", 3, Definition::default());
        assert_eq!(data.word, "DISCIPLINE");
        assert_eq!(data.num_of_letters, 10);
        assert!(data.definitions.contains_key(&1));
    }

    #[test]
    fn test_normalized_repairs_external_word_data() {
        let json = r#"{"word":"emu ","numOfLetters":7,"definitions":{"1":{"partOfSpeech":[],"synonym":[],"sentence":[],"definition":"a large flightless bird"}}}"#;
        let data: WordData = serde_json::from_str(json).unwrap();
        let data = data.normalized();
        assert_eq!(data.word, "EMU");
        assert_eq!(data.num_of_letters, 3);
    }

    #[test]
    fn test_phase_serializes_camel_case() {
        assert_eq!(serde_json::to_value(GamePhase::Loading).unwrap(), "loading");
        assert_eq!(serde_json::to_value(GamePhase::Won).unwrap(), "won");
        assert_eq!(serde_json::to_value(GameOutcome::Unresolved).unwrap(), "unresolved");
    }

    #[test]
    fn test_hint_serializes_as_tagged_union() {
        let hint = Hint::Count {
            topic: HintKind::LetterCount,
            value: 5,
        };
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json["kind"], "count");
        assert_eq!(json["topic"], "letterCount");

        let list = Hint::TextList {
            topic: HintKind::PartsOfSpeech,
            values: vec!["noun".to_string(), "verb".to_string()],
        };
        assert_eq!(list.display_value(), "noun, verb");
        assert_eq!(list.topic().label(), "Parts of speech");
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(1000), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(700), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(699), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(400), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(200), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(199), ScoreBand::Critical);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Critical);
    }
}
