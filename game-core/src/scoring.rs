use game_types::{Hint, HintKind, WordData};

pub const STARTING_SCORE: u32 = 1000;
pub const GUESS_PENALTY: u32 = 100;
pub const HINT_PENALTY: u32 = 100;

/// Point values for a session. `Default` gives the published rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub starting_score: u32,
    pub guess_penalty: u32,
    pub hint_penalty: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            starting_score: STARTING_SCORE,
            guess_penalty: GUESS_PENALTY,
            hint_penalty: HINT_PENALTY,
        }
    }
}

/// The ordered hint levels available for one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintCurriculum {
    levels: Vec<HintKind>,
}

impl HintCurriculum {
    /// Synonyms are only offered when the word data carries some.
    pub fn for_word(word_data: &WordData) -> Self {
        let has_synonyms = word_data
            .primary_definition()
            .is_some_and(|definition| !definition.synonym.is_empty());

        let levels = [
            HintKind::LetterCount,
            HintKind::SyllableCount,
            HintKind::PartsOfSpeech,
            HintKind::Synonyms,
            HintKind::ExampleSentences,
            HintKind::Definition,
        ]
        .into_iter()
        .filter(|kind| has_synonyms || *kind != HintKind::Synonyms)
        .collect();

        Self { levels }
    }

    pub fn from_levels(levels: Vec<HintKind>) -> Self {
        Self { levels }
    }

    pub fn max_hints(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Level numbers start at 1, matching `hints_unlocked` after the unlock.
    pub fn kind_for_level(&self, level: u32) -> Option<HintKind> {
        let index = level.checked_sub(1)? as usize;
        self.levels.get(index).copied()
    }

    pub fn levels(&self) -> &[HintKind] {
        &self.levels
    }
}

/// Builds the payload for a hint level. Missing data yields an empty payload
/// so that every unlocked level still contributes exactly one hint.
pub fn hint_for(kind: HintKind, word_data: &WordData) -> Hint {
    let definition = word_data.primary_definition();
    let list = |select: fn(&game_types::Definition) -> &Vec<String>| {
        definition.map(|d| select(d).clone()).unwrap_or_default()
    };

    match kind {
        HintKind::LetterCount => Hint::Count {
            topic: kind,
            value: word_data.num_of_letters,
        },
        HintKind::SyllableCount => Hint::Count {
            topic: kind,
            value: word_data.num_of_syllables,
        },
        HintKind::PartsOfSpeech => Hint::TextList {
            topic: kind,
            values: list(|d| &d.part_of_speech),
        },
        HintKind::Synonyms => Hint::TextList {
            topic: kind,
            values: list(|d| &d.synonym),
        },
        HintKind::ExampleSentences => Hint::TextList {
            topic: kind,
            values: list(|d| &d.sentence),
        },
        HintKind::Definition => Hint::Text {
            topic: kind,
            value: definition
                .and_then(|d| d.first_definition())
                .unwrap_or_default()
                .to_string(),
        },
    }
}

pub fn hint_button_label(hints_unlocked: u32, max_hints: u32, hint_penalty: u32) -> String {
    if hints_unlocked >= max_hints {
        "All Hints Used".to_string()
    } else {
        format!("Get Hint ({}/{}) - {} pts", hints_unlocked, max_hints, hint_penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::Definition;

    fn word_data(synonyms: &[&str]) -> WordData {
        WordData::new(
            "discipline",
            3,
            Definition {
                part_of_speech: vec!["noun".to_string()],
                synonym: synonyms.iter().map(|s| s.to_string()).collect(),
                sentence: vec!["lacked the _______ to practice".to_string()],
                definition: vec![
                    "control gained by enforcing obedience".to_string(),
                    "a field of study".to_string(),
                ],
            },
        )
    }

    #[test]
    fn test_curriculum_without_synonyms() {
        let curriculum = HintCurriculum::for_word(&word_data(&[]));
        assert_eq!(curriculum.max_hints(), 5);
        assert_eq!(
            curriculum.levels(),
            &[
                HintKind::LetterCount,
                HintKind::SyllableCount,
                HintKind::PartsOfSpeech,
                HintKind::ExampleSentences,
                HintKind::Definition,
            ]
        );
    }

    #[test]
    fn test_curriculum_with_synonyms() {
        let curriculum = HintCurriculum::for_word(&word_data(&["order", "control"]));
        assert_eq!(curriculum.max_hints(), 6);
        assert_eq!(curriculum.kind_for_level(4), Some(HintKind::Synonyms));
        assert_eq!(curriculum.kind_for_level(0), None);
        assert_eq!(curriculum.kind_for_level(7), None);
    }

    #[test]
    fn test_hint_payloads() {
        let data = word_data(&[]);

        assert_eq!(
            hint_for(HintKind::LetterCount, &data),
            Hint::Count { topic: HintKind::LetterCount, value: 10 }
        );
        assert_eq!(
            hint_for(HintKind::SyllableCount, &data),
            Hint::Count { topic: HintKind::SyllableCount, value: 3 }
        );
        assert_eq!(
            hint_for(HintKind::PartsOfSpeech, &data),
            Hint::TextList { topic: HintKind::PartsOfSpeech, values: vec!["noun".to_string()] }
        );
        // Single-string consumers take the first definition
        assert_eq!(
            hint_for(HintKind::Definition, &data),
            Hint::Text {
                topic: HintKind::Definition,
                value: "control gained by enforcing obedience".to_string()
            }
        );
    }

    #[test]
    fn test_hint_for_missing_definition_is_empty() {
        let mut data = word_data(&[]);
        data.definitions.clear();

        assert_eq!(
            hint_for(HintKind::ExampleSentences, &data),
            Hint::TextList { topic: HintKind::ExampleSentences, values: vec![] }
        );
        assert_eq!(
            hint_for(HintKind::Definition, &data),
            Hint::Text { topic: HintKind::Definition, value: String::new() }
        );
    }

    #[test]
    fn test_hint_button_label() {
        assert_eq!(hint_button_label(0, 5, 100), "Get Hint (0/5) - 100 pts");
        assert_eq!(hint_button_label(5, 5, 100), "All Hints Used");
    }
}
