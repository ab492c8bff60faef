use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use game_core::{MIN_DEFINITION_LEN, ProviderError, WordDataProvider, mask_word_forms};
use game_types::{Definition, MASK_TOKEN, WordData};

const MAX_SENTENCES: usize = 3;
const MAX_DEFINITIONS: usize = 3;
const MAX_PARTS_OF_SPEECH: usize = 3;
const MIN_SENTENCE_LEN: usize = 10;

/// Merriam-Webster collegiate dictionary client.
pub struct MerriamWebsterProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MerriamWebsterProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn entry_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), word)
    }
}

#[async_trait]
impl WordDataProvider for MerriamWebsterProvider {
    async fn fetch_word_data(&self, word: &str) -> Result<WordData, ProviderError> {
        debug!("Looking up '{}' in the dictionary", word);

        let response = self
            .client
            .get(self.entry_url(word))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(word.to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "dictionary returned status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| ProviderError::Malformed {
            word: word.to_string(),
            message: e.to_string(),
        })?;

        parse_entries(word, &body)
    }
}

/// Turns a collegiate API response into word data for `word`.
pub fn parse_entries(word: &str, body: &Value) -> Result<WordData, ProviderError> {
    let entries = body.as_array().ok_or_else(|| ProviderError::Malformed {
        word: word.to_string(),
        message: "expected a JSON array".to_string(),
    })?;

    // An array of plain strings is the "did you mean" suggestion list.
    let Some(first) = entries.first() else {
        return Err(ProviderError::NotFound(word.to_string()));
    };
    if first.is_string() {
        return Err(ProviderError::NotFound(word.to_string()));
    }

    let entries: Vec<&Value> = entries.iter().filter(|entry| entry.is_object()).collect();
    let headword_entries: Vec<&Value> = entries
        .iter()
        .copied()
        .filter(|entry| is_headword_entry(entry, word))
        .collect();
    let headword_entries = if headword_entries.is_empty() {
        entries.clone()
    } else {
        headword_entries
    };
    let Some(entry) = headword_entries.first().copied() else {
        return Err(ProviderError::Malformed {
            word: word.to_string(),
            message: "no dictionary entries".to_string(),
        });
    };

    let syllables = entry
        .pointer("/hwi/hw")
        .and_then(Value::as_str)
        .map(count_syllables)
        .unwrap_or(1);

    let mut part_of_speech: Vec<String> = Vec::new();
    for fl in headword_entries
        .iter()
        .filter_map(|entry| entry.get("fl").and_then(Value::as_str))
    {
        if !part_of_speech.iter().any(|known| known == fl) {
            part_of_speech.push(fl.to_string());
        }
    }
    part_of_speech.truncate(MAX_PARTS_OF_SPEECH);

    let mut stems: Vec<String> = entry
        .pointer("/meta/stems")
        .and_then(Value::as_array)
        .map(|stems| {
            stems
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if !stems.iter().any(|stem| stem.eq_ignore_ascii_case(word)) {
        stems.push(word.to_string());
    }
    // Longer forms first so "running" is masked before "run" can split it.
    stems.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut sentence = Vec::new();
    for entry in &entries {
        let mut raw = Vec::new();
        if let Some(def) = entry.get("def") {
            collect_examples(def, &mut raw);
        }
        for text in raw {
            let masked = mask_word_forms(&strip_markup(&text), &stems);
            if masked.chars().count() > MIN_SENTENCE_LEN
                && masked.contains(MASK_TOKEN)
                && !sentence.contains(&masked)
            {
                sentence.push(masked);
            }
        }
    }
    sentence.truncate(MAX_SENTENCES);

    Ok(WordData::new(
        word,
        syllables,
        Definition {
            part_of_speech,
            synonym: Vec::new(),
            sentence,
            definition: extract_definitions(entry),
        },
    ))
}

fn is_headword_entry(entry: &Value, word: &str) -> bool {
    entry
        .pointer("/meta/id")
        .and_then(Value::as_str)
        .map(|id| id.split(':').next().unwrap_or(id))
        .is_some_and(|id| id.eq_ignore_ascii_case(word))
}

/// `hw` marks syllable breaks with `*`, e.g. `dis*ci*pline`.
fn count_syllables(headword: &str) -> u32 {
    let parts = headword.split('*').filter(|part| !part.is_empty()).count();
    parts.max(1) as u32
}

/// Walks a `def` tree collecting the text of every `vis` example.
fn collect_examples(node: &Value, out: &mut Vec<String>) {
    let Some(items) = node.as_array() else {
        if let Some(object) = node.as_object() {
            for value in object.values() {
                collect_examples(value, out);
            }
        }
        return;
    };

    if items.first().and_then(Value::as_str) == Some("vis") {
        if let Some(examples) = items.get(1).and_then(Value::as_array) {
            out.extend(
                examples
                    .iter()
                    .filter_map(|example| example.get("t").and_then(Value::as_str))
                    .map(str::to_string),
            );
        }
        return;
    }

    for item in items {
        collect_examples(item, out);
    }
}

fn extract_definitions(entry: &Value) -> Vec<String> {
    let mut definitions: Vec<String> = entry
        .get("shortdef")
        .and_then(Value::as_array)
        .map(|shortdefs| {
            shortdefs
                .iter()
                .filter_map(Value::as_str)
                .map(strip_such_as)
                .filter(|def| def.chars().count() >= MIN_DEFINITION_LEN)
                .take(MAX_DEFINITIONS)
                .collect()
        })
        .unwrap_or_default();

    if definitions.is_empty() {
        let first_sense = entry
            .pointer("/def/0/sseq/0/0/1/dt")
            .and_then(Value::as_array)
            .map(|dt| {
                dt.iter()
                    .filter(|item| item.get(0).and_then(Value::as_str) == Some("text"))
                    .filter_map(|item| item.get(1).and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .map(|text| strip_such_as(&strip_markup(&text)))
            .unwrap_or_default();

        if !first_sense.is_empty() {
            definitions.push(first_sense);
        }
    }

    definitions
}

/// Cross-reference tokens whose first field after the name is display text.
const LINK_TOKENS: &[&str] = &["a_link", "d_link", "i_link", "et_link", "sx", "dxt", "mat"];

/// Removes `{..}` formatting tokens, keeps the display text of link tokens
/// such as `{d_link|bird|bird}`, and collapses whitespace.
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        plain.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unterminated token, keep the text as it is
            plain.push_str(&rest[open..]);
            rest = "";
            break;
        };

        let token = &after[..close];
        let mut fields = token.split('|');
        let name = fields.next().unwrap_or_default();
        match name {
            "ldquo" | "rdquo" => plain.push('"'),
            _ if LINK_TOKENS.contains(&name) => {
                if let Some(display) = fields.next() {
                    // Sense numbers ride along as `word:2`
                    plain.push_str(display.split(':').next().unwrap_or(display));
                }
            }
            _ => {}
        }
        rest = &after[close + 1..];
    }
    plain.push_str(rest);

    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_such_as(text: &str) -> String {
    const SUCH_AS: &str = "such as";
    let trimmed = text.trim();
    if let Some(cut) = trimmed.len().checked_sub(SUCH_AS.len()) {
        if trimmed.is_char_boundary(cut) && trimmed[cut..].eq_ignore_ascii_case(SUCH_AS) {
            return trimmed[..cut].trim_end().trim_end_matches(':').trim_end().to_string();
        }
    }
    trimmed.to_string()
}
