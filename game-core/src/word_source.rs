use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// First day of the word rotation, in UTC.
pub const DEFAULT_EPOCH: &str = "2026-01-27";

pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 27).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("word list is empty")]
    EmptyWordList,
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered list of distinct lowercase candidate words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Parse a word list, one word per line. Blank lines, `#` comments,
    /// non-alphabetic entries and repeats are skipped; order is preserved.
    pub fn parse(text: &str) -> Self {
        let mut seen = HashSet::new();
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .filter(|word| word.chars().all(|c| c.is_ascii_alphabetic()))
            .filter(|word| seen.insert(word.clone()))
            .collect();

        Self { words }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WordSourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WordSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::parse(&text);
        tracing::debug!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.words.iter().any(|w| *w == word)
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let text: Vec<String> = iter.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse(&text.join("\n"))
    }
}

/// Maps calendar days to words. Every player gets the same word for the same UTC date.
#[derive(Debug, Clone)]
pub struct WordSource {
    words: WordList,
    epoch: NaiveDate,
}

impl WordSource {
    pub fn new(words: WordList, epoch: NaiveDate) -> Result<Self, WordSourceError> {
        if words.is_empty() {
            return Err(WordSourceError::EmptyWordList);
        }
        Ok(Self { words, epoch })
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Negative for dates before the epoch.
    pub fn days_since_epoch(&self, date: NaiveDate) -> i64 {
        (date - self.epoch).num_days()
    }

    pub fn index_for_day(&self, date: NaiveDate) -> usize {
        wrap_index(self.days_since_epoch(date), self.words.len())
    }

    pub fn word_for_day(&self, date: NaiveDate) -> &str {
        self.word_at(self.index_for_day(date) as i64)
    }

    /// Any offset is wrapped onto the list.
    pub fn word_at(&self, offset: i64) -> &str {
        &self.words.words[wrap_index(offset, self.words.len())]
    }

    /// The day's word followed by the words after it, wrapping around,
    /// without visiting any word twice.
    pub fn candidates(&self, date: NaiveDate, limit: usize) -> impl Iterator<Item = &str> + '_ {
        let start = self.index_for_day(date) as i64;
        let count = limit.min(self.words.len()) as i64;
        (0..count).map(move |i| self.word_at(start + i))
    }
}

/// Stateless form of [`WordSource::word_for_day`].
pub fn word_for_day<'a>(
    date: NaiveDate,
    words: &'a [String],
    epoch: NaiveDate,
) -> Result<&'a str, WordSourceError> {
    if words.is_empty() {
        return Err(WordSourceError::EmptyWordList);
    }
    let index = wrap_index((date - epoch).num_days(), words.len());
    Ok(&words[index])
}

fn wrap_index(offset: i64, len: usize) -> usize {
    offset.rem_euclid(len as i64) as usize
}

/// Source of "today". All day arithmetic in the game uses UTC dates.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
