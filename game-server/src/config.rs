use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use game_core::{DEFAULT_EPOCH, MAX_RETRIES};

pub const DEFAULT_DICTIONARY_API_BASE: &str =
    "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub word_list_path: PathBuf,
    pub daily_artifact_path: PathBuf,
    pub epoch: NaiveDate,
    pub max_retries: usize,
    pub dictionary_api_key: Option<String>,
    pub dictionary_api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_dir = PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| "./public".to_string()));
        let word_list_path = lookup("WORD_LIST_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| public_dir.join("uniqueWords.txt"));
        let daily_artifact_path = lookup("DAILY_ARTIFACT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| public_dir.join("daily-word.json"));

        let epoch_text = lookup("EPOCH_DATE").unwrap_or_else(|| DEFAULT_EPOCH.to_string());
        let epoch = NaiveDate::parse_from_str(&epoch_text, "%Y-%m-%d")
            .with_context(|| format!("Invalid EPOCH_DATE '{}'", epoch_text))?;

        let dictionary_api_key = lookup("MERRIAM_WEBSTER_API_KEY")
            .or_else(|| lookup("VITE_MERRIAM_WEBSTER_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT", 8080)?,
            public_dir,
            word_list_path,
            daily_artifact_path,
            epoch,
            max_retries: parse_var(&lookup, "MAX_RETRIES", MAX_RETRIES)?,
            dictionary_api_key,
            dictionary_api_base: lookup("DICTIONARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_DICTIONARY_API_BASE.to_string()),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} '{}'", name, value)),
        None => Ok(default),
    }
}
