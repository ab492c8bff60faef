use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use game_core::{ArtifactError, ArtifactFetcher};
use game_types::DailyArtifact;

/// Writes the artifact as pretty JSON, creating parent directories as needed.
pub async fn write_artifact(path: &Path, artifact: &DailyArtifact) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(artifact)?;
    tokio::fs::write(path, json).await?;

    info!(
        "Wrote daily artifact for {} ({}) to {}",
        artifact.date,
        artifact.word_data.word,
        path.display()
    );
    Ok(())
}

pub async fn read_artifact(path: &Path) -> Result<DailyArtifact, ArtifactError> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Reads the artifact straight from disk.
pub struct FileArtifactFetcher {
    path: PathBuf,
}

impl FileArtifactFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ArtifactFetcher for FileArtifactFetcher {
    async fn fetch_artifact(&self) -> Result<DailyArtifact, ArtifactError> {
        read_artifact(&self.path).await
    }
}

/// Fetches the published artifact over HTTP, e.g. `https://host/daily-word.json`.
pub struct HttpArtifactFetcher {
    client: Client,
    url: String,
}

impl HttpArtifactFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch_artifact(&self) -> Result<DailyArtifact, ArtifactError> {
        debug!("Fetching daily artifact from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ArtifactError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ArtifactError::Http(format!(
                "{} returned status {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ArtifactError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
