use anyhow::Result;

use crate::{ONBOARDED_KEY, SharedStore};

/// Tracks whether this device has been shown the how-to-play screen.
pub struct Onboarding {
    store: SharedStore,
}

impl Onboarding {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// True exactly once per device; the first call records the flag.
    pub async fn should_show_help(&self) -> Result<bool> {
        if self.store.get(ONBOARDED_KEY).await?.is_some() {
            return Ok(false);
        }
        self.store.set(ONBOARDED_KEY, "true").await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[tokio::test]
    async fn test_help_shown_once() {
        let onboarding = Onboarding::new(MemoryStore::shared());
        assert!(onboarding.should_show_help().await.unwrap());
        assert!(!onboarding.should_show_help().await.unwrap());
    }
}
