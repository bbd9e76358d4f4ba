use anyhow::{Context, Result};
use async_trait::async_trait;
use storage::Storage;

use crate::CursorStore;

const CURSOR_KEY: &str = "current_pair_id";

/// `CursorStore` backed by the SQLite session store. The cursor is kept as a
/// decimal string under a fixed key; a value that does not parse is treated
/// as absent so the navigator falls back to pair 0.
pub struct DurableCursorStore {
    storage: Storage,
}

impl DurableCursorStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CursorStore for DurableCursorStore {
    async fn load(&self) -> Result<Option<i64>> {
        let raw = self.storage.session_value(CURSOR_KEY).await?;
        Ok(raw.and_then(|value| value.trim().parse::<i64>().ok()))
    }

    async fn store(&self, id: i64) -> Result<()> {
        self.storage
            .set_session_value(CURSOR_KEY, &id.to_string())
            .await
            .context("failed to persist current pair id")
    }
}

#[cfg(test)]
#[path = "tests/session_store_tests.rs"]
mod tests;
