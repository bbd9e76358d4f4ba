use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{PairId, TaggedType},
    protocol::{CreatePairRequest, ImageTextPair, MarkPairRequest, PairPage},
};
use tracing::{info, warn};

pub mod config;
pub mod error;
mod session_store;

pub use error::ServiceError;
pub use session_store::DurableCursorStore;

/// The four REST operations the backend exposes for image-text pairs.
/// `HttpPairClient` is the production implementation; tests substitute
/// recording doubles.
#[async_trait]
pub trait PairService: Send + Sync {
    async fn list_pairs(&self, page: u32, limit: u32) -> Result<PairPage, ServiceError>;
    async fn pair_by_id(&self, id: PairId) -> Result<ImageTextPair, ServiceError>;
    async fn mark_pair(
        &self,
        tagged_type: TaggedType,
        id: PairId,
        batch: &str,
    ) -> Result<(), ServiceError>;
    async fn create_pair(&self, request: CreatePairRequest) -> Result<ImageTextPair, ServiceError>;
}

/// Durable home for the operator's position, read once at startup and
/// written on every cursor change.
#[async_trait]
pub trait CursorStore: Send + Sync {
    async fn load(&self) -> Result<Option<i64>>;
    async fn store(&self, id: i64) -> Result<()>;
}

pub struct HttpPairClient {
    http: Client,
    server_url: String,
}

impl HttpPairClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http: Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PairService for HttpPairClient {
    async fn list_pairs(&self, page: u32, limit: u32) -> Result<PairPage, ServiceError> {
        let listing: PairPage = self
            .http
            .get(format!("{}/tags", self.server_url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(listing)
    }

    async fn pair_by_id(&self, id: PairId) -> Result<ImageTextPair, ServiceError> {
        let response = self
            .http
            .get(format!("{}/tags/{}", self.server_url, id.0))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(id.0));
        }
        let pair: ImageTextPair = response.error_for_status()?.json().await?;
        Ok(pair)
    }

    async fn mark_pair(
        &self,
        tagged_type: TaggedType,
        id: PairId,
        batch: &str,
    ) -> Result<(), ServiceError> {
        self.http
            .put(format!("{}/tags/tag/{}", self.server_url, id.0))
            .json(&MarkPairRequest {
                tagged_type,
                id,
                batch: batch.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_pair(&self, request: CreatePairRequest) -> Result<ImageTextPair, ServiceError> {
        let pair: ImageTextPair = self
            .http
            .post(format!("{}/tags", self.server_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(pair)
    }
}

/// Static image assets live under a separate base path; stored pair paths
/// are joined onto it verbatim.
pub fn resolve_image_url(static_base: &str, image_path: &str) -> String {
    format!(
        "{}/{}",
        static_base.trim_end_matches('/'),
        image_path.trim_start_matches('/')
    )
}

/// Owns the operator's position in the pair sequence: the persisted cursor,
/// an append-only cache of everything fetched this session, and the pair
/// currently on screen. One instance per session; the UI loop drives it.
pub struct PairNavigator {
    service: Arc<dyn PairService>,
    cursor_store: Arc<dyn CursorStore>,
    cursor: i64,
    cache: HashMap<PairId, ImageTextPair>,
    current: Option<ImageTextPair>,
    loading: bool,
    last_error: Option<String>,
}

impl PairNavigator {
    pub async fn new(service: Arc<dyn PairService>, cursor_store: Arc<dyn CursorStore>) -> Self {
        let cursor = match cursor_store.load().await {
            Ok(Some(id)) => id,
            Ok(None) => 0,
            Err(err) => {
                warn!("failed to restore cursor, starting at 0: {err}");
                0
            }
        };
        Self {
            service,
            cursor_store,
            cursor,
            cache: HashMap::new(),
            current: None,
            loading: false,
            last_error: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn current(&self) -> Option<&ImageTextPair> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn load_current(&mut self) {
        self.load_by_id(self.cursor).await;
    }

    pub async fn load_by_id(&mut self, id: i64) {
        self.loading = true;
        self.last_error = None;

        if let Some(pair) = self.cache.get(&PairId(id)).cloned() {
            info!(pair_id = id, "pair served from cache");
            self.current = Some(pair);
            self.set_cursor(id).await;
            self.loading = false;
            return;
        }

        match self.service.pair_by_id(PairId(id)).await {
            Ok(pair) => {
                let resolved = pair.id;
                if resolved.0 != id {
                    info!(
                        requested = id,
                        resolved = resolved.0,
                        "server resolved a different pair id"
                    );
                }
                self.cache.insert(resolved, pair.clone());
                self.current = Some(pair);
                self.set_cursor(resolved.0).await;
            }
            Err(err) => {
                warn!(pair_id = id, "failed to load pair: {err}");
                self.last_error = Some(format!("failed to load pair {id}: {err}"));
            }
        }
        self.loading = false;
    }

    pub async fn load_next(&mut self) {
        self.load_by_id(self.cursor + 1).await;
    }

    pub async fn load_prev(&mut self) {
        if self.cursor <= 0 {
            return;
        }
        self.load_by_id(self.cursor - 1).await;
    }

    /// Sends the tag for the pair on screen. The local copy keeps its old
    /// `tagged_type`: the backend owns that field, and the displayed value
    /// refreshes on the next uncached fetch.
    pub async fn mark_current(&mut self, tagged_type: TaggedType) {
        let Some((id, batch)) = self.current.as_ref().map(|p| (p.id, p.batch.clone())) else {
            return;
        };
        self.last_error = None;
        match self.service.mark_pair(tagged_type, id, &batch).await {
            Ok(()) => info!(pair_id = id.0, %tagged_type, "pair marked"),
            Err(err) => {
                warn!(pair_id = id.0, "failed to mark pair: {err}");
                self.last_error = Some(format!("failed to mark pair {}: {err}", id.0));
            }
        }
    }

    async fn set_cursor(&mut self, id: i64) {
        if self.cursor == id {
            return;
        }
        self.cursor = id;
        if let Err(err) = self.cursor_store.store(id).await {
            warn!(cursor = id, "failed to persist cursor: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
