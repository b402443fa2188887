//! HTTP client for the remote flashcard store.

use std::sync::Arc;

use flashcard_core::{Flashcard, FlashcardPatch, NewFlashcard, SwapPlan};
use reqwest::{Client, Response};

/// Remote store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl StoreError {
    /// HTTP status for backend errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

struct StoreClientInner {
    client: Client,
    base_url: String,
}

/// Client for the `/flashCards` resource.
///
/// Cheap to clone; clones share one connection pool, so a clone can be
/// moved into a spawned task.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StoreClientInner {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Check if the store is reachable.
    pub async fn check_connectivity(&self) -> Result<bool, StoreError> {
        let url = format!("{}/health", self.inner.base_url);
        match self.inner.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => Err(StoreError::Network(e.to_string())),
        }
    }

    /// GET /flashCards
    pub async fn list(&self) -> Result<Vec<Flashcard>, StoreError> {
        let url = format!("{}/flashCards", self.inner.base_url);

        let resp = self
            .inner
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::parse(Self::check(resp).await?).await
    }

    /// POST /flashCards
    pub async fn create(&self, card: &NewFlashcard) -> Result<Flashcard, StoreError> {
        let url = format!("{}/flashCards", self.inner.base_url);

        let resp = self
            .inner
            .client
            .post(&url)
            .json(card)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::parse(Self::check(resp).await?).await
    }

    /// PATCH /flashCards/{id}
    pub async fn update(&self, id: i64, patch: &FlashcardPatch) -> Result<Flashcard, StoreError> {
        let url = format!("{}/flashCards/{}", self.inner.base_url, id);

        let resp = self
            .inner
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::parse(Self::check(resp).await?).await
    }

    /// PATCH /flashCards/{id} with only `questionOrder`.
    pub async fn update_order(&self, id: i64, order: f64) -> Result<Flashcard, StoreError> {
        self.update(id, &FlashcardPatch::order(order)).await
    }

    /// DELETE /flashCards/{id}
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let url = format!("{}/flashCards/{}", self.inner.base_url, id);

        let resp = self
            .inner
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Self::check(resp).await?;
        Ok(())
    }

    /// Write both halves of a swap, source first.
    ///
    /// The target is only written once the source write succeeded. Nothing is
    /// undone when the second write fails.
    pub async fn persist_swap(&self, plan: &SwapPlan) -> Result<(), StoreError> {
        self.update_order(plan.source_id, plan.source_order).await?;
        self.update_order(plan.target_id, plan.target_order).await?;
        Ok(())
    }

    // === Private methods ===

    async fn check(resp: Response) -> Result<Response, StoreError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        Err(StoreError::Backend { status, message })
    }

    async fn parse<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
        resp.json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))
    }
}
