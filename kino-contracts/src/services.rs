//! Remote operations consumed by the watch view.
//!
//! Transport is not part of the contract: implementations only promise
//! success/failure and decoded payloads.

use async_trait::async_trait;
use kino_model::{ContentId, ContentMetadata, ProgressSnapshot};

/// Result type for remote service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by remote services
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("content not found: {0}")]
    NotFound(String),

    #[error("unauthorized - please login again")]
    Unauthorized,

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

/// Watch progress persistence.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ProgressService: Send + Sync {
    /// Stored progress for `content_id`, if the viewer has any.
    async fn fetch_initial_progress(
        &self,
        content_id: &ContentId,
    ) -> ServiceResult<Option<ProgressSnapshot>>;

    /// Persist the playhead. Positions are whole seconds.
    async fn save_progress(
        &self,
        content_id: &ContentId,
        position_seconds: u64,
        duration_seconds: u64,
    ) -> ServiceResult<()>;

    /// Flag the title as watched to the end.
    async fn mark_complete(&self, content_id: &ContentId) -> ServiceResult<()>;
}

/// Catalog lookups needed to open a title.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns [`ServiceError::NotFound`] for unknown ids.
    async fn fetch_content_metadata(
        &self,
        content_id: &ContentId,
    ) -> ServiceResult<ContentMetadata>;
}
