use async_trait::async_trait;
use kino_contracts::services::{
    CatalogService, ProgressService, ServiceError, ServiceResult,
};
use kino_model::{ContentId, ContentMetadata, ProgressSnapshot};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::watch;

/// One `save_progress` call as the server saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProgress {
    pub content_id: ContentId,
    pub position_seconds: u64,
    pub duration_seconds: u64,
}

/// Progress service that records every call.
///
/// Saves can be made to fail, or held open to keep one in flight.
#[derive(Debug, Clone)]
pub struct RecordingProgressService {
    inner: Arc<Mutex<InnerProgress>>,
    hold: Arc<watch::Sender<bool>>,
}

#[derive(Debug, Default)]
struct InnerProgress {
    snapshot: Option<ProgressSnapshot>,
    fetch_error: Option<ServiceError>,
    save_error: Option<ServiceError>,
    complete_error: Option<ServiceError>,
    saves: Vec<SavedProgress>,
    completions: Vec<ContentId>,
}

impl Default for RecordingProgressService {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingProgressService {
    pub fn new() -> Self {
        let (hold, _) = watch::channel(false);
        Self {
            inner: Arc::new(Mutex::new(InnerProgress::default())),
            hold: Arc::new(hold),
        }
    }

    pub fn with_snapshot(self, snapshot: ProgressSnapshot) -> Self {
        self.inner.lock().snapshot = Some(snapshot);
        self
    }

    pub fn failing_fetch(self, error: ServiceError) -> Self {
        self.inner.lock().fetch_error = Some(error);
        self
    }

    pub fn fail_saves(&self, error: Option<ServiceError>) {
        self.inner.lock().save_error = error;
    }

    pub fn fail_completions(&self, error: Option<ServiceError>) {
        self.inner.lock().complete_error = error;
    }

    /// Keep saves that start from now on pending until released.
    pub fn hold_saves(&self) {
        self.hold.send_replace(true);
    }

    pub fn release_saves(&self) {
        self.hold.send_replace(false);
    }

    pub fn saves(&self) -> Vec<SavedProgress> {
        self.inner.lock().saves.clone()
    }

    pub fn saved_positions(&self) -> Vec<u64> {
        self.inner
            .lock()
            .saves
            .iter()
            .map(|save| save.position_seconds)
            .collect()
    }

    pub fn completions(&self) -> Vec<ContentId> {
        self.inner.lock().completions.clone()
    }
}

#[async_trait]
impl ProgressService for RecordingProgressService {
    async fn fetch_initial_progress(
        &self,
        _content_id: &ContentId,
    ) -> ServiceResult<Option<ProgressSnapshot>> {
        let inner = self.inner.lock();
        match &inner.fetch_error {
            Some(err) => Err(err.clone()),
            None => Ok(inner.snapshot.clone()),
        }
    }

    async fn save_progress(
        &self,
        content_id: &ContentId,
        position_seconds: u64,
        duration_seconds: u64,
    ) -> ServiceResult<()> {
        self.inner.lock().saves.push(SavedProgress {
            content_id: content_id.clone(),
            position_seconds,
            duration_seconds,
        });

        let mut hold = self.hold.subscribe();
        // The sender lives as long as `self`, so this only fails on teardown.
        let _ = hold.wait_for(|held| !*held).await;

        match self.inner.lock().save_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn mark_complete(&self, content_id: &ContentId) -> ServiceResult<()> {
        let mut inner = self.inner.lock();
        inner.completions.push(content_id.clone());
        match inner.complete_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Fixed catalog keyed by content id.
#[derive(Debug, Clone, Default)]
pub struct StubCatalogService {
    items: Arc<Mutex<HashMap<ContentId, ContentMetadata>>>,
}

impl StubCatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, content: ContentMetadata) -> Self {
        self.items.lock().insert(content.id.clone(), content);
        self
    }
}

#[async_trait]
impl CatalogService for StubCatalogService {
    async fn fetch_content_metadata(
        &self,
        content_id: &ContentId,
    ) -> ServiceResult<ContentMetadata> {
        self.items
            .lock()
            .get(content_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(content_id.to_string()))
    }
}
