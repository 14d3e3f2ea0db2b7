// Progress and catalog services over the HTTP API

use async_trait::async_trait;
use kino_contracts::services::{
    CatalogService, ProgressService, ServiceError, ServiceResult,
};
use kino_model::{ContentId, ContentMetadata, ProgressSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::infra::api_client::ApiClient;

pub(crate) mod routes {
    pub const PROGRESS: &str = "/api/v1/progress";
    pub const CONTENT: &str = "/api/v1/content";
    pub const STREAM: &str = "/stream";
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressDto {
    #[serde(default)]
    pub position_seconds: f64,
    #[serde(default, alias = "total_seconds")]
    pub duration_seconds: f64,
    #[serde(alias = "percentage")]
    pub progress_percent: f64,
}

impl From<ProgressDto> for ProgressSnapshot {
    fn from(dto: ProgressDto) -> Self {
        ProgressSnapshot {
            position_seconds: dto.position_seconds,
            duration_seconds: dto.duration_seconds,
            progress_percent: dto.progress_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SaveProgressRequest<'a> {
    pub content_id: &'a str,
    pub position_seconds: u64,
    pub duration_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentDto {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "stream_url")]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WatchApiAdapter {
    client: Arc<ApiClient>,
}

impl WatchApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Direct stream for a title when the catalog does not name one.
    pub fn fallback_stream_url(&self, content_id: &ContentId) -> String {
        self.client
            .host_url(format!("{}/{}/video", routes::STREAM, content_id))
    }

    fn resolve_stream_url(
        &self,
        content_id: &ContentId,
        raw: Option<&str>,
    ) -> ServiceResult<String> {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(self.fallback_stream_url(content_id));
        };
        // Relative paths are served by the API host.
        let base = url::Url::parse(&format!("{}/", self.client.base_url()))
            .map_err(|err| ServiceError::Decode(err.to_string()))?;
        base.join(raw)
            .map(String::from)
            .map_err(|err| ServiceError::Decode(format!("stream url {raw:?}: {err}")))
    }

    pub(crate) fn metadata_from_dto(
        &self,
        requested: &ContentId,
        dto: ContentDto,
    ) -> ServiceResult<ContentMetadata> {
        let id = match dto.id.as_deref() {
            Some(raw) if !raw.trim().is_empty() => ContentId::new(raw)
                .map_err(|err| ServiceError::Decode(err.to_string()))?,
            _ => requested.clone(),
        };
        let stream_url =
            self.resolve_stream_url(&id, dto.video_url.as_deref())?;

        Ok(ContentMetadata {
            id,
            title: dto.title,
            subtitle: dto.subtitle,
            stream_url,
            duration_seconds: dto.duration_seconds.max(0.0),
            tags: dto.tags,
        })
    }
}

#[async_trait]
impl ProgressService for WatchApiAdapter {
    async fn fetch_initial_progress(
        &self,
        content_id: &ContentId,
    ) -> ServiceResult<Option<ProgressSnapshot>> {
        let path = format!("{}/{}", routes::PROGRESS, content_id);
        match self.client.get::<Option<ProgressDto>>(&path).await {
            Ok(dto) => Ok(dto.map(ProgressSnapshot::from)),
            Err(ServiceError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_progress(
        &self,
        content_id: &ContentId,
        position_seconds: u64,
        duration_seconds: u64,
    ) -> ServiceResult<()> {
        let body = SaveProgressRequest {
            content_id: content_id.as_str(),
            position_seconds,
            duration_seconds,
        };
        self.client.post_unit(routes::PROGRESS, Some(&body)).await
    }

    async fn mark_complete(&self, content_id: &ContentId) -> ServiceResult<()> {
        let path = format!("{}/{}/complete", routes::PROGRESS, content_id);
        self.client.post_unit::<()>(&path, None).await
    }
}

#[async_trait]
impl CatalogService for WatchApiAdapter {
    async fn fetch_content_metadata(
        &self,
        content_id: &ContentId,
    ) -> ServiceResult<ContentMetadata> {
        let path = format!("{}/{}", routes::CONTENT, content_id);
        let dto = match self.client.get_public::<ContentDto>(&path).await {
            Ok(dto) => dto,
            Err(ServiceError::NotFound(_)) => {
                return Err(ServiceError::NotFound(content_id.to_string()));
            }
            Err(err) => return Err(err),
        };
        self.metadata_from_dto(content_id, dto)
    }
}
