//! Watch page lifecycle: resolve the title, seed the resume point and hand
//! the media element to a fresh [`PlaybackSession`].

use std::sync::Arc;

use kino_config::PlayerConfig;
use kino_contracts::prelude::{
    CatalogService, FullscreenHost, MediaElement, ProgressService,
    ServiceError,
};
use kino_model::{ContentId, ContentMetadata};
use log::{info, warn};

use crate::domains::{
    player::{PlaybackSession, ResumePoint},
    session::SessionContext,
};

/// Where the host should navigate when the watch page cannot open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Browse,
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("sign-in required to watch content")]
    Unauthenticated,

    #[error("content {content_id} is unavailable: {source}")]
    ContentUnavailable {
        content_id: ContentId,
        #[source]
        source: ServiceError,
    },
}

impl MountError {
    pub fn redirect(&self) -> Route {
        match self {
            MountError::Unauthenticated => Route::Login,
            MountError::ContentUnavailable { .. } => Route::Browse,
        }
    }
}

/// Remote services the watch page depends on.
#[derive(Clone)]
pub struct WatchServices {
    pub catalog: Arc<dyn CatalogService>,
    pub progress: Arc<dyn ProgressService>,
}

impl std::fmt::Debug for WatchServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchServices").finish_non_exhaustive()
    }
}

impl WatchServices {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        progress: Arc<dyn ProgressService>,
    ) -> Self {
        Self { catalog, progress }
    }

    /// One adapter serving both contracts, e.g. the HTTP adapter.
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: CatalogService + ProgressService + 'static,
    {
        Self {
            catalog: adapter.clone(),
            progress: adapter,
        }
    }
}

/// A mounted watch page.
#[derive(Debug)]
pub struct WatchPage {
    content: ContentMetadata,
    player: PlaybackSession,
}

impl WatchPage {
    /// Open `content_id` for the signed-in viewer.
    ///
    /// Only a missing session or an unresolvable title fail the mount.
    /// Stored progress that cannot be fetched means starting from zero.
    pub async fn mount(
        session: &SessionContext,
        content_id: ContentId,
        services: &WatchServices,
        media: Box<dyn MediaElement>,
        fullscreen: Box<dyn FullscreenHost>,
        config: &PlayerConfig,
    ) -> Result<Self, MountError> {
        if !session.is_authenticated() {
            info!("[Watch] No session, redirecting to login");
            return Err(MountError::Unauthenticated);
        }

        let content = services
            .catalog
            .fetch_content_metadata(&content_id)
            .await
            .map_err(|source| {
                warn!("[Watch] Failed to load {}: {}", content_id, source);
                MountError::ContentUnavailable {
                    content_id: content_id.clone(),
                    source,
                }
            })?;

        let snapshot =
            match services.progress.fetch_initial_progress(&content_id).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!("[Watch] Failed to load progress: {}", err);
                    None
                }
            };
        let resume = ResumePoint::from_snapshot(
            snapshot.as_ref(),
            config.resume_ceiling_percent,
        );
        info!(
            "[Watch] Opening '{}' at {:.0}%",
            content.heading(),
            resume.fraction * 100.0
        );

        let mut player = PlaybackSession::new(
            &content,
            resume,
            media,
            fullscreen,
            Arc::clone(&services.progress),
            config.clone(),
        );
        player.set_source();

        Ok(Self { content, player })
    }

    pub fn content(&self) -> &ContentMetadata {
        &self.content
    }

    pub fn player(&self) -> &PlaybackSession {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackSession {
        &mut self.player
    }

    /// Where to navigate instead of staying on the page, if anywhere.
    /// An unreachable stream sends the viewer back to browsing.
    pub fn redirect(&self) -> Option<Route> {
        self.player.load_error().map(|_| Route::Browse)
    }

    /// Cancel every pending timer. No final save is made.
    pub fn unmount(&mut self) {
        self.player.unmount();
    }
}
