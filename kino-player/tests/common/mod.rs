//! Shared fixtures for the playback session integration tests.
#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use kino_config::PlayerConfig;
use kino_model::{ContentId, ContentMetadata, MediaEvent};
use kino_player::{
    domains::{
        player::{PlaybackSession, ResumePoint, SessionEvent},
        session::{SessionContext, User, UserRole},
    },
    infra::{
        media::SimulatedMedia,
        testing::stubs::{RecordingProgressService, StubFullscreenHost},
    },
};

pub const STREAM_URL: &str = "http://localhost:8002/stream/7/video";

/// A session wired to in-process doubles, kept alongside handles to them.
pub struct Harness {
    pub session: PlaybackSession,
    pub media: SimulatedMedia,
    pub progress: RecordingProgressService,
    pub fullscreen: StubFullscreenHost,
}

pub fn content_id() -> ContentId {
    ContentId::new("7").unwrap()
}

pub fn content(duration_seconds: f64) -> ContentMetadata {
    ContentMetadata {
        id: content_id(),
        title: "Night Train".into(),
        subtitle: Some("Episode 1".into()),
        stream_url: STREAM_URL.into(),
        duration_seconds,
        tags: vec!["drama".into()],
    }
}

pub fn viewer_session() -> SessionContext {
    SessionContext::authenticated(
        "tok",
        User {
            id: "u-1".into(),
            username: "viewer".into(),
            role: UserRole::User,
            status: "active".into(),
        },
    )
}

impl Harness {
    /// Session in `Loading`, waiting for metadata.
    pub fn mounted(resume: ResumePoint, config: PlayerConfig) -> Self {
        Self::mounted_with(resume, config, StubFullscreenHost::new())
    }

    pub fn mounted_with(
        resume: ResumePoint,
        config: PlayerConfig,
        fullscreen: StubFullscreenHost,
    ) -> Self {
        let media = SimulatedMedia::new();
        let progress = RecordingProgressService::new();
        let mut session = PlaybackSession::new(
            &content(100.0),
            resume,
            Box::new(media.clone()),
            Box::new(fullscreen.clone()),
            Arc::new(progress.clone()),
            config,
        );
        session.set_source();
        Self {
            session,
            media,
            progress,
            fullscreen,
        }
    }

    /// Session with metadata loaded (`Paused` under the default config).
    pub fn loaded(resume: ResumePoint, duration_seconds: f64) -> Self {
        let mut harness = Self::mounted(resume, PlayerConfig::default());
        harness.load(duration_seconds);
        harness
    }

    pub fn load(&mut self, duration_seconds: f64) {
        let event = self.media.load(duration_seconds);
        self.session.update(SessionEvent::Media(event));
    }

    /// Feed one playhead report for `played_seconds`.
    pub fn report(&mut self, played_seconds: f64) {
        let duration = self.session.playback().duration_seconds;
        let fraction = if duration > 0.0 {
            played_seconds / duration
        } else {
            0.0
        };
        self.session.update(SessionEvent::Media(MediaEvent::Progress {
            played_fraction: fraction,
            played_seconds,
            buffered_fraction: fraction,
        }));
    }

    /// Report, let the save debounce run out, and apply the outcome.
    pub async fn report_and_flush(&mut self, played_seconds: f64) {
        self.report(played_seconds);
        self.flush().await;
    }

    /// Wait past the save debounce and apply whatever it triggered.
    pub async fn flush(&mut self) {
        let window = self.session.config().save_debounce();
        tokio::time::sleep(window + Duration::from_millis(100)).await;
        self.session.settle().await;
    }
}
