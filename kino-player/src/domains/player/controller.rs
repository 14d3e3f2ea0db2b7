use std::{collections::HashMap, fmt, sync::Arc};

use kino_config::PlayerConfig;
use kino_contracts::prelude::{FullscreenHost, MediaElement, ProgressService};
use kino_model::{
    ContentId, ContentMetadata, PlaybackPhase, PlaybackState, SkipIndicator,
};
use log::{debug, info};
use tokio::{sync::mpsc, task::JoinHandle};

use super::{
    messages::SessionEvent,
    progress::{PendingSave, ProgressSaver, ResumePoint},
    state::PlayerDomainState,
};
use crate::common::{TrailingDebounce, debounce};

/// Cloneable sender for posting events into a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    /// Returns `false` once the session is gone.
    pub fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Playback session controller for one title on the watch page.
///
/// The session owns its state and applies events one at a time. Timers and
/// remote calls run as Tokio tasks that only post [`SessionEvent`]s back, so
/// no two handlers ever observe the state concurrently.
pub struct PlaybackSession {
    pub(super) content_id: ContentId,
    pub(super) stream_url: String,
    pub(super) config: PlayerConfig,
    pub(super) state: PlayerDomainState,

    pub(super) media: Box<dyn MediaElement>,
    pub(super) fullscreen: Box<dyn FullscreenHost>,
    pub(super) progress: Arc<dyn ProgressService>,

    pub(super) saver: ProgressSaver,
    pub(super) save_timer: TrailingDebounce<PendingSave>,
    pub(super) controls_timer: TrailingDebounce<()>,
    pub(super) indicator_timers: HashMap<u64, JoinHandle<()>>,

    pub(super) tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("content_id", &self.content_id)
            .field("phase", &self.state.phase)
            .field("last_saved", &self.saver.last_saved())
            .field("save_pending", &self.save_timer.is_pending())
            .field("unmounted", &self.state.unmounted)
            .finish()
    }
}

impl PlaybackSession {
    pub fn new(
        content: &ContentMetadata,
        resume: ResumePoint,
        media: Box<dyn MediaElement>,
        fullscreen: Box<dyn FullscreenHost>,
        progress: Arc<dyn ProgressService>,
        config: PlayerConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let save_tx = tx.clone();
        let save_timer = debounce(config.save_debounce(), move |save| {
            let _ = save_tx.send(SessionEvent::SaveDue(save));
        });
        let idle_tx = tx.clone();
        let controls_timer =
            debounce(config.controls_hide_after(), move |()| {
                let _ = idle_tx.send(SessionEvent::ControlsIdle);
            });

        Self {
            content_id: content.id.clone(),
            stream_url: content.stream_url.clone(),
            saver: ProgressSaver::new(config.save_min_delta_secs, None),
            state: PlayerDomainState::new(resume.fraction),
            config,
            media,
            fullscreen,
            progress,
            save_timer,
            controls_timer,
            indicator_timers: HashMap::new(),
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn state(&self) -> &PlayerDomainState {
        &self.state
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.state.playback
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    pub fn skip_indicators(&self) -> &[SkipIndicator] {
        &self.state.skip_indicators
    }

    pub fn last_saved_position(&self) -> Option<f64> {
        self.saver.last_saved()
    }

    pub fn is_save_pending(&self) -> bool {
        self.save_timer.is_pending()
    }

    pub fn is_unmounted(&self) -> bool {
        self.state.unmounted
    }

    /// Set once the stream failed to load; the session is then inert.
    pub fn load_error(&self) -> Option<&str> {
        self.state.load_error.as_deref()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Point the media element at the title's stream (Idle -> Loading).
    pub fn set_source(&mut self) {
        if self.state.phase != PlaybackPhase::Idle {
            debug!(
                "[Player] set_source ignored in phase {:?}",
                self.state.phase
            );
            return;
        }

        info!("[Player] Loading {} from {}", self.content_id, self.stream_url);
        self.media.set_source(&self.stream_url);
        self.media.set_volume(self.state.playback.volume);
        self.media.set_muted(self.state.playback.muted);
        self.media.set_playback_rate(self.state.playback.playback_rate);
        self.state.set_phase(PlaybackPhase::Loading);
    }

    /// Apply events until the session is unmounted or its stream fails.
    pub async fn run(&mut self) {
        while !self.state.unmounted && self.state.load_error.is_none() {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.update(event);
        }
    }

    /// Let spawned timers and remote calls make progress, then apply every
    /// event they posted. Returns once the queue stays empty.
    pub async fn settle(&mut self) {
        loop {
            tokio::task::yield_now().await;

            let mut applied = false;
            while let Ok(event) = self.rx.try_recv() {
                self.update(event);
                applied = true;
            }
            if !applied {
                break;
            }
        }
    }

    /// Tear the session down. Pending timers are cancelled and nothing is
    /// saved afterwards, including a debounced save that had not fired yet.
    pub fn unmount(&mut self) {
        if self.state.unmounted {
            return;
        }
        self.state.unmounted = true;

        let dropped_save = self.save_timer.cancel();
        let dropped_parked = self.saver.discard_parked();
        self.cancel_timers();
        self.media.pause();

        info!(
            "[Player] Unmounted {} (pending save dropped: {}, parked save dropped: {})",
            self.content_id, dropped_save, dropped_parked
        );
    }

    pub(super) fn cancel_timers(&mut self) {
        self.save_timer.cancel();
        self.controls_timer.cancel();
        for (_, handle) in self.indicator_timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
