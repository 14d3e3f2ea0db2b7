use std::sync::Arc;

use kino_model::{MediaEvent, PlaybackPhase, PlaybackRate, ProgressRecord};
use log::{debug, error, info, trace, warn};

use super::{
    controller::PlaybackSession,
    input::{FocusTarget, Key, Modifiers, PlayerCommand, route_key},
    messages::SessionEvent,
    progress::{PendingSave, SaveDecision},
};

impl PlaybackSession {
    /// Apply one event. Everything after unmount is dropped.
    pub fn update(&mut self, event: SessionEvent) {
        if self.state.unmounted {
            trace!("[Player] Dropping {} after unmount", event.name());
            return;
        }
        if self.state.phase == PlaybackPhase::Failed
            && !matches!(event, SessionEvent::Unmount)
        {
            trace!("[Player] Dropping {} after load failure", event.name());
            return;
        }
        trace!("[Player] {}", event.name());

        match event {
            SessionEvent::Media(media) => self.handle_media_event(media),
            SessionEvent::Command(command) => self.apply_command(command),
            SessionEvent::Key {
                key,
                modifiers,
                focus,
            } => {
                self.handle_key(key, modifiers, focus);
            }
            SessionEvent::SeekPressed => self.seek_pressed(),
            SessionEvent::SeekScrubbed(fraction) => self.seek_scrubbed(fraction),
            SessionEvent::SeekReleased(fraction) => self.seek_released(fraction),
            SessionEvent::SetVolume(volume) => self.set_volume(volume),
            SessionEvent::SetPlaybackRate(rate) => self.set_playback_rate(rate),
            SessionEvent::ToggleSettings => self.toggle_settings(),
            SessionEvent::PointerMoved => self.pointer_moved(),
            SessionEvent::PointerLeft => self.pointer_left(),
            SessionEvent::VideoClicked { in_controls } => {
                self.video_clicked(in_controls)
            }
            SessionEvent::VideoDoubleClicked { in_controls } => {
                self.video_double_clicked(in_controls)
            }
            SessionEvent::FullscreenChanged(is_fullscreen) => {
                self.state.playback.is_fullscreen = is_fullscreen;
            }
            SessionEvent::SaveDue(save) => self.commit_save(save),
            SessionEvent::SaveFinished(result) => {
                let succeeded = match result {
                    Ok(()) => true,
                    Err(err) => {
                        error!("[Player] Failed to save progress: {}", err);
                        false
                    }
                };
                if let Some(parked) = self.saver.finish(succeeded) {
                    self.commit_save(parked);
                }
            }
            SessionEvent::CompleteFinished(result) => match result {
                Ok(()) => info!("[Player] Marked {} as watched", self.content_id),
                Err(err) => {
                    error!("[Player] Failed to mark as completed: {}", err)
                }
            },
            SessionEvent::SkipIndicatorExpired(id) => {
                self.indicator_timers.remove(&id);
                self.state.expire_skip_indicator(id);
            }
            SessionEvent::ControlsIdle => {
                if self.state.playback.playing {
                    self.state.controls_visible = false;
                }
            }
            SessionEvent::Unmount => self.unmount(),
        }
    }

    fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded { duration_seconds } => {
                self.metadata_loaded(duration_seconds)
            }
            MediaEvent::Progress {
                played_fraction,
                played_seconds,
                buffered_fraction,
            } => self.report_progress(
                played_fraction,
                played_seconds,
                buffered_fraction,
            ),
            MediaEvent::BufferingStarted => {
                if self.state.phase == PlaybackPhase::Playing {
                    self.state.set_phase(PlaybackPhase::Buffering);
                }
            }
            MediaEvent::BufferingEnded => {
                if self.state.phase == PlaybackPhase::Buffering {
                    self.state.set_phase(PlaybackPhase::Playing);
                }
            }
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::LoadFailed { reason } => self.stream_failed(reason),
        }
    }

    /// The stream is unreachable. Everything pending is dropped and the
    /// session stops reacting to anything but unmount.
    fn stream_failed(&mut self, reason: String) {
        error!(
            "[Player] Stream for {} failed to load from {}: {}",
            self.content_id, self.stream_url, reason
        );

        self.save_timer.cancel();
        self.saver.discard_parked();
        self.cancel_timers();
        self.media.pause();

        self.state.set_phase(PlaybackPhase::Failed);
        self.state.settings_open = false;
        self.state.skip_indicators.clear();
        self.state.load_error = Some(reason);
    }

    fn metadata_loaded(&mut self, duration_seconds: f64) {
        self.state.playback.duration_seconds =
            if duration_seconds.is_finite() && duration_seconds > 0.0 {
                duration_seconds
            } else {
                0.0
            };

        if self.state.phase == PlaybackPhase::Loading {
            if self.config.autoplay {
                self.media.play();
                self.state.set_phase(PlaybackPhase::Playing);
            } else {
                self.state.set_phase(PlaybackPhase::Paused);
            }
        }

        self.initialize();
    }

    /// Seek to the resume fraction. Runs once the duration is known and
    /// positive, and at most once per session.
    pub fn initialize(&mut self) {
        if self.state.initial_seek_done || !self.state.playback.has_duration() {
            return;
        }
        self.state.initial_seek_done = true;

        let fraction = self.state.initial_fraction;
        if fraction > 0.0 {
            let target = fraction * self.state.playback.duration_seconds;
            info!("[Player] Resuming {} at {:.1}s", self.content_id, target);
            self.media.seek_to(target);
            self.state.playback.set_played_fraction(fraction);
        }
    }

    /// Periodic playhead report from the media element. Ignored while the
    /// user is scrubbing.
    pub fn report_progress(
        &mut self,
        played_fraction: f64,
        played_seconds: f64,
        buffered_fraction: f64,
    ) {
        if self.state.phase == PlaybackPhase::Seeking {
            return;
        }

        self.state.playback.set_played_fraction(played_fraction);
        self.state.playback.set_buffered_fraction(buffered_fraction);
        self.schedule_save(played_seconds, self.state.playback.duration_seconds);
    }

    /// Restart the save debounce with the newest playhead.
    pub fn schedule_save(&mut self, played_seconds: f64, duration_seconds: f64) {
        if self.state.unmounted {
            return;
        }
        self.save_timer.call(PendingSave {
            played_seconds,
            duration_seconds,
        });
    }

    /// Send a save if it clears the magnitude gate and no other save is in
    /// flight. Failures are logged when they come back and never retried.
    pub fn commit_save(&mut self, save: PendingSave) {
        if self.state.unmounted {
            return;
        }

        match self.saver.admit(save) {
            SaveDecision::Send(save) => {
                let record = ProgressRecord::from_playhead(
                    self.content_id.clone(),
                    save.played_seconds,
                    save.duration_seconds,
                );
                debug!(
                    "[Player] Saving progress {}s/{}s for {}",
                    record.position_seconds,
                    record.duration_seconds,
                    record.content_id
                );

                let service = Arc::clone(&self.progress);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = service
                        .save_progress(
                            &record.content_id,
                            record.position_seconds,
                            record.duration_seconds,
                        )
                        .await;
                    let _ = tx.send(SessionEvent::SaveFinished(result));
                });
            }
            SaveDecision::BelowThreshold => trace!(
                "[Player] Skipping save at {:.1}s (last saved {:?})",
                save.played_seconds,
                self.saver.last_saved()
            ),
            SaveDecision::Parked => {
                debug!("[Player] Save in flight, parking {:.1}s", save.played_seconds)
            }
        }
    }

    /// Natural end of the stream. Marks the title complete once per
    /// playback-ended event; a repeat while already ended is dropped.
    pub fn on_ended(&mut self) {
        if matches!(self.state.phase, PlaybackPhase::Idle | PlaybackPhase::Failed)
            || self.state.has_ended()
        {
            debug!("[Player] Ended ignored in phase {:?}", self.state.phase);
            return;
        }

        if self.state.phase == PlaybackPhase::Seeking {
            // The bar is still held; the release decides where we land.
            self.state.end_while_seeking();
        } else {
            self.state.set_phase(PlaybackPhase::Ended);
            self.state.playback.set_played_fraction(1.0);
        }
        self.state.controls_visible = true;

        let service = Arc::clone(&self.progress);
        let content_id = self.content_id.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.mark_complete(&content_id).await;
            let _ = tx.send(SessionEvent::CompleteFinished(result));
        });
    }

    /// Relative seek from the element's current time, clamped to the stream.
    /// Raises a skip indicator that expires on its own timer.
    pub fn skip(&mut self, delta_seconds: f64) {
        if self.state.unmounted
            || matches!(self.state.phase, PlaybackPhase::Idle | PlaybackPhase::Failed)
        {
            return;
        }

        let current = self.media.current_time();
        let current = if current.is_finite() { current } else { 0.0 };
        let duration = self.state.playback.duration_seconds;

        let mut target = (current + delta_seconds).max(0.0);
        if self.state.playback.has_duration() {
            target = target.min(duration);
            self.state.playback.set_played_fraction(target / duration);
        }
        self.media.seek_to(target);

        if self.state.phase == PlaybackPhase::Ended && target < duration {
            self.state.set_phase(PlaybackPhase::Paused);
        }

        let indicator = self.state.push_skip_indicator(delta_seconds);
        let ttl = self.config.skip_indicator_ttl();
        let tx = self.tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = tx.send(SessionEvent::SkipIndicatorExpired(indicator.id));
        });
        self.indicator_timers.insert(indicator.id, timer);
    }

    /// Ask the host to enter or leave fullscreen. The visible state only
    /// changes on the host's fullscreen-change notification.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.fullscreen.is_fullscreen() {
            self.fullscreen.exit_fullscreen()
        } else {
            self.fullscreen.request_fullscreen()
        };
        if let Err(err) = result {
            warn!("[Player] Fullscreen error: {}", err);
        }
    }

    pub fn toggle_play(&mut self) {
        match self.state.phase {
            PlaybackPhase::Playing | PlaybackPhase::Buffering => {
                self.media.pause();
                self.state.set_phase(PlaybackPhase::Paused);
            }
            PlaybackPhase::Paused => {
                self.media.play();
                self.state.set_phase(PlaybackPhase::Playing);
            }
            phase => debug!("[Player] Toggle play ignored in phase {:?}", phase),
        }
    }

    /// Pointer down on the seek bar.
    pub fn seek_pressed(&mut self) {
        let phase = self.state.phase;
        if phase.has_media() && phase != PlaybackPhase::Seeking {
            self.state.set_phase(PlaybackPhase::Seeking);
        }
    }

    pub fn seek_scrubbed(&mut self, fraction: f64) {
        if self.state.phase == PlaybackPhase::Seeking {
            self.state.playback.set_played_fraction(fraction);
        }
    }

    /// Pointer up on the seek bar: seek and restore the prior play intent.
    pub fn seek_released(&mut self, fraction: f64) {
        if self.state.phase != PlaybackPhase::Seeking {
            return;
        }

        let prior = self.state.resume_phase.unwrap_or(PlaybackPhase::Paused);
        self.state.playback.set_played_fraction(fraction);
        let fraction = self.state.playback.played_fraction;
        let target = fraction * self.state.playback.duration_seconds;
        self.media.seek_to(target);

        let next = if prior.wants_playback() {
            PlaybackPhase::Playing
        } else if prior == PlaybackPhase::Ended && fraction >= 1.0 {
            PlaybackPhase::Ended
        } else {
            PlaybackPhase::Paused
        };
        self.state.set_phase(next);
    }

    /// Volume slider. Moving it always unmutes.
    pub fn set_volume(&mut self, volume: f64) {
        self.state.playback.set_volume(volume);
        self.state.playback.muted = false;
        self.media.set_volume(self.state.playback.volume);
        self.media.set_muted(false);
    }

    pub fn toggle_mute(&mut self) {
        self.state.playback.muted = !self.state.playback.muted;
        self.media.set_muted(self.state.playback.muted);
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.state.playback.playback_rate = rate;
        self.media.set_playback_rate(rate);
        self.state.settings_open = false;
    }

    pub fn toggle_settings(&mut self) {
        self.state.settings_open = !self.state.settings_open;
    }

    pub fn close_settings(&mut self) {
        self.state.settings_open = false;
    }

    /// Show controls and restart the idle timer that hides them again while
    /// playing.
    pub fn pointer_moved(&mut self) {
        self.state.controls_visible = true;
        self.state.settings_open = false;
        if !self.state.unmounted {
            self.controls_timer.call(());
        }
    }

    pub fn pointer_left(&mut self) {
        if self.state.playback.playing {
            self.state.controls_visible = false;
        }
    }

    pub fn video_clicked(&mut self, in_controls: bool) {
        if !in_controls {
            self.toggle_play();
        }
    }

    pub fn video_double_clicked(&mut self, in_controls: bool) {
        if !in_controls {
            self.toggle_fullscreen();
        }
    }

    /// Route a key press through the shortcut policy. Returns `true` when the
    /// key was consumed and the host should suppress its default action.
    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        focus: FocusTarget,
    ) -> bool {
        match route_key(key, modifiers, focus) {
            // Nothing to close: the host keeps Escape for itself.
            Some(PlayerCommand::CloseSettings) if !self.state.settings_open => {
                false
            }
            Some(command) => {
                self.apply_command(command);
                true
            }
            None => false,
        }
    }

    pub fn apply_command(&mut self, command: PlayerCommand) {
        let step = self.config.volume_step;
        match command {
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::SkipBackward => self.skip(-self.config.skip_step_secs),
            PlayerCommand::SkipForward => self.skip(self.config.skip_step_secs),
            PlayerCommand::VolumeUp => {
                self.set_volume(self.state.playback.volume + step)
            }
            PlayerCommand::VolumeDown => {
                self.state
                    .playback
                    .set_volume(self.state.playback.volume - step);
                self.media.set_volume(self.state.playback.volume);
            }
            PlayerCommand::ToggleFullscreen => self.toggle_fullscreen(),
            PlayerCommand::ToggleMute => self.toggle_mute(),
            PlayerCommand::CloseSettings => self.close_settings(),
        }
    }
}
