use kino_model::{
    PlaybackPhase, PlaybackState, SkipDirection, SkipIndicator,
};

use crate::util::status_line;

/// Everything the watch view renders, plus the bookkeeping the controller
/// needs between events.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDomainState {
    pub phase: PlaybackPhase,
    pub playback: PlaybackState,

    // Resume
    pub initial_fraction: f64,
    pub initial_seek_done: bool,

    // Phase to restore when a scrub ends
    pub resume_phase: Option<PlaybackPhase>,

    // Overlay
    pub controls_visible: bool,
    pub settings_open: bool,
    pub skip_indicators: Vec<SkipIndicator>,
    next_indicator_id: u64,

    /// Why the stream could not be loaded, once it has failed.
    pub load_error: Option<String>,
    pub unmounted: bool,
}

impl PlayerDomainState {
    pub fn new(initial_fraction: f64) -> Self {
        let playback = PlaybackState::resuming_at(initial_fraction);
        Self {
            phase: PlaybackPhase::Idle,
            initial_fraction: playback.played_fraction,
            playback,
            initial_seek_done: false,
            resume_phase: None,
            controls_visible: true,
            settings_open: false,
            skip_indicators: Vec::new(),
            next_indicator_id: 0,
            load_error: None,
            unmounted: false,
        }
    }

    /// Move to `next` and keep the `PlaybackState` flags in step with it.
    pub fn set_phase(&mut self, next: PlaybackPhase) {
        if next == PlaybackPhase::Seeking && self.phase != PlaybackPhase::Seeking
        {
            self.resume_phase = Some(self.phase);
        } else if next != PlaybackPhase::Seeking {
            self.resume_phase = None;
        }

        self.phase = next;
        self.playback.is_seeking = next == PlaybackPhase::Seeking;
        self.playback.is_buffering = next == PlaybackPhase::Buffering;
        // Scrubbing does not stop the element; it keeps its prior intent.
        self.playback.playing = match next {
            PlaybackPhase::Seeking => self
                .resume_phase
                .is_some_and(PlaybackPhase::wants_playback),
            other => other.wants_playback(),
        };
    }

    /// The stream ran out while the user holds the seek bar. Releasing it
    /// must not resume playback.
    pub fn end_while_seeking(&mut self) {
        if self.phase == PlaybackPhase::Seeking {
            self.resume_phase = Some(PlaybackPhase::Ended);
            self.playback.playing = false;
        }
    }

    /// Whether the current stream has already ended, including while the
    /// seek bar is held after the end.
    pub fn has_ended(&self) -> bool {
        self.phase == PlaybackPhase::Ended
            || (self.phase == PlaybackPhase::Seeking
                && self.resume_phase == Some(PlaybackPhase::Ended))
    }

    pub fn push_skip_indicator(&mut self, delta_seconds: f64) -> SkipIndicator {
        self.next_indicator_id = self.next_indicator_id.wrapping_add(1);
        let indicator = SkipIndicator {
            id: self.next_indicator_id,
            direction: SkipDirection::from_delta(delta_seconds),
        };
        self.skip_indicators.push(indicator);
        indicator
    }

    pub fn expire_skip_indicator(&mut self, id: u64) -> bool {
        let before = self.skip_indicators.len();
        self.skip_indicators.retain(|indicator| indicator.id != id);
        before != self.skip_indicators.len()
    }

    pub fn status_line(&self) -> String {
        status_line(
            self.playback.played_fraction,
            self.playback.duration_seconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ending_while_seeking_drops_the_play_intent() {
        let mut state = PlayerDomainState::new(0.0);
        state.set_phase(PlaybackPhase::Playing);
        state.set_phase(PlaybackPhase::Seeking);
        assert!(!state.has_ended());

        state.end_while_seeking();
        assert_eq!(state.phase, PlaybackPhase::Seeking);
        assert_eq!(state.resume_phase, Some(PlaybackPhase::Ended));
        assert!(!state.playback.playing);
        assert!(state.has_ended());
    }

    #[test]
    fn starts_idle_at_the_resume_fraction() {
        let state = PlayerDomainState::new(0.4);
        assert_eq!(state.phase, PlaybackPhase::Idle);
        assert_eq!(state.playback.played_fraction, 0.4);
        assert!(state.controls_visible);
        assert!(!state.playback.playing);
    }

    #[test]
    fn seeking_remembers_prior_phase() {
        let mut state = PlayerDomainState::new(0.0);
        state.set_phase(PlaybackPhase::Playing);
        state.set_phase(PlaybackPhase::Seeking);

        assert_eq!(state.resume_phase, Some(PlaybackPhase::Playing));
        assert!(state.playback.is_seeking);
        assert!(state.playback.playing);

        state.set_phase(PlaybackPhase::Paused);
        assert_eq!(state.resume_phase, None);
        assert!(!state.playback.is_seeking);
        assert!(!state.playback.playing);
    }

    #[test]
    fn buffering_counts_as_playing() {
        let mut state = PlayerDomainState::new(0.0);
        state.set_phase(PlaybackPhase::Buffering);
        assert!(state.playback.is_buffering);
        assert!(state.playback.playing);
    }

    #[test]
    fn skip_indicators_are_independent() {
        let mut state = PlayerDomainState::new(0.0);
        let first = state.push_skip_indicator(10.0);
        let second = state.push_skip_indicator(-10.0);

        assert_ne!(first.id, second.id);
        assert_eq!(second.direction, SkipDirection::Backward);
        assert!(state.expire_skip_indicator(first.id));
        assert!(!state.expire_skip_indicator(first.id));
        assert_eq!(state.skip_indicators, vec![second]);
    }
}
