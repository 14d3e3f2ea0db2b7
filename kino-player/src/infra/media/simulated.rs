//! Clock-driven media element.
//!
//! `SimulatedMedia` is a cheap handle; clones share one element. The owner
//! drives it with [`SimulatedMedia::load`] and [`SimulatedMedia::tick`] and
//! forwards the returned events to the session, the same way a real element
//! would fire them.

use kino_contracts::media::MediaElement;
use kino_model::{MediaEvent, PlaybackRate};
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};

#[derive(Debug, Clone, Default)]
pub struct SimulatedMedia {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    source: Option<String>,
    duration: f64,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
    rate: PlaybackRate,
    seeks: Vec<f64>,
    play_calls: usize,
    pause_calls: usize,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish loading the header. Returns the metadata event to forward.
    pub fn load(&self, duration_seconds: f64) -> MediaEvent {
        let mut inner = self.inner.lock();
        inner.duration = duration_seconds.max(0.0);
        MediaEvent::MetadataLoaded {
            duration_seconds: inner.duration,
        }
    }

    /// Give up on the source. Returns the failure event to forward.
    pub fn fail(&self, reason: impl Into<String>) -> MediaEvent {
        let mut inner = self.inner.lock();
        inner.playing = false;
        inner.duration = 0.0;
        MediaEvent::LoadFailed {
            reason: reason.into(),
        }
    }

    /// Advance the clock by `elapsed`. A playing element reports progress and,
    /// on reaching the end, stops and reports `Ended`.
    pub fn tick(&self, elapsed: Duration) -> Vec<MediaEvent> {
        let mut inner = self.inner.lock();
        if !inner.playing || inner.duration <= 0.0 {
            return Vec::new();
        }

        let step = elapsed.as_secs_f64() * inner.rate.as_f64();
        inner.position = (inner.position + step).min(inner.duration);

        let mut events = vec![MediaEvent::Progress {
            played_fraction: inner.position / inner.duration,
            played_seconds: inner.position,
            // Local playback is fully buffered.
            buffered_fraction: 1.0,
        }];
        if inner.position >= inner.duration {
            inner.playing = false;
            events.push(MediaEvent::Ended);
        }
        events
    }

    /// Move the playhead without recording a seek, e.g. to set up a test.
    pub fn set_position(&self, seconds: f64) {
        self.inner.lock().position = seconds.max(0.0);
    }

    pub fn position(&self) -> f64 {
        self.inner.lock().position
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.inner.lock().seeks.clone()
    }

    pub fn source(&self) -> Option<String> {
        self.inner.lock().source.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock().playing
    }

    pub fn is_muted(&self) -> bool {
        self.inner.lock().muted
    }

    pub fn volume(&self) -> f64 {
        self.inner.lock().volume
    }

    pub fn rate(&self) -> PlaybackRate {
        self.inner.lock().rate
    }

    pub fn play_calls(&self) -> usize {
        self.inner.lock().play_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.inner.lock().pause_calls
    }
}

impl MediaElement for SimulatedMedia {
    fn set_source(&mut self, url: &str) {
        let mut inner = self.inner.lock();
        inner.source = Some(url.to_string());
        inner.duration = 0.0;
        inner.position = 0.0;
        inner.playing = false;
    }

    fn play(&mut self) {
        let mut inner = self.inner.lock();
        inner.play_calls += 1;
        inner.playing = true;
    }

    fn pause(&mut self) {
        let mut inner = self.inner.lock();
        inner.pause_calls += 1;
        inner.playing = false;
    }

    fn seek_to(&mut self, seconds: f64) {
        let mut inner = self.inner.lock();
        let upper = if inner.duration > 0.0 {
            inner.duration
        } else {
            f64::INFINITY
        };
        inner.position = seconds.clamp(0.0, upper);
        inner.seeks.push(seconds);
    }

    fn current_time(&self) -> f64 {
        self.inner.lock().position
    }

    fn duration(&self) -> f64 {
        self.inner.lock().duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.inner.lock().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.lock().muted = muted;
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.inner.lock().rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playing_element_reports_progress_until_the_end() {
        let mut media = SimulatedMedia::new();
        media.set_source("http://localhost:8002/stream/7/video");
        media.load(3.0);
        assert!(media.tick(Duration::from_secs(1)).is_empty());

        media.play();
        let events = media.tick(Duration::from_secs(2));
        assert_eq!(
            events,
            vec![MediaEvent::Progress {
                played_fraction: 2.0 / 3.0,
                played_seconds: 2.0,
                buffered_fraction: 1.0,
            }]
        );

        let events = media.tick(Duration::from_secs(2));
        assert_eq!(events.last(), Some(&MediaEvent::Ended));
        assert!(!media.is_playing());
        assert_eq!(media.position(), 3.0);
    }

    #[test]
    fn playback_rate_scales_the_clock() {
        let mut media = SimulatedMedia::new();
        media.load(100.0);
        media.set_playback_rate(PlaybackRate::Double);
        media.play();
        media.tick(Duration::from_secs(5));
        assert_eq!(media.position(), 10.0);
    }

    #[test]
    fn seeks_are_clamped_and_logged() {
        let mut media = SimulatedMedia::new();
        media.load(50.0);
        media.seek_to(80.0);
        assert_eq!(media.current_time(), 50.0);
        assert_eq!(media.seeks(), vec![80.0]);
    }
}
