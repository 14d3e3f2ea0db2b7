use kino_model::PlaybackRate;

/// Command surface of a native media element.
///
/// Implementations report back asynchronously through
/// [`kino_model::MediaEvent`]s; none of these calls block on the media
/// pipeline.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait MediaElement: Send {
    /// Point the element at a new stream. Resets position and duration.
    fn set_source(&mut self, url: &str);

    fn play(&mut self);

    fn pause(&mut self);

    /// Absolute seek in seconds from the start of the stream.
    fn seek_to(&mut self, seconds: f64);

    /// Current playhead in seconds.
    fn current_time(&self) -> f64;

    /// Stream length in seconds, zero until the header has loaded.
    fn duration(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: PlaybackRate);
}
