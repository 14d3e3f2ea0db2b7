use crate::error::ModelError;

/// Playback speeds offered by the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub enum PlaybackRate {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    /// Every selectable rate, slowest first.
    pub const ALL: [PlaybackRate; 6] = [
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndQuarter => 1.25,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        PlaybackRate::ALL
            .into_iter()
            .find(|rate| rate.as_f64() == value)
            .ok_or(ModelError::UnsupportedPlaybackRate(value))
    }
}

impl From<PlaybackRate> for f64 {
    fn from(rate: PlaybackRate) -> Self {
        rate.as_f64()
    }
}

impl std::fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.as_f64())
    }
}

/// Coarse lifecycle of a playback session.
///
/// `Ended` is terminal until the viewer seeks backward, which re-enters
/// `Paused`. `Failed` is terminal: the stream never became playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Seeking,
    Buffering,
    Ended,
    Failed,
}

impl PlaybackPhase {
    /// True while the media has loaded far enough to accept seeks.
    pub fn has_media(self) -> bool {
        !matches!(
            self,
            PlaybackPhase::Idle | PlaybackPhase::Loading | PlaybackPhase::Failed
        )
    }

    /// Whether playback is (or wants to be) advancing.
    pub fn wants_playback(self) -> bool {
        matches!(self, PlaybackPhase::Playing | PlaybackPhase::Buffering)
    }
}

/// Local playback state owned by the session controller.
///
/// `played_fraction <= buffered_fraction` is deliberately not enforced:
/// buffering reports can lag behind the playhead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackState {
    pub playing: bool,
    pub volume: f64,
    pub muted: bool,
    pub played_fraction: f64,
    pub buffered_fraction: f64,
    /// Zero until the media header has loaded.
    pub duration_seconds: f64,
    pub playback_rate: PlaybackRate,
    pub is_seeking: bool,
    pub is_buffering: bool,
    pub is_fullscreen: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            muted: false,
            played_fraction: 0.0,
            buffered_fraction: 0.0,
            duration_seconds: 0.0,
            playback_rate: PlaybackRate::Normal,
            is_seeking: false,
            is_buffering: false,
            is_fullscreen: false,
        }
    }
}

impl PlaybackState {
    /// Start state for a session resuming at `initial_fraction`.
    pub fn resuming_at(initial_fraction: f64) -> Self {
        Self {
            played_fraction: clamp_unit(initial_fraction),
            ..Self::default()
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_unit(volume);
    }

    pub fn set_played_fraction(&mut self, fraction: f64) {
        self.played_fraction = clamp_unit(fraction);
    }

    pub fn set_buffered_fraction(&mut self, fraction: f64) {
        self.buffered_fraction = clamp_unit(fraction);
    }

    /// Effective output volume, accounting for mute.
    pub fn audible_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn played_seconds(&self) -> f64 {
        self.played_fraction * self.duration_seconds
    }

    pub fn has_duration(&self) -> bool {
        self.duration_seconds > 0.0
    }
}

/// Clamp into `[0, 1]`, mapping NaN to zero.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_rate_accepts_only_offered_speeds() {
        assert_eq!(PlaybackRate::try_from(1.25), Ok(PlaybackRate::OneAndQuarter));
        assert_eq!(
            PlaybackRate::try_from(3.0),
            Err(ModelError::UnsupportedPlaybackRate(3.0))
        );
        assert_eq!(PlaybackRate::default().to_string(), "1x");
        assert_eq!(PlaybackRate::ThreeQuarters.to_string(), "0.75x");
    }

    #[test]
    fn volume_and_fractions_are_clamped() {
        let mut state = PlaybackState::default();
        state.set_volume(1.4);
        assert_eq!(state.volume, 1.0);
        state.set_volume(-0.2);
        assert_eq!(state.volume, 0.0);
        state.set_played_fraction(f64::NAN);
        assert_eq!(state.played_fraction, 0.0);
    }

    #[test]
    fn muted_state_silences_output() {
        let state = PlaybackState {
            volume: 0.6,
            muted: true,
            ..PlaybackState::default()
        };
        assert_eq!(state.audible_volume(), 0.0);
    }

    #[test]
    fn duration_is_unknown_until_loaded() {
        let state = PlaybackState::resuming_at(0.4);
        assert!(!state.has_duration());
        assert_eq!(state.played_seconds(), 0.0);
    }
}
