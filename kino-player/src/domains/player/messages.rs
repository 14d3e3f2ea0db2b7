use kino_contracts::services::ServiceResult;
use kino_model::{MediaEvent, PlaybackRate};

use super::input::{FocusTarget, Key, Modifiers, PlayerCommand};
use super::progress::PendingSave;

/// Everything a [`PlaybackSession`](super::PlaybackSession) reacts to.
///
/// Hosts post media, pointer and keyboard events; the session's own timers
/// and remote calls post the internal variants back onto the same queue.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    // Native media element
    Media(MediaEvent),

    // User input
    Command(PlayerCommand),
    Key {
        key: Key,
        modifiers: Modifiers,
        focus: FocusTarget,
    },
    SeekPressed,
    SeekScrubbed(f64),
    SeekReleased(f64),
    SetVolume(f64),
    SetPlaybackRate(PlaybackRate),
    ToggleSettings,
    PointerMoved,
    PointerLeft,
    VideoClicked { in_controls: bool },
    VideoDoubleClicked { in_controls: bool },

    // Host notifications
    FullscreenChanged(bool),

    // Internal
    SaveDue(PendingSave),
    SaveFinished(ServiceResult<()>),
    CompleteFinished(ServiceResult<()>),
    SkipIndicatorExpired(u64),
    ControlsIdle,

    Unmount,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Media(event) => event.name(),
            Self::Command(command) => command.name(),
            Self::Key { .. } => "Session::Key",
            Self::SeekPressed => "Session::SeekPressed",
            Self::SeekScrubbed(_) => "Session::SeekScrubbed",
            Self::SeekReleased(_) => "Session::SeekReleased",
            Self::SetVolume(_) => "Session::SetVolume",
            Self::SetPlaybackRate(_) => "Session::SetPlaybackRate",
            Self::ToggleSettings => "Session::ToggleSettings",
            Self::PointerMoved => "Session::PointerMoved",
            Self::PointerLeft => "Session::PointerLeft",
            Self::VideoClicked { .. } => "Session::VideoClicked",
            Self::VideoDoubleClicked { .. } => "Session::VideoDoubleClicked",
            Self::FullscreenChanged(_) => "Session::FullscreenChanged",
            Self::SaveDue(_) => "Session::SaveDue",
            Self::SaveFinished(_) => "Session::SaveFinished",
            Self::CompleteFinished(_) => "Session::CompleteFinished",
            Self::SkipIndicatorExpired(_) => "Session::SkipIndicatorExpired",
            Self::ControlsIdle => "Session::ControlsIdle",
            Self::Unmount => "Session::Unmount",
        }
    }
}
