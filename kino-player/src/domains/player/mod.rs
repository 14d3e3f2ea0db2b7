//! Playback session controller
//!
//! Mediates between a native media element and the watch view: local
//! playback state, input translated into media commands, and the debounced,
//! single-in-flight protocol that persists watch progress.

pub mod controller;
pub mod input;
pub mod messages;
pub mod progress;
pub mod state;
pub mod update;

pub use controller::{PlaybackSession, SessionHandle};
pub use input::{FocusTarget, Key, Modifiers, PlayerCommand, route_key};
pub use messages::SessionEvent;
pub use progress::{PendingSave, ProgressSaver, ResumePoint, SaveDecision};
pub use state::PlayerDomainState;
