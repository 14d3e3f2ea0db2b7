//! Watch client domains
//!
//! - `player`: playback session controller, input routing, progress saving
//! - `watch`: watch page mount/unmount around a player session
//! - `session`: restored sign-in state and its storage backends

pub mod player;
pub mod session;
pub mod watch;
