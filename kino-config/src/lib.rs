//! Configuration library for the Kino watch client.
//!
//! Centralizes `.env` handling, environment overrides and the tunables of the
//! playback session controller so the player binary and its tests share one
//! source of truth for defaults and validation rules.

pub mod constants;
pub mod models;
pub mod util;

pub use models::player::{PlayerConfig, PlayerConfigSource};
pub use models::ClientConfig;
