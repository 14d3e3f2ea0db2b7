//! Kino player library
//!
//! This crate contains the watch client's library surfaces used by the
//! `kino-watch` executable in `src/main.rs`: the playback session controller,
//! the watch page lifecycle, session restore and the HTTP adapters for the
//! catalog/progress server.
//!
//! Notes
//! - The controller is UI agnostic. Hosts feed it media, pointer and keyboard
//!   events and implement the media/fullscreen traits from `kino-contracts`.
//! - `infra::testing` is compiled unconditionally so downstream test suites
//!   can reuse the stub services.

pub mod common;
pub mod domains;
pub mod infra;
pub mod util;
