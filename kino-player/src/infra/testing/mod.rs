//! In-process doubles for the watch services and host traits.
//!
//! Compiled unconditionally so integration tests and demos can share them.

pub mod stubs;
