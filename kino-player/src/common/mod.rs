//! Common module containing shared utilities
//!
//! This module provides timing helpers used across multiple domains

pub mod debounce;

pub use debounce::{TrailingDebounce, debounce};
