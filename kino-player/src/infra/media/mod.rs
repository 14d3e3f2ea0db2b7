//! Media backends that run without a window system.

pub mod simulated;

pub use simulated::SimulatedMedia;

use kino_contracts::fullscreen::{FullscreenError, FullscreenHost};

/// Fullscreen host for terminal sessions. Every request is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessDisplay;

impl FullscreenHost for HeadlessDisplay {
    fn is_fullscreen(&self) -> bool {
        false
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }
}
