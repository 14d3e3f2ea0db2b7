//! Core data model definitions shared across Kino crates.
#![allow(missing_docs)]

pub mod content;
pub mod error;
pub mod ids;
pub mod indicator;
pub mod media_events;
pub mod playback;
pub mod prelude;
pub mod progress;

// Intentionally curated re-exports for downstream consumers.
pub use content::ContentMetadata;
pub use error::{ModelError, Result as ModelResult};
pub use ids::ContentId;
pub use indicator::{SkipDirection, SkipIndicator};
pub use media_events::MediaEvent;
pub use playback::{PlaybackPhase, PlaybackRate, PlaybackState};
pub use progress::{ProgressRecord, ProgressSnapshot};
