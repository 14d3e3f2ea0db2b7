//! Player focused snapshot of the model surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in kino-player or other presentation layers.

pub use super::content::ContentMetadata;
pub use super::error::ModelError;
pub use super::ids::ContentId;
pub use super::indicator::{SkipDirection, SkipIndicator};
pub use super::media_events::MediaEvent;
pub use super::playback::{PlaybackPhase, PlaybackRate, PlaybackState};
pub use super::progress::{ProgressRecord, ProgressSnapshot};
