//! Trait surfaces that describe how the Kino player talks to the outside world.
//!
//! The controller never touches a concrete media backend, window system,
//! network client or storage medium; it is handed implementations of these
//! traits instead.

pub mod fullscreen;
pub mod media;
pub mod services;
pub mod storage;

/// Frequently used trait combinators for player and orchestration code.
pub mod prelude {
    pub use super::fullscreen::{FullscreenError, FullscreenHost};
    pub use super::media::MediaElement;
    pub use super::services::{
        CatalogService, ProgressService, ServiceError, ServiceResult,
    };
    pub use super::storage::{SessionStorage, StorageError};
}
