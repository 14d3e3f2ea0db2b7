/// Failure to enter or leave fullscreen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    /// The host refused, e.g. because the request did not come from a user
    /// gesture.
    #[error("fullscreen request denied: {0}")]
    Denied(String),

    #[error("fullscreen is not supported by this host")]
    Unsupported,
}

/// The container that can be shown fullscreen.
///
/// Hosts confirm state changes separately (the controller listens for a
/// fullscreen-change notification); a successful return only means the
/// request was accepted.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait FullscreenHost: Send {
    /// Whether the host currently shows the container fullscreen.
    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}
