use kino_contracts::fullscreen::{FullscreenError, FullscreenHost};
use parking_lot::Mutex;
use std::sync::Arc;

/// Fullscreen host that records requests. It never changes its own state;
/// tests flip it with [`StubFullscreenHost::set_fullscreen`] the way a real
/// host would before firing its change notification.
#[derive(Debug, Clone, Default)]
pub struct StubFullscreenHost {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    fullscreen: bool,
    deny_with: Option<FullscreenError>,
    requests: usize,
    exits: usize,
}

impl StubFullscreenHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying(error: FullscreenError) -> Self {
        let stub = Self::new();
        stub.inner.lock().deny_with = Some(error);
        stub
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.inner.lock().fullscreen = fullscreen;
    }

    pub fn requests(&self) -> usize {
        self.inner.lock().requests
    }

    pub fn exits(&self) -> usize {
        self.inner.lock().exits
    }
}

impl FullscreenHost for StubFullscreenHost {
    fn is_fullscreen(&self) -> bool {
        self.inner.lock().fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        let mut inner = self.inner.lock();
        inner.requests += 1;
        match inner.deny_with.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        let mut inner = self.inner.lock();
        inner.exits += 1;
        match inner.deny_with.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
