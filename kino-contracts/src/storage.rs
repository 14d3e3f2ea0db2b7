/// Errors raised by a [`SessionStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are corrupt: {0}")]
    Corrupt(String),
}

/// Small string key/value store that survives restarts.
///
/// Keys are flat strings; values are opaque to the store.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
