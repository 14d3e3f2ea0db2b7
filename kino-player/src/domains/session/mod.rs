//! Signed-in state for the watch client.
//!
//! The session is restored from a [`SessionStorage`] backend under three flat
//! keys: `token`, `user`, and the legacy `auth_user` that older clients wrote.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage};

use kino_contracts::storage::{SessionStorage, StorageError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const LEGACY_USER_KEY: &str = "auth_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: String,
}

/// Who is watching. Passed explicitly to the watch page instead of being
/// read from ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<User>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Read the session back. Unparsable user data clears every auth key and
    /// yields an anonymous session.
    pub fn restore(storage: &dyn SessionStorage) -> Result<Self, StorageError> {
        let token = storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user_json = match storage.get(USER_KEY)? {
            Some(json) => Some(json),
            None => storage.get(LEGACY_USER_KEY)?,
        };

        let (Some(token), Some(user_json)) = (token, user_json) else {
            debug!("[Session] No stored session");
            return Ok(Self::anonymous());
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => {
                debug!("[Session] Restored session for {}", user.username);
                Ok(Self::authenticated(token, user))
            }
            Err(err) => {
                warn!("[Session] Discarding invalid stored user: {}", err);
                Self::clear(storage)?;
                Ok(Self::anonymous())
            }
        }
    }

    /// Persist a fresh sign-in.
    pub fn store(
        storage: &dyn SessionStorage,
        token: impl Into<String>,
        user: User,
    ) -> Result<Self, StorageError> {
        let token = token.into();
        let user_json = serde_json::to_string(&user)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        storage.set(TOKEN_KEY, &token)?;
        storage.set(USER_KEY, &user_json)?;
        Ok(Self::authenticated(token, user))
    }

    pub fn clear(storage: &dyn SessionStorage) -> Result<(), StorageError> {
        storage.remove(TOKEN_KEY)?;
        storage.remove(USER_KEY)?;
        storage.remove(LEGACY_USER_KEY)?;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}
