//! Persisted client session: the bearer token and the logged-in profile.
//!
//! Stored as a JSON object with the keys `authToken` and `userInfo`. There is
//! no client-side expiry; the server decides whether a token is still good.

use super::ClientResult;
use crate::core::user::UserProfile;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

/// What the client remembers between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Bearer token from the last login
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Profile returned by the last login
    #[serde(default)]
    pub user_info: Option<UserProfile>,
}

/// Storage for [`StoredSession`]
pub trait SessionStore: Send + Sync {
    /// Reads the session; an empty session when nothing was saved.
    fn load(&self) -> ClientResult<StoredSession>;

    /// Replaces the saved session.
    fn save(&self, session: &StoredSession) -> ClientResult<()>;

    /// Forgets the saved session.
    fn clear(&self) -> ClientResult<()> {
        self.save(&StoredSession::default())
    }
}

/// Session kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// A store backed by the file at `path`; the file is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(StoredSession::default());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Session kept in memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<StoredSession>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<StoredSession> {
        Ok(self
            .session
            .lock()
            .map(|session| session.clone())
            .unwrap_or_default())
    }

    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Ok(mut stored) = self.session.lock() {
            *stored = session.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Role;
    use tempfile::tempdir;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            username: "anna".to_string(),
            email: "anna@example.com".to_string(),
            role: Role::Admin,
            first_name: "Anna".to_string(),
            last_name: "Berg".to_string(),
            employee_id: Some("EMP001".to_string()),
        }
    }

    #[test]
    fn test_file_store_round_trip_and_clear() -> ClientResult<()> {
        let dir = tempdir()?;
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load()?, StoredSession::default());

        let session = StoredSession {
            auth_token: Some("token-1".to_string()),
            user_info: Some(profile()),
        };
        store.save(&session)?;
        assert_eq!(store.load()?, session);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path())?)?;
        assert_eq!(raw["authToken"], "token-1");
        assert_eq!(raw["userInfo"]["employeeID"], "EMP001");
        assert_eq!(raw["userInfo"]["role"], "admin");

        store.clear()?;
        assert_eq!(store.load()?, StoredSession::default());
        Ok(())
    }

    #[test]
    fn test_memory_store() -> ClientResult<()> {
        let store = MemorySessionStore::default();
        store.save(&StoredSession {
            auth_token: Some("t".to_string()),
            user_info: None,
        })?;
        assert_eq!(store.load()?.auth_token.as_deref(), Some("t"));
        store.clear()?;
        assert!(store.load()?.auth_token.is_none());
        Ok(())
    }
}
