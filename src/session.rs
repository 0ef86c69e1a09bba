use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{api::models::Role, ClientError};

/// The credentials of a logged in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by `POST /login`.
    pub token: String,
    pub role: Role,
    #[serde(default)]
    pub jugador_id: Option<i64>,
}

/// Somewhere to keep the session between runs.
pub trait SessionStore {
    /// Returns the saved session, or None if nobody is logged in.
    fn load(&self) -> Result<Option<Session>, ClientError>;

    fn save(&self, session: &Session) -> Result<(), ClientError>;

    /// Forget the saved session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Keeps the session as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create session directory {}", parent.display())
                })?;
            }
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            )),
        }
    }
}

/// Keeps the session for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out with a session already saved.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        let session = self
            .session
            .lock()
            .map_err(|_| anyhow!("Session lock poisoned"))?;
        Ok(session.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self
            .session
            .lock()
            .map_err(|_| anyhow!("Session lock poisoned"))? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self
            .session
            .lock()
            .map_err(|_| anyhow!("Session lock poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_session() -> Session {
        Session {
            token: "t".to_string(),
            role: Role::Admin,
            jugador_id: Some(7),
        }
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save(&admin_session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(admin_session()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn file_store_writes_role_in_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&admin_session()).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();

        assert!(raw.contains("\"role\": \"admin\""));
        assert!(raw.contains("\"token\": \"t\""));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(FileSessionStore::new(path).load().is_err());
    }

    #[test]
    fn memory_store_starts_empty() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&admin_session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(admin_session()));
    }
}
