use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::users::User;

const SESSION_FILE: &str = "user.json";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Could not determine a data directory for the session file")]
    NoDataDir,
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable storage for the single cached `user` blob.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the configured path, or the platform data directory.
    pub fn from_config(path: Option<&str>) -> Result<Self, SessionError> {
        if let Some(path) = path {
            return Ok(Self::new(path));
        }

        let dirs = ProjectDirs::from("app", "CrickBuzz", "crickbuzz").ok_or(SessionError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A blob that no longer parses is removed and reported as absent.
    pub fn load(&self) -> Result<Option<User>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Discarding unreadable session at {}: {}", self.path.display(), e);
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let raw = serde_json::to_string(user)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_str(r#"{"phone":"9876543210","name":"Asha","walletBalance":120}"#).unwrap()
    }

    #[test]
    fn round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("user.json"));

        assert!(store.load().unwrap().is_none());
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_blob_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("user.json"));
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }
}
