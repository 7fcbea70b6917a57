use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::note::User;

/// What login hands back and what every authenticated request needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Persists the authentication token and user between runs, taking the place
/// of the local storage a browser client would use. Loaded once at startup;
/// an unreadable or corrupt file counts as not logged in.
pub struct SessionStore {
    path: PathBuf,
    session: Option<Session>,
}

impl SessionStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join("session.json");
        let session = Self::read(&path);
        Self { path, session }
    }

    pub fn from_default_location() -> Result<Self> {
        let mut dir = dirs::config_dir().context("failed to resolve config_dir")?;
        dir.push("noteskeeper");
        Ok(Self::from_dir(dir))
    }

    fn read(path: &Path) -> Option<Session> {
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// Stores the session in memory and writes it to disk. The in-memory copy
    /// is updated even when the write fails, so the current run stays logged in.
    pub fn save(&mut self, session: Session) -> Result<()> {
        self.session = Some(session);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text =
            serde_json::to_string_pretty(&self.session).context("failed to serialize session")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.session = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user: User {
                id: "u1".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        }
    }

    #[test]
    fn starts_logged_out_when_no_file_exists() {
        let dir = tempdir().expect("tempdir");
        let store = SessionStore::from_dir(dir.path());
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn save_then_reload_round_trips() {
        let dir = tempdir().expect("tempdir");
        let mut store = SessionStore::from_dir(dir.path());
        store.save(session()).expect("save session");
        assert_eq!(store.token(), Some("tok-1"));

        let reloaded = SessionStore::from_dir(dir.path());
        assert_eq!(reloaded.token(), Some("tok-1"));
        assert_eq!(reloaded.user().map(|u| u.username.as_str()), Some("ada"));
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempdir().expect("tempdir");
        let mut store = SessionStore::from_dir(dir.path());
        store.save(session()).expect("save session");
        store.clear().expect("clear session");
        assert!(store.token().is_none());

        let reloaded = SessionStore::from_dir(dir.path());
        assert!(reloaded.token().is_none());
    }

    #[test]
    fn corrupt_file_counts_as_logged_out() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("session.json"), "not json").expect("write");
        let store = SessionStore::from_dir(dir.path());
        assert!(store.token().is_none());
    }
}
