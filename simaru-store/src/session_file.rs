//! File-backed session storage, the analog of the browser's local storage.
//! One JSON document with the original keys (`accessToken`, `user`,
//! `isLoggedIn`), written at login and deleted at logout.

use std::path::{Path, PathBuf};

use simaru_core::session::{Session, SessionStore};

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Session {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Session::logged_out(),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "unreadable session file, treating as logged out");
                Session::logged_out()
            }
        }
    }

    fn save(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        std::fs::write(&self.path, raw)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}
