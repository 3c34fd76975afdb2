//! The cached login session: identity plus bearer token.
//!
//! The browser original kept these under two localStorage keys (`me` and
//! `token`); here they are two files under the user's config directory. The
//! pair is all-or-nothing: a session only reads as present when both keys
//! exist and parse, and logout removes both together so no page can observe
//! a half-logged-out state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Role;

const IDENTITY_KEY: &str = "me.json";
const TOKEN_KEY: &str = "token";

/// The locally cached session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(skip)]
    pub token: String,
}

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Present(Session),
    Absent,
}

impl SessionState {
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session state: {0}")]
    Io(#[from] io::Error),
    #[error("cached identity is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One canonical read/save/clear path for the cached session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at an explicit directory (tests, `TILL_CONFIG_DIR`).
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the default location (see [`crate::config::config_dir`]).
    #[must_use]
    pub fn open_default() -> Self {
        Self::at(crate::config::config_dir())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn identity_path(&self) -> PathBuf {
        self.dir.join(IDENTITY_KEY)
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }

    /// Read the cached credentials. Purely local; no network call.
    ///
    /// A missing key — either of them — reads as [`SessionState::Absent`]:
    /// a half-present pair never yields a session. A present-but-corrupt
    /// identity file is an error, not an absence, so callers can surface it
    /// instead of silently bouncing to login.
    pub fn check(&self) -> Result<SessionState, SessionError> {
        let token = match fs::read_to_string(self.token_path()) {
            Ok(token) => token.trim().to_string(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(SessionState::Absent);
            }
            Err(err) => return Err(err.into()),
        };

        let identity = match fs::read_to_string(self.identity_path()) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("token present without identity; treating session as absent");
                return Ok(SessionState::Absent);
            }
            Err(err) => return Err(err.into()),
        };

        if token.is_empty() {
            return Ok(SessionState::Absent);
        }

        let mut session: Session = serde_json::from_str(&identity)?;
        session.token = token;
        Ok(SessionState::Present(session))
    }

    /// Persist both keys. Identity first, token last, so a torn write leaves
    /// a pair that still reads as absent rather than a session without a
    /// usable token.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.identity_path(), serde_json::to_string_pretty(session)?)?;
        fs::write(self.token_path(), &session.token)?;
        debug!(username = %session.username, "session saved");
        Ok(())
    }

    /// Remove both keys together. Both removals are attempted regardless of
    /// individual failure; already-absent keys are not errors. Any real I/O
    /// failure is reported after both attempts so the pair is never left
    /// half-cleared by an early return.
    pub fn clear(&self) -> Result<(), SessionError> {
        let token = remove_if_present(&self.token_path());
        let identity = remove_if_present(&self.identity_path());
        token?;
        identity?;
        debug!("session cleared");
        Ok(())
    }
}

fn remove_if_present(path: &Path) -> Result<(), SessionError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionState, SessionStore};
    use crate::model::Role;

    fn session() -> Session {
        Session {
            id: 4,
            username: "ana".to_string(),
            role: Role::Seller,
            token: "tok-123".to_string(),
        }
    }

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SessionStore::at(dir.path());
        (dir, store)
    }

    #[test]
    fn fresh_store_reads_absent() {
        let (_dir, store) = store();
        assert_eq!(store.check().unwrap(), SessionState::Absent);
    }

    #[test]
    fn save_then_check_roundtrips() {
        let (_dir, store) = store();
        store.save(&session()).unwrap();
        match store.check().unwrap() {
            SessionState::Present(s) => {
                assert_eq!(s.username, "ana");
                assert_eq!(s.role, Role::Seller);
                assert_eq!(s.token, "tok-123");
            }
            SessionState::Absent => panic!("expected a session"),
        }
    }

    #[test]
    fn token_never_lands_in_identity_file() {
        let (_dir, store) = store();
        store.save(&session()).unwrap();
        let identity = std::fs::read_to_string(store.dir().join("me.json")).unwrap();
        assert!(!identity.contains("tok-123"));
    }

    #[test]
    fn clear_removes_both_keys() {
        let (_dir, store) = store();
        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert!(!store.dir().join("me.json").exists());
        assert!(!store.dir().join("token").exists());
        assert_eq!(store.check().unwrap(), SessionState::Absent);
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = store();
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn half_present_pair_reads_absent() {
        let (_dir, store) = store();
        store.save(&session()).unwrap();

        std::fs::remove_file(store.dir().join("me.json")).unwrap();
        assert_eq!(store.check().unwrap(), SessionState::Absent);

        store.save(&session()).unwrap();
        std::fs::remove_file(store.dir().join("token")).unwrap();
        assert_eq!(store.check().unwrap(), SessionState::Absent);
    }

    #[test]
    fn corrupt_identity_is_an_error_not_absence() {
        let (_dir, store) = store();
        store.save(&session()).unwrap();
        std::fs::write(store.dir().join("me.json"), "{not json").unwrap();
        assert!(store.check().is_err());
    }
}
