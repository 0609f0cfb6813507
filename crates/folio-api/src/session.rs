//! Logged-in session and its on-disk store.
//!
//! A [`Session`] is created by a successful login, passed explicitly to
//! [`HttpContentApi`](crate::HttpContentApi), and dropped on logout. The
//! [`SessionStore`] persists it between CLI invocations as JSON alongside a
//! SHA-256 digest of the serialized session; a file whose digest does not
//! match is treated as absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::types::User;

/// Authenticated user plus the API key attached to protected requests.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// User record returned at login.
    pub user: User,
    /// Key sent in the `x-api-key` header.
    pub api_key: String,
}

impl Session {
    /// Create a session.
    #[must_use]
    pub fn new(user: User, api_key: impl Into<String>) -> Self {
        Self {
            user,
            api_key: api_key.into(),
        }
    }

    /// Effective role of the logged-in user.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.user.role()
    }
}

#[derive(Deserialize, Serialize)]
struct StoredSession {
    session: String,
    digest: String,
}

fn digest(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

/// File-backed session persistence.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by `path` (usually `.folio/session.json`).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session.
    ///
    /// Returns `None` when no session is stored or the file fails its
    /// integrity check.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let stored: StoredSession = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable session file");
                return None;
            }
        };
        if digest(&stored.session) != stored.digest {
            warn!(path = %self.path.display(), "Session integrity check failed");
            return None;
        }
        match serde_json::from_str(&stored.session) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed session payload");
                None
            }
        }
    }

    /// Persist `session`, replacing any stored one.
    pub fn save(&self, session: &Session) -> Result<(), ApiError> {
        let payload = serde_json::to_string(session)?;
        let stored = StoredSession {
            digest: digest(&payload),
            session: payload,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Merge new user fields into the stored session, keeping its key.
    ///
    /// Returns `false` if there is no valid stored session to update.
    pub fn update_user(&self, user: User) -> Result<bool, ApiError> {
        let Some(mut session) = self.load() else {
            return Ok(false);
        };
        session.user = user;
        self.save(&session)?;
        Ok(true)
    }

    /// Remove the stored session. Missing files are not an error.
    pub fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
