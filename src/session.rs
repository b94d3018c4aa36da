use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// Admin sessions last 8 hours from login.
pub const SESSION_TIMEOUT_MS: i64 = 8 * 60 * 60 * 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub authenticated: bool,
    pub issued_at: i64,
    pub expires_at: i64,
    pub token: String,
}

/// On-disk layout of the session file: the session object plus the two
/// legacy flags the dashboard historically kept alongside it.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    session: SessionData,
    authenticated: bool,
    login_time: i64,
}

/// Gatekeeper for the admin dashboard.
///
/// Compares the candidate password against the single configured secret and
/// keeps a time-boxed session in a local JSON file. Anything wrong with the
/// stored file (missing, unreadable, malformed) means "not authenticated" and
/// is never surfaced as an error. An expired file is left in place until the
/// next login overwrites it or a logout removes it.
pub struct SessionGuard {
    secret: String,
    path: PathBuf,
}

impl SessionGuard {
    pub fn new(secret: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            secret: secret.into(),
            path: path.into(),
        }
    }

    /// Exact, case-sensitive comparison. No hashing, no lockout.
    pub fn check_credential(&self, candidate: &str) -> bool {
        candidate == self.secret
    }

    /// Writes a fresh session, unconditionally overwriting any prior one.
    pub fn start_session(&self) -> Result<(), DeskError> {
        let now = Utc::now().timestamp_millis();
        let file = SessionFile {
            session: SessionData {
                authenticated: true,
                issued_at: now,
                expires_at: now + SESSION_TIMEOUT_MS,
                token: format!("desk_{now}"),
            },
            authenticated: true,
            login_time: now,
        };
        fs::write(&self.path, serde_json::to_vec_pretty(&file)?)?;
        Ok(())
    }

    pub fn is_session_valid(&self) -> bool {
        self.valid_at(Utc::now().timestamp_millis())
    }

    /// Validity check against an explicit clock, in unix milliseconds.
    pub fn valid_at(&self, now_ms: i64) -> bool {
        let Ok(raw) = fs::read(&self.path) else {
            return false;
        };
        let Ok(file) = serde_json::from_slice::<SessionFile>(&raw) else {
            return false;
        };
        file.session.authenticated && now_ms < file.session.expires_at
    }

    /// Removes the session file. Safe to call when no session exists.
    pub fn end_session(&self) -> Result<(), DeskError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
