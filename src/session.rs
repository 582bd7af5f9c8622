//! Session collaborator
//!
//! Credential validation for the login flow and a pluggable store for the
//! username token, so a login survives restarts. The core only ever sees a
//! validated username string; everything here stays outside the
//! conversation log.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Username is required")]
    UsernameRequired,
    #[error("Username must be at least {MIN_USERNAME_LEN} characters")]
    UsernameTooShort,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Validate login credentials. Any username/password pair that meets the
/// length floor is accepted; there is no account database.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), CredentialError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::UsernameRequired);
    }
    if trimmed.chars().count() < MIN_USERNAME_LEN {
        return Err(CredentialError::UsernameTooShort);
    }
    if password.is_empty() {
        return Err(CredentialError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal get/set/clear interface for persisting the username token.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, SessionError>;
    fn set(&self, username: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk session file, keyed by the conventional `brd_user` name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "brd_user", skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

/// File-backed session store under the data directory.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SessionFile = serde_json::from_str(&raw)?;
        Ok(file.user.filter(|u| !u.trim().is_empty()))
    }

    fn set(&self, username: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = SessionFile {
            user: Some(username.to_string()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory store for exercising the trait without touching disk.
    #[derive(Default)]
    struct MemorySessionStore {
        user: Mutex<Option<String>>,
    }

    impl SessionStore for MemorySessionStore {
        fn get(&self) -> Result<Option<String>, SessionError> {
            Ok(self.user.lock().unwrap().clone())
        }

        fn set(&self, username: &str) -> Result<(), SessionError> {
            *self.user.lock().unwrap() = Some(username.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            *self.user.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn credentials_within_bounds_are_accepted() {
        assert_eq!(validate_credentials("bob", "secret"), Ok(()));
        assert_eq!(validate_credentials("  alice  ", "longenough"), Ok(()));
    }

    #[test]
    fn credential_bounds_are_enforced() {
        assert_eq!(
            validate_credentials("", "secret"),
            Err(CredentialError::UsernameRequired)
        );
        assert_eq!(
            validate_credentials("   ", "secret"),
            Err(CredentialError::UsernameRequired)
        );
        assert_eq!(
            validate_credentials("ab", "secret"),
            Err(CredentialError::UsernameTooShort)
        );
        assert_eq!(
            validate_credentials("bob", ""),
            Err(CredentialError::PasswordRequired)
        );
        assert_eq!(
            validate_credentials("bob", "short"),
            Err(CredentialError::PasswordTooShort)
        );
    }

    #[test]
    fn memory_store_round_trips_through_the_trait() {
        let store = MemorySessionStore::default();
        assert!(store.get().unwrap().is_none());
        store.set("alice").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("alice"));
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert!(store.get().unwrap().is_none());
        store.set("alice").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("alice"));

        // A second store over the same directory sees the persisted token
        let reopened = FileSessionStore::new(dir.path());
        assert_eq!(reopened.get().unwrap().as_deref(), Some("alice"));

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        // Clearing twice stays quiet
        store.clear().unwrap();
    }

    #[test]
    fn file_store_uses_the_conventional_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.set("alice").unwrap();

        let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
        assert!(raw.contains("\"brd_user\""));
    }

    #[test]
    fn corrupt_session_file_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), "not json").unwrap();
        let store = FileSessionStore::new(dir.path());
        assert!(matches!(store.get(), Err(SessionError::Corrupt(_))));
    }
}
