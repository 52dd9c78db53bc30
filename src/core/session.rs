// src/core/session.rs
use std::collections::HashMap;
use std::sync::RwLock;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session")]
    InvalidSession,

    #[error("Session expired")]
    SessionExpired,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A backend-issued session, cached for the lifetime of the process.
///
/// `user_id` is the stable account identifier the backend scopes rows by;
/// the vault also feeds it to the cipher as key material.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// In-memory map from access token to session.
///
/// Tokens are minted and signed by the auth backend; this store only
/// remembers which ones this process has seen and when they lapse. There
/// is no refresh: an expired token means a new login.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    fallback_duration: Duration,
}

impl SessionStore {
    pub fn new(fallback_duration: std::time::Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            fallback_duration: Duration::seconds(fallback_duration.as_secs() as i64),
        }
    }

    // Register a session under its access token. `expires_in` is the
    // backend-reported lifetime in seconds; absent, the configured
    // fallback applies.
    pub fn insert(&self, token: &str, user_id: &str, expires_in: Option<u64>) {
        let lifetime = match expires_in {
            Some(secs) => Duration::seconds(secs as i64),
            None => self.fallback_duration,
        };

        let session = Session {
            user_id: user_id.to_string(),
            expires_at: Utc::now() + lifetime,
        };

        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.insert(token.to_string(), session);
    }

    // Look up a token, rejecting unknown and expired ones. Expired
    // entries are dropped on the way out.
    pub fn validate(&self, token: &str) -> Result<Session> {
        {
            let sessions = self.sessions.read().expect("session lock poisoned");
            match sessions.get(token) {
                Some(session) if !session.is_expired() => return Ok(session.clone()),
                Some(_) => {}
                None => return Err(SessionError::InvalidSession),
            }
        }

        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.remove(token);
        Err(SessionError::SessionExpired)
    }

    pub fn remove(&self, token: &str) {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(std::time::Duration::from_secs(3600))
    }

    #[test]
    fn unknown_token_is_invalid() {
        let result = store().validate("nope");
        assert!(matches!(result, Err(SessionError::InvalidSession)));
    }

    #[test]
    fn inserted_token_validates_and_carries_user_id() {
        let sessions = store();
        sessions.insert("tok-1", "user-123", Some(3600));
        let session = sessions.validate("tok-1").unwrap();
        assert_eq!(session.user_id, "user-123");
    }

    #[test]
    fn expired_token_is_rejected_and_evicted() {
        let sessions = store();
        sessions.insert("tok-1", "user-123", Some(0));
        // expires_at == now; anything at or before now counts as expired
        std::thread::sleep(std::time::Duration::from_millis(20));
        let result = sessions.validate("tok-1");
        assert!(matches!(result, Err(SessionError::SessionExpired)));
        // A second lookup no longer finds the entry at all
        let result = sessions.validate("tok-1");
        assert!(matches!(result, Err(SessionError::InvalidSession)));
    }

    #[test]
    fn removed_token_no_longer_validates() {
        let sessions = store();
        sessions.insert("tok-1", "user-123", None);
        sessions.remove("tok-1");
        assert!(sessions.validate("tok-1").is_err());
    }
}
