// src/core/vault.rs
use std::sync::Arc;
use log::debug;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::{BackendClient, BackendError};
use crate::core::session::{Session, SessionError, SessionStore};
use crate::crypto::{self, CryptoError};
use crate::generators::{self, GeneratorError};
use crate::models::{GenerationPolicy, PasswordRecord};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),

    #[error("Crypto error: {0}")]
    CryptoError(#[from] CryptoError),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Generator error: {0}")]
    GeneratorError(#[from] GeneratorError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;

pub struct Vault {
    backend: Arc<BackendClient>,
    sessions: SessionStore,
}

impl Vault {
    pub fn new(backend: Arc<BackendClient>, sessions: SessionStore) -> Self {
        Self { backend, sessions }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        self.backend.sign_up(email, password).await?;
        Ok(())
    }

    /// Sign in against the backend and cache the issued session. Returns
    /// the access token the client must present on subsequent requests.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let auth = self.backend.sign_in(email, password).await?;
        self.sessions
            .insert(&auth.access_token, &auth.user.id, auth.expires_in);
        debug!("Session established for user {}", auth.user.id);
        Ok(auth.access_token)
    }

    /// Drop the local session and revoke the token on the backend.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.remove(token);
        self.backend.sign_out(token).await?;
        Ok(())
    }

    pub fn check_session(&self, token: &str) -> Result<Session> {
        Ok(self.sessions.validate(token)?)
    }

    pub fn generate(&self, policy: &GenerationPolicy) -> Result<String> {
        Ok(generators::generate(policy)?)
    }

    /// Encrypt a secret under the session's account id and persist it.
    ///
    /// The cipher key is the account id the backend already knows. The
    /// Argon2 stretch keeps the string-to-key mapping indirect, but
    /// anyone holding the stored rows and the id can decrypt them.
    pub async fn save_password(
        &self,
        token: &str,
        title: &str,
        plaintext: &str,
    ) -> Result<PasswordRecord> {
        let session = self.sessions.validate(token)?;

        if title.trim().is_empty() {
            return Err(VaultError::InvalidInput("Title cannot be empty".into()));
        }
        if plaintext.is_empty() {
            return Err(VaultError::InvalidInput("Password cannot be empty".into()));
        }

        let encrypted = crypto::encrypt(plaintext, &session.user_id)?;
        let record = self
            .backend
            .insert_password(token, title, &encrypted, &session.user_id)
            .await?;
        debug!("Stored password record {}", record.id);
        Ok(record)
    }

    /// All saved rows for the session's user, newest first. Ciphertext is
    /// passed through untouched; listings never decrypt.
    pub async fn list_passwords(&self, token: &str) -> Result<Vec<PasswordRecord>> {
        self.sessions.validate(token)?;
        Ok(self.backend.list_passwords(token).await?)
    }

    /// Fetch one row and decrypt it under the session's account id.
    pub async fn reveal_password(&self, token: &str, id: Uuid) -> Result<String> {
        let session = self.sessions.validate(token)?;
        let record = self.backend.get_password(token, id).await?;
        let plaintext = crypto::decrypt(&record.encrypted_password, &session.user_id)?;
        Ok(plaintext)
    }
}
