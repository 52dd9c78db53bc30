// src/backend/mod.rs
//
// Client for the hosted backend the application delegates auth and
// persistence to. Accounts, tokens, row-level scoping and row ordering
// all live on the backend side; this module only speaks its REST
// contract and maps failures onto BackendError.
use serde::{Serialize, Deserialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::PasswordRecord;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Record not found")]
    NotFound,

    #[error("Backend returned status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

// Token endpoint payload: the pieces the service needs from the session
// the backend issues.
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

// Backends wrap errors in a handful of shapes depending on which
// subsystem answered; probe the usual keys in order.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create an account. The backend sends its own verification email;
    /// nothing to hand back on success.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::AuthFailed(error_message(&body)))
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::AuthFailed(error_message(&body)));
        }

        Ok(response.json::<AuthSession>().await?)
    }

    /// Revoke the token on the backend side.
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(BackendError::UnexpectedStatus {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    /// Insert a password row; returns the stored row with its backend-
    /// assigned id and timestamp.
    pub async fn insert_password(
        &self,
        token: &str,
        title: &str,
        encrypted_password: &str,
        user_id: &str,
    ) -> Result<PasswordRecord> {
        let response = self
            .http
            .post(format!("{}/rest/v1/passwords", self.base_url))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(token)
            .json(&json!([{
                "title": title,
                "encrypted_password": encrypted_password,
                "user_id": user_id,
            }]))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let mut rows = response.json::<Vec<PasswordRecord>>().await?;
        if rows.is_empty() {
            return Err(BackendError::InvalidResponse(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    /// All rows visible to the token, newest first. Row-level security on
    /// the backend scopes the result to the token's user.
    pub async fn list_passwords(&self, token: &str) -> Result<Vec<PasswordRecord>> {
        let response = self
            .http
            .get(format!(
                "{}/rest/v1/passwords?select=*&order=created_at.desc",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(response.json::<Vec<PasswordRecord>>().await?)
    }

    /// A single row by id.
    pub async fn get_password(&self, token: &str, id: Uuid) -> Result<PasswordRecord> {
        let response = self
            .http
            .get(format!(
                "{}/rest/v1/passwords?select=*&id=eq.{}",
                self.base_url, id
            ))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let mut rows = response.json::<Vec<PasswordRecord>>().await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(rows.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_session_deserializes_from_token_response() {
        let body = r#"{
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-xyz",
            "user": { "id": "user-123", "email": "a@b.c" }
        }"#;
        let session: AuthSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.access_token, "jwt-abc");
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.user.id, "user-123");
    }

    #[test]
    fn auth_session_tolerates_missing_expiry() {
        let body = r#"{
            "access_token": "jwt-abc",
            "user": { "id": "user-123" }
        }"#;
        let session: AuthSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.expires_in, None);
    }

    #[test]
    fn error_message_probes_known_keys() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Bad login"}"#),
            "Bad login"
        );
        assert_eq!(error_message(r#"{"msg":"User already registered"}"#), "User already registered");
        assert_eq!(error_message(r#"{"message":"permission denied"}"#), "permission denied");
        assert_eq!(error_message("plain text failure"), "plain text failure");
    }
}
