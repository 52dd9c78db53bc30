// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

use crate::models::GenerationPolicy;

// Authentication requests and responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// Email address for the new account
    pub email: String,
    /// Account password
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    pub email: String,
    /// Account password
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Access token for authenticated requests (only present on success)
    pub token: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Whether the presented token maps to a live session
    pub authenticated: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Success message (only present on success)
    pub message: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

// Generator types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationRequest {
    /// Password length (default 16)
    pub length: Option<usize>,
    /// Include uppercase letters A-Z (default true)
    pub include_uppercase: Option<bool>,
    /// Include lowercase letters a-z (default true)
    pub include_lowercase: Option<bool>,
    /// Include digits 0-9 (default true)
    pub include_numbers: Option<bool>,
    /// Include punctuation symbols (default true)
    pub include_symbols: Option<bool>,
}

impl PasswordGenerationRequest {
    /// Fill unset fields from the application defaults.
    pub fn into_policy(self, default_length: usize) -> GenerationPolicy {
        let defaults = GenerationPolicy::default();
        GenerationPolicy {
            length: self.length.unwrap_or(default_length),
            include_uppercase: self.include_uppercase.unwrap_or(defaults.include_uppercase),
            include_lowercase: self.include_lowercase.unwrap_or(defaults.include_lowercase),
            include_numbers: self.include_numbers.unwrap_or(defaults.include_numbers),
            include_symbols: self.include_symbols.unwrap_or(defaults.include_symbols),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordGenerationResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The generated password (only present on success)
    pub password: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

// Password storage types
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SavePasswordRequest {
    /// Display title for the saved password
    pub title: String,
    /// The plaintext password to encrypt and store
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SavedPasswordEntry {
    /// Record id
    pub id: String,
    /// Display title
    pub title: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordListResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Saved passwords, newest first, without secret material
    pub passwords: Vec<SavedPasswordEntry>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RevealPasswordResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The decrypted password (only present on success)
    pub password: Option<String>,
    /// Error message (only present on failure)
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_request_defaults_apply() {
        let request: PasswordGenerationRequest = serde_json::from_str("{}").unwrap();
        let policy = request.into_policy(16);
        assert_eq!(policy.length, 16);
        assert!(policy.include_uppercase);
        assert!(policy.include_lowercase);
        assert!(policy.include_numbers);
        assert!(policy.include_symbols);
    }

    #[test]
    fn generation_request_overrides_survive() {
        let request: PasswordGenerationRequest =
            serde_json::from_str(r#"{"length": 8, "include_symbols": false}"#).unwrap();
        let policy = request.into_policy(16);
        assert_eq!(policy.length, 8);
        assert!(!policy.include_symbols);
        assert!(policy.include_lowercase);
    }
}
