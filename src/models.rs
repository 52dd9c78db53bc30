// src/models.rs
use uuid::Uuid;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use utoipa::ToSchema;

/// A stored password row as the backend returns it.
///
/// `encrypted_password` is an opaque ciphertext string; it is produced by
/// the cipher before insertion and only ever decrypted on an explicit
/// reveal. `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordRecord {
    pub id: Uuid,
    pub title: String,
    pub encrypted_password: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

// Password generation policy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerationPolicy {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_lowercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl GenerationPolicy {
    /// True when no character class is enabled, i.e. the alphabet resolves
    /// to nothing and generation cannot proceed.
    pub fn is_empty_alphabet(&self) -> bool {
        !self.include_uppercase
            && !self.include_lowercase
            && !self.include_numbers
            && !self.include_symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_enables_all_classes() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.length, 16);
        assert!(policy.include_uppercase);
        assert!(policy.include_lowercase);
        assert!(policy.include_numbers);
        assert!(policy.include_symbols);
        assert!(!policy.is_empty_alphabet());
    }

    #[test]
    fn all_flags_off_is_empty_alphabet() {
        let policy = GenerationPolicy {
            length: 8,
            include_uppercase: false,
            include_lowercase: false,
            include_numbers: false,
            include_symbols: false,
        };
        assert!(policy.is_empty_alphabet());
    }

    #[test]
    fn record_deserializes_from_backend_row() {
        let row = r#"{
            "id": "7f1e9c2a-8f33-4cf4-9f3e-0a2b1c4d5e6f",
            "title": "github",
            "encrypted_password": "b64opaque==",
            "user_id": "user-123",
            "created_at": "2024-11-02T09:30:00Z"
        }"#;
        let record: PasswordRecord = serde_json::from_str(row).unwrap();
        assert_eq!(record.title, "github");
        assert_eq!(record.user_id, "user-123");
        assert_eq!(record.encrypted_password, "b64opaque==");
    }
}
