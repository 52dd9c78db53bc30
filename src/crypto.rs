// src/crypto.rs
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use argon2::{password_hash::rand_core::OsRng, Argon2};
use base64::Engine;
use rand::RngCore;
use thiserror::Error;

// Envelope layout: salt || nonce || ciphertext+tag, base64-encoded.
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

// Argon2id parameters used to stretch the key string.
const KDF_MEMORY_COST: u32 = 65536; // 64 MB
const KDF_TIME_COST: u32 = 3;
const KDF_PARALLELISM: u32 = 4;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key derivation error: {0}")]
    KeyDerivationError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

// Stretch the key string into an AES-256 key with Argon2id.
// The key string is an account identifier, not a passphrase; the stretch
// does not make it secret, it only removes the direct string-to-key map.
fn derive_key(key: &str, salt: &[u8]) -> Result<[u8; 32]> {
    let params = argon2::Params::new(
        KDF_MEMORY_COST,
        KDF_TIME_COST,
        KDF_PARALLELISM,
        Some(32),
    )
    .map_err(|e| CryptoError::KeyDerivationError(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut derived = [0u8; 32];
    argon2
        .hash_password_into(key.as_bytes(), salt, &mut derived)
        .map_err(|e| CryptoError::KeyDerivationError(e.to_string()))?;

    Ok(derived)
}

/// Encrypt a plaintext under a key string.
///
/// A fresh random salt and nonce are generated per call and carried inside
/// the returned ciphertext, so the output is self-contained: `decrypt`
/// needs only this string and the same key.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String> {
    // Generate a random salt for the key derivation
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let derived = derive_key(key, &salt)?;
    let aes_key = Key::<Aes256Gcm>::from_slice(&derived);
    let cipher = Aes256Gcm::new(aes_key);

    // Generate a random nonce
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionError(e.to_string()))?;

    // Combine salt, nonce and ciphertext for storage
    let mut envelope = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(base64::engine::general_purpose::STANDARD.encode(envelope))
}

/// Decrypt a ciphertext produced by [`encrypt`] with the same key string.
///
/// Fails when the envelope cannot be parsed or when authentication fails;
/// a wrong key and tampered data are indistinguishable here.
pub fn decrypt(ciphertext: &str, key: &str) -> Result<String> {
    let envelope = base64::engine::general_purpose::STANDARD
        .decode(ciphertext)
        .map_err(|e| CryptoError::InvalidFormat(format!("Invalid base64: {}", e)))?;

    // Ensure the envelope is long enough to contain salt, nonce and tag
    if envelope.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::InvalidFormat("Ciphertext too short".into()));
    }

    let (salt, rest) = envelope.split_at(SALT_LEN);
    let (nonce_bytes, encrypted_data) = rest.split_at(NONCE_LEN);

    let derived = derive_key(key, salt)?;
    let aes_key = Key::<Aes256Gcm>::from_slice(&derived);
    let cipher = Aes256Gcm::new(aes_key);
    let nonce = Nonce::from_slice(nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, encrypted_data)
        .map_err(|e| CryptoError::DecryptionError(e.to_string()))?;

    Ok(String::from_utf8(plaintext)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_returns_original_plaintext() {
        let ciphertext = encrypt("Tr0ub4dor&3", "user-123").unwrap();
        let plaintext = decrypt(&ciphertext, "user-123").unwrap();
        assert_eq!(plaintext, "Tr0ub4dor&3");
    }

    #[test]
    fn round_trip_preserves_unicode() {
        let ciphertext = encrypt("pässwörd ✓", "user-123").unwrap();
        assert_eq!(decrypt(&ciphertext, "user-123").unwrap(), "pässwörd ✓");
    }

    #[test]
    fn round_trip_handles_empty_plaintext() {
        let ciphertext = encrypt("", "user-123").unwrap();
        assert_eq!(decrypt(&ciphertext, "user-123").unwrap(), "");
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let ciphertext = encrypt("hunter2", "user-123").unwrap();
        let result = decrypt(&ciphertext, "user-456");
        assert!(matches!(result, Err(CryptoError::DecryptionError(_))));
    }

    #[test]
    fn tampered_ciphertext_fails_to_decrypt() {
        let ciphertext = encrypt("hunter2", "user-123").unwrap();
        let mut envelope = base64::engine::general_purpose::STANDARD
            .decode(&ciphertext)
            .unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;
        let tampered = base64::engine::general_purpose::STANDARD.encode(envelope);
        assert!(decrypt(&tampered, "user-123").is_err());
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let result = decrypt("not base64!!!", "user-123");
        assert!(matches!(result, Err(CryptoError::InvalidFormat(_))));
    }

    #[test]
    fn truncated_envelope_is_rejected() {
        let short = base64::engine::general_purpose::STANDARD.encode([0u8; 8]);
        let result = decrypt(&short, "user-123");
        assert!(matches!(result, Err(CryptoError::InvalidFormat(_))));
    }

    #[test]
    fn repeated_encryption_yields_distinct_ciphertexts() {
        // Fresh salt and nonce per call
        let a = encrypt("same input", "user-123").unwrap();
        let b = encrypt("same input", "user-123").unwrap();
        assert_ne!(a, b);
    }
}
