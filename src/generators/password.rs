// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use thiserror::Error;

use crate::models::GenerationPolicy;

// Fixed character classes, concatenated in this order when enabled.
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Error, PartialEq)]
pub enum GeneratorError {
    #[error("At least one character class must be enabled")]
    EmptyAlphabet,
}

// Build the alphabet implied by the policy.
fn resolve_alphabet(policy: &GenerationPolicy) -> Vec<u8> {
    let mut chars = Vec::new();
    if policy.include_uppercase {
        chars.extend_from_slice(UPPERCASE);
    }
    if policy.include_lowercase {
        chars.extend_from_slice(LOWERCASE);
    }
    if policy.include_numbers {
        chars.extend_from_slice(NUMBERS);
    }
    if policy.include_symbols {
        chars.extend_from_slice(SYMBOLS);
    }
    chars
}

/// Generate a random password from the policy's alphabet.
///
/// Each position is drawn independently and uniformly from the alphabet.
/// `thread_rng` is cryptographically secure, which matters here: the
/// output is stored as a secret. Fails when every class flag is off.
pub fn generate(policy: &GenerationPolicy) -> Result<String, GeneratorError> {
    let chars = resolve_alphabet(policy);
    if chars.is_empty() {
        return Err(GeneratorError::EmptyAlphabet);
    }

    let mut rng = rand::thread_rng();
    let dist = Uniform::from(0..chars.len());

    let password = (0..policy.length)
        .map(|_| chars[dist.sample(&mut rng)] as char)
        .collect();

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(
        length: usize,
        upper: bool,
        lower: bool,
        numbers: bool,
        symbols: bool,
    ) -> GenerationPolicy {
        GenerationPolicy {
            length,
            include_uppercase: upper,
            include_lowercase: lower,
            include_numbers: numbers,
            include_symbols: symbols,
        }
    }

    #[test]
    fn output_has_requested_length() {
        for length in [1, 8, 16, 64, 128] {
            let password = generate(&policy(length, true, true, true, true)).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn output_stays_within_resolved_alphabet() {
        let p = policy(64, true, true, true, true);
        let alphabet = resolve_alphabet(&p);
        let password = generate(&p).unwrap();
        for c in password.bytes() {
            assert!(alphabet.contains(&c), "unexpected character {:?}", c as char);
        }
    }

    #[test]
    fn uppercase_only_policy_uses_only_uppercase() {
        let password = generate(&policy(8, true, false, false, false)).unwrap();
        assert_eq!(password.len(), 8);
        assert!(password.bytes().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn numbers_only_policy_uses_only_digits() {
        let password = generate(&policy(32, false, false, true, false)).unwrap();
        assert!(password.bytes().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn symbols_only_policy_stays_in_symbol_set() {
        let password = generate(&policy(32, false, false, false, true)).unwrap();
        assert!(password.bytes().all(|c| SYMBOLS.contains(&c)));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let result = generate(&policy(16, false, false, false, false));
        assert_eq!(result, Err(GeneratorError::EmptyAlphabet));
    }

    #[test]
    fn all_classes_appear_over_many_generations() {
        // 10,000 x 16 characters over an 88-character alphabet. Expected
        // per-class counts are tens of thousands; a floor of 1,000 leaves
        // a wide margin against random variation while still catching a
        // starved class.
        let p = policy(16, true, true, true, true);
        let mut upper = 0usize;
        let mut lower = 0usize;
        let mut numbers = 0usize;
        let mut symbols = 0usize;

        for _ in 0..10_000 {
            for c in generate(&p).unwrap().bytes() {
                if c.is_ascii_uppercase() {
                    upper += 1;
                } else if c.is_ascii_lowercase() {
                    lower += 1;
                } else if c.is_ascii_digit() {
                    numbers += 1;
                } else {
                    assert!(SYMBOLS.contains(&c));
                    symbols += 1;
                }
            }
        }

        assert!(upper > 1_000, "uppercase starved: {}", upper);
        assert!(lower > 1_000, "lowercase starved: {}", lower);
        assert!(numbers > 1_000, "numbers starved: {}", numbers);
        assert!(symbols > 1_000, "symbols starved: {}", symbols);
    }
}
