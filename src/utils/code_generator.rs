//! Short code generation and validation utilities.

use rand::Rng;

/// Symbols a short code is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 8;

/// Generates a random short code.
///
/// Each of the [`CODE_LENGTH`] characters is drawn uniformly from [`ALPHABET`]
/// with the thread-local RNG. Uniqueness is not checked here; the caller
/// checks the store (see [`crate::application::services::LinkService`]).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` could have been produced by [`generate_code`].
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_distinct_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        for _ in 0..100 {
            assert_eq!(generate_code().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_all_symbol_classes() {
        let joined: String = (0..500).map(|_| generate_code()).collect();

        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
        assert!(joined.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("aZ09bY18"));
        assert!(!is_valid_code("short"));
        assert!(!is_valid_code("toolong123"));
        assert!(!is_valid_code("abc-1234"));
        assert!(!is_valid_code("abc_1234"));
        assert!(!is_valid_code("ünicode1"));
        assert!(!is_valid_code(""));
    }
}
