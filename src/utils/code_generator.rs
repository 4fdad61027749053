//! Short code generation and format checks.
//!
//! Codes are fixed-length strings drawn uniformly from a 36-symbol alphabet
//! (digits and lowercase ASCII letters), giving 36^6 ≈ 2.18 × 10⁹ combinations.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Symbols a short code is built from.
pub const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of characters in every generated code.
pub const CODE_LENGTH: usize = 6;

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[0-9a-z]{{{CODE_LENGTH}}}$")).expect("code pattern is valid")
});

/// Draws a random short code using the thread-local RNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Draws a random short code from the given RNG.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Returns `true` if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

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
            assert!(
                code.bytes().all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..100 {
            assert!(is_valid_code(&generate_code()));
        }
    }

    #[test]
    fn test_generate_code_is_deterministic_for_seed() {
        let a = generate_code_with(&mut StdRng::seed_from_u64(7));
        let b = generate_code_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_code_covers_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..2000 {
            seen.extend(generate_code_with(&mut rng).bytes());
        }

        assert_eq!(seen.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn test_alphabet_is_unique_36_symbols() {
        let unique: HashSet<_> = CODE_ALPHABET.iter().collect();
        assert_eq!(CODE_ALPHABET.len(), 36);
        assert_eq!(unique.len(), 36);
    }

    #[test]
    fn test_is_valid_code_rejects_bad_shapes() {
        assert!(is_valid_code("abc123"));
        assert!(is_valid_code("000000"));
        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code("abc1234"));
        assert!(!is_valid_code("ABC123"));
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code(""));
    }
}
