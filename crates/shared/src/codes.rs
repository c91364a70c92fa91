//! Join-code generation for spaces.

use rand::Rng;

/// Length of a space join code.
pub const JOIN_CODE_LEN: usize = 6;

/// Alphabet for join codes. Excludes 0/O and 1/I to keep codes readable
/// when shared verbally or scribbled on a whiteboard.
const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generates a random join code.
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();
    (0..JOIN_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..JOIN_CODE_ALPHABET.len());
            JOIN_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Checks whether a string is a well-formed join code.
pub fn is_valid_join_code(code: &str) -> bool {
    code.len() == JOIN_CODE_LEN
        && code.bytes().all(|b| JOIN_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_is_valid() {
        for _ in 0..100 {
            let code = generate_join_code();
            assert!(is_valid_join_code(&code), "invalid code: {}", code);
        }
    }

    #[test]
    fn test_code_length() {
        assert_eq!(generate_join_code().len(), JOIN_CODE_LEN);
    }

    #[test]
    fn test_codes_vary() {
        let a = generate_join_code();
        let b = generate_join_code();
        let c = generate_join_code();
        // Three identical draws from a 32^6 space means the RNG is broken
        assert!(!(a == b && b == c));
    }

    #[test]
    fn test_ambiguous_characters_excluded() {
        for _ in 0..200 {
            let code = generate_join_code();
            assert!(!code.contains('0'));
            assert!(!code.contains('O'));
            assert!(!code.contains('1'));
            assert!(!code.contains('I'));
        }
    }

    #[test]
    fn test_is_valid_join_code() {
        assert!(is_valid_join_code("ABC234"));
        assert!(!is_valid_join_code("abc234")); // lowercase
        assert!(!is_valid_join_code("ABC23")); // too short
        assert!(!is_valid_join_code("ABC2345")); // too long
        assert!(!is_valid_join_code("ABC10X")); // ambiguous chars
        assert!(!is_valid_join_code(""));
    }
}
