//! Deterministic shortcode generation.
//!
//! A shortcode is the six lowest base-62 digits of the SHA-256 digest of a
//! normalized URL. The code space is 62^6 (about 56.8 billion), so distinct
//! URLs can collide; the store decides what a collision means.

use sha2::{Digest, Sha256};

/// Base-62 alphabet: digits, lowercase, then uppercase.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of characters in every generated shortcode.
pub const SHORTCODE_LENGTH: usize = 6;

const BASE: u128 = 62;

/// 62^6, the modulus that selects the low-order digits.
const CODE_SPACE: u128 = BASE.pow(SHORTCODE_LENGTH as u32);

/// Derives the shortcode for an already-normalized URL.
///
/// The digest is read as a big-endian unsigned integer and divided by 62 until
/// six remainders are collected, least significant first. Only `digest mod 62^6`
/// contributes to those digits, so the reduction is done byte by byte instead of
/// materializing a 256-bit integer.
///
/// # Examples
///
/// ```
/// use shortlink::utils::shortcode::generate_shortcode;
///
/// assert_eq!(generate_shortcode("http://example.com/page"), "v7TN5e");
/// ```
pub fn generate_shortcode(normalized_url: &str) -> String {
    let digest = Sha256::digest(normalized_url.as_bytes());

    let mut remainder = digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + u128::from(byte)) % CODE_SPACE);

    let mut code = String::with_capacity(SHORTCODE_LENGTH);
    for _ in 0..SHORTCODE_LENGTH {
        code.push(char::from(ALPHABET[(remainder % BASE) as usize]));
        remainder /= BASE;
    }

    code
}

/// Returns true if `candidate` has the shape of a generated shortcode.
pub fn is_valid_shortcode(candidate: &str) -> bool {
    candidate.len() == SHORTCODE_LENGTH && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_vectors() {
        assert_eq!(generate_shortcode("http://example.com/page"), "v7TN5e");
        assert_eq!(generate_shortcode("http://example.com/"), "lHQpOU");
        assert_eq!(generate_shortcode("https://example.com/"), "bITzuq");
        assert_eq!(generate_shortcode("https://www.rust-lang.org/"), "6lT70a");
    }

    #[test]
    fn test_deterministic() {
        let url = "https://example.com/some/long/path?with=query";
        let first = generate_shortcode(url);
        for _ in 0..100 {
            assert_eq!(generate_shortcode(url), first);
        }
    }

    #[test]
    fn test_fixed_length_and_alphabet() {
        for i in 0..1000 {
            let code = generate_shortcode(&format!("https://example.com/page/{}", i));
            assert_eq!(code.len(), SHORTCODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "bad code {}", code);
        }
    }

    #[test]
    fn test_empty_input_still_six_chars() {
        assert_eq!(generate_shortcode("").len(), SHORTCODE_LENGTH);
    }

    #[test]
    fn test_different_urls_usually_differ() {
        assert_ne!(
            generate_shortcode("https://example.com/a"),
            generate_shortcode("https://example.com/b")
        );
    }

    #[test]
    fn test_is_valid_shortcode() {
        assert!(is_valid_shortcode("v7TN5e"));
        assert!(is_valid_shortcode("000000"));
        assert!(!is_valid_shortcode("abc12"));
        assert!(!is_valid_shortcode("abc1234"));
        assert!(!is_valid_shortcode("abc-12"));
        assert!(!is_valid_shortcode("ab\u{e9}12"));
    }
}
