//! Short code generation and validation utilities.
//!
//! Codes are 6 to 8 characters drawn from the 62-character ASCII alphanumeric
//! alphabet. Generated codes satisfy [`is_valid_code`] by construction.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for short codes: A-Z, a-z, 0-9.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Shortest allowed code.
pub const MIN_CODE_LEN: usize = 6;

/// Longest allowed code.
pub const MAX_CODE_LEN: usize = 8;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code pattern is valid"));

/// Source of candidate short codes.
///
/// Implementations only produce candidates; uniqueness is enforced by the
/// link store at insert time.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production generator backed by the thread-local CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// The length is chosen uniformly from 6..=8 and every character is drawn
/// independently and uniformly from [`CHARSET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert!((6..=8).contains(&code.len()));
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(MIN_CODE_LEN..=MAX_CODE_LEN);

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is 6-8 ASCII letters or digits and nothing else.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] describing the length and charset rule.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("mycode1").is_ok());
/// assert!(validate_custom_code("ab").is_err());        // Too short
/// assert!(validate_custom_code("abc123!!").is_err());  // Invalid characters
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        return Ok(());
    }

    Err(AppError::bad_request(
        "Custom code must be 6-8 characters long and contain only letters and digits",
        json!({
            "code": code,
            "min_length": MIN_CODE_LEN,
            "max_length": MAX_CODE_LEN,
            "allowed": "A-Z, a-z, 0-9",
        }),
    ))
}
