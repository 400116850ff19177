//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating user input: the CPF
//! identity checksum, email addresses, server URLs and upload file names.

use crate::error::CliError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Number of digits in a CPF identity string
pub const CPF_LENGTH: usize = 11;

/// Workbook extensions accepted by the upload endpoint
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["xlsx", "xls"];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Compute one CPF check digit from the given digits.
///
/// Weights run from `digits.len() + 1` down to 2. A remainder of 10 or 11
/// collapses to 0.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top_weight - i as u32))
        .sum();
    let remainder = 11 - (sum % 11);
    if remainder >= 10 { 0 } else { remainder }
}

/// Derive both CPF check digits for a nine-digit base.
///
/// Non-digit characters are ignored. Returns `None` unless exactly nine
/// digits remain.
pub fn cpf_check_digits(base: &str) -> Option<(u32, u32)> {
    let digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 9 {
        return None;
    }

    let first = cpf_check_digit(&digits);
    let mut extended = digits;
    extended.push(first);
    let second = cpf_check_digit(&extended);

    Some((first, second))
}

/// Validate a CPF identity string.
///
/// Punctuation such as `111.444.777-35` is stripped before checking. Strings
/// made of one repeated digit are rejected even though their check digits
/// happen to match.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LENGTH {
        return false;
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let first = cpf_check_digit(&digits[..9]);
    let second = cpf_check_digit(&digits[..10]);

    digits[9] == first && digits[10] == second
}

/// Validate an email address with the dashboard's loose pattern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check a file name against the allowed upload extensions (case-insensitive)
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_cpf(base: &str) -> String {
        let (first, second) = cpf_check_digits(base).expect("nine-digit base");
        format!("{}{}{}", base, first, second)
    }

    #[test]
    fn test_cpf_check_digits_derive_known_identity() {
        assert_eq!(cpf_check_digits("111444777"), Some((3, 5)));
        assert_eq!(build_cpf("111444777"), "11144477735");
        assert!(is_valid_cpf("11144477735"));
    }

    #[test]
    fn test_cpf_accepts_punctuated_input() {
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(is_valid_cpf(" 111 444 777 35 "));
    }

    #[test]
    fn test_cpf_rejects_repeated_digits() {
        for d in 0..=9 {
            let repeated = d.to_string().repeat(CPF_LENGTH);
            assert!(!is_valid_cpf(&repeated), "{} should be rejected", repeated);
        }
    }

    #[test]
    fn test_cpf_rejects_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf("abc"));
    }

    /// Raw `11 - (sum mod 11)` for the first check digit, before collapsing.
    fn raw_first_remainder(identity: &str) -> u32 {
        let digits: Vec<u32> = identity.chars().filter_map(|c| c.to_digit(10)).collect();
        let sum: u32 = digits[..9]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (10 - i as u32))
            .sum();
        11 - (sum % 11)
    }

    /// A first check digit of 0 stands for both remainder 10 and 11, so a
    /// change that moves between them can leave both check digits intact.
    fn is_collapsed_collision(original: &str, mutated: &str) -> bool {
        let a = raw_first_remainder(original);
        let b = raw_first_remainder(mutated);
        a >= 10 && b >= 10 && a != b
    }

    #[test]
    fn test_collapsed_remainder_collisions_exist() {
        assert!(is_valid_cpf("12345678909"));
        assert!(is_valid_cpf("22345678909"));
        assert!(is_collapsed_collision("12345678909", "22345678909"));
        assert!(is_valid_cpf("98765232100"));
        assert!(is_collapsed_collision("98765432100", "98765232100"));
    }

    #[test]
    fn test_check_digit_changes_are_never_collisions() {
        for base in ["123456789", "987654321", "390533447"] {
            let valid = build_cpf(base);
            for pos in 9..CPF_LENGTH {
                let original = valid.as_bytes()[pos] - b'0';
                for replacement in (0..=9u8).filter(|r| *r != original) {
                    let mut mutated = valid.clone().into_bytes();
                    mutated[pos] = b'0' + replacement;
                    let mutated = String::from_utf8(mutated).unwrap();
                    assert!(!is_collapsed_collision(&valid, &mutated));
                    assert!(!is_valid_cpf(&mutated), "{} should be invalid", mutated);
                }
            }
        }
    }

    #[test]
    fn test_cpf_rejects_any_single_digit_change() {
        let bases = [
            "111444777",
            "123456789",
            "987654321",
            "529982247",
            "000000001",
            "390533447",
        ];

        for base in bases {
            let valid = build_cpf(base);
            assert!(is_valid_cpf(&valid), "{} should be valid", valid);

            for pos in 0..CPF_LENGTH {
                let original = valid.as_bytes()[pos] - b'0';
                for replacement in (0..=9u8).filter(|r| *r != original) {
                    let mut mutated = valid.clone().into_bytes();
                    mutated[pos] = b'0' + replacement;
                    let mutated = String::from_utf8(mutated).unwrap();
                    if is_collapsed_collision(&valid, &mutated) {
                        continue;
                    }
                    assert!(
                        !is_valid_cpf(&mutated),
                        "{} (from {}) should be invalid",
                        mutated,
                        valid
                    );
                }
            }
        }
    }

    #[test]
    fn test_cpf_check_digits_requires_nine_digits() {
        assert_eq!(cpf_check_digits("12345678"), None);
        assert_eq!(cpf_check_digits("1234567890"), None);
        assert!(cpf_check_digits("123.456.789").is_some());
    }

    #[test]
    fn test_remainder_of_ten_or_eleven_maps_to_zero() {
        // sum = 12, 11 - 1 = 10
        assert_eq!(cpf_check_digit(&[1, 0, 0, 0, 0, 0, 0, 0, 1]), 0);
        // sum = 0, 11 - 0 = 11
        assert_eq!(cpf_check_digit(&[0; 9]), 0);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("first.last@sub.domain.br"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("dados.xlsx", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(has_allowed_extension("DADOS.XLS", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension("dados.csv", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension("xlsx", ALLOWED_UPLOAD_EXTENSIONS));
        assert!(!has_allowed_extension("dados.xlsx.bak", ALLOWED_UPLOAD_EXTENSIONS));
    }

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:5000").is_ok());
        assert!(validate_url("https://dashboard.example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:5000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }
}
