use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ApiError, Result};

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;
const POSTAL_CODE_DIGITS: usize = 8;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[\s./-]").expect("static regex"))
}

/// Strips `.`, `-`, `/` and whitespace. `None` if anything but digits remains.
fn digits_only(input: &str) -> Option<String> {
    let stripped = separators().replace_all(input, "");
    stripped
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| stripped.into_owned())
}

/// CPF (11 digits) or CNPJ (14 digits), separators removed.
pub fn normalize_document_number(input: &str) -> Result<String> {
    match digits_only(input) {
        Some(digits) if digits.len() == CPF_DIGITS || digits.len() == CNPJ_DIGITS => Ok(digits),
        other => Err(ApiError::InvalidDocument {
            input: input.to_string(),
            digits: other.map(|d| d.len()).unwrap_or_else(|| count_digits(input)),
        }),
    }
}

/// CEP, 8 digits, separators removed.
pub fn normalize_postal_code(input: &str) -> Result<String> {
    match digits_only(input) {
        Some(digits) if digits.len() == POSTAL_CODE_DIGITS => Ok(digits),
        other => Err(ApiError::InvalidPostalCode {
            input: input.to_string(),
            digits: other.map(|d| d.len()).unwrap_or_else(|| count_digits(input)),
        }),
    }
}

fn count_digits(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_with_separators() {
        assert_eq!(normalize_document_number("123.456.789-01").unwrap(), "12345678901");
        assert_eq!(normalize_document_number("12345678901").unwrap(), "12345678901");
    }

    #[test]
    fn cnpj_with_separators() {
        assert_eq!(normalize_document_number("12.345.678/0001-95").unwrap(), "12345678000195");
        assert_eq!(normalize_document_number(" 12345678/0001-95 ").unwrap(), "12345678000195");
    }

    #[test]
    fn every_other_length_is_rejected() {
        for len in (0..=20).filter(|n| *n != 11 && *n != 14) {
            let input = "9".repeat(len);
            match normalize_document_number(&input) {
                Err(ApiError::InvalidDocument { digits, .. }) => assert_eq!(digits, len),
                other => panic!("length {len} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn letters_are_not_silently_dropped() {
        assert!(matches!(
            normalize_document_number("123.456.789-0A"),
            Err(ApiError::InvalidDocument { digits: 10, .. })
        ));
        assert!(normalize_document_number("1234567890a1").is_err());
    }

    #[test]
    fn postal_code_variants() {
        assert_eq!(normalize_postal_code("12345-678").unwrap(), "12345678");
        assert_eq!(normalize_postal_code("12.345-678").unwrap(), "12345678");
        assert_eq!(normalize_postal_code("12345678").unwrap(), "12345678");
    }

    #[test]
    fn postal_code_wrong_length() {
        for input in ["1234-567", "123456789", "", "ABCDE-FGH"] {
            assert!(
                matches!(normalize_postal_code(input), Err(ApiError::InvalidPostalCode { .. })),
                "{input} accepted"
            );
        }
    }
}
