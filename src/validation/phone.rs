//! Turkish mobile number rule and normalization.
//!
//! The canonical stored form is the 12-digit international representation
//! without separators: country code `90`, mobile prefix `5`, nine subscriber
//! digits (`905321234567`). Normalization is pure and total over valid
//! inputs; the same input always yields the same output.

/// Digits in the canonical international form.
pub const CANONICAL_LEN: usize = 12;

const COUNTRY_CODE: &str = "90";
const MOBILE_PREFIX: char = '5';

/// Characters allowed between digits in formatted input.
const SEPARATORS: &[char] = &[' ', '-', '.', '(', ')'];

/// Normalize a raw phone input to the canonical digit string.
///
/// Only separators (spaces, dashes, dots, parentheses) and a leading `+`
/// are stripped; national forms (`0532…`, `532…`) are lifted to the
/// international form. Any other character stays put, so inputs carrying
/// letters or stray symbols never reach the canonical form and the rule
/// rejects them.
#[must_use]
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .collect();

    if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return cleaned;
    }

    match cleaned.len() {
        // subscriber form: 5321234567
        10 if cleaned.starts_with(MOBILE_PREFIX) => format!("{COUNTRY_CODE}{cleaned}"),
        // national form with trunk zero: 05321234567
        11 if cleaned.starts_with('0') => format!("{COUNTRY_CODE}{}", &cleaned[1..]),
        _ => cleaned,
    }
}

/// Whether the input normalizes to a valid Turkish mobile number.
#[must_use]
pub fn is_valid(input: &str) -> bool {
    let normalized = normalize(input);
    normalized.len() == CANONICAL_LEN
        && normalized.bytes().all(|b| b.is_ascii_digit())
        && normalized.starts_with(COUNTRY_CODE)
        && normalized[COUNTRY_CODE.len()..].starts_with(MOBILE_PREFIX)
}
