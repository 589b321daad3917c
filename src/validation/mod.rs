//! Declarative field validation with localized (Turkish) labels.
//!
//! Rules never short-circuit: every failing rule appends a message under its
//! field name, and the caller gets the whole map back so clients can render
//! all problems at once. Message catalogs stay here so handlers only declare
//! which rules apply to which fields.

use regex::Regex;
use std::collections::BTreeMap;

pub mod phone;

/// Field name to human-readable messages, in stable field order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const PASSWORD_MIN_LEN: usize = 8;

/// Accumulates rule failures across all fields of a request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a message under a field; used by rules and by store-level
    /// uniqueness failures that surface after the rule pass.
    pub fn add(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    /// Non-empty string rule. Returns whether the value was present so
    /// follow-up rules can skip redundant messages on missing fields.
    pub fn required(&mut self, field: &str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, format!("{label} alanı zorunludur."));
            return false;
        }
        true
    }

    /// Email syntax rule on a present value.
    pub fn email(&mut self, field: &str, label: &str, value: &str) {
        if !valid_email(value) {
            self.add(field, format!("{label} geçerli bir e-posta adresi olmalıdır."));
        }
    }

    /// Turkish mobile rule on a present value: 12 digits after normalization,
    /// international form with the mobile prefix.
    pub fn turkish_phone(&mut self, field: &str, label: &str, value: &str) {
        let normalized = phone::normalize(value);
        if normalized.len() != phone::CANONICAL_LEN {
            self.add(field, format!("{label} 12 basamaklı olmalıdır."));
        } else if !phone::is_valid(value) {
            self.add(
                field,
                format!("{label} geçerli bir cep telefonu numarası olmalıdır."),
            );
        }
    }

    /// Password strength rule: minimum length plus one of each character
    /// class (upper, lower, digit, symbol).
    pub fn password_strength(&mut self, field: &str, label: &str, value: &str) {
        if value.chars().count() < PASSWORD_MIN_LEN {
            self.add(
                field,
                format!("{label} en az {PASSWORD_MIN_LEN} karakter olmalıdır."),
            );
        }
        let has_upper = value.chars().any(char::is_uppercase);
        let has_lower = value.chars().any(char::is_lowercase);
        if !has_upper || !has_lower {
            self.add(
                field,
                format!("{label} en az bir büyük harf ve bir küçük harf içermelidir."),
            );
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            self.add(field, format!("{label} en az bir rakam içermelidir."));
        }
        if !value.chars().any(|c| !c.is_alphanumeric()) {
            self.add(field, format!("{label} en az bir sembol içermelidir."));
        }
    }

    /// Uniqueness failure reported in the same shape as rule failures.
    pub fn already_taken(&mut self, field: &str, label: &str) {
        self.add(field, format!("{label} daha önce alınmış."));
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator: `Ok(())` when every rule passed.
    ///
    /// # Errors
    /// Returns the accumulated field-to-messages map otherwise.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Basic email format check, also used to classify the combined login
/// identifier as email vs phone.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}
