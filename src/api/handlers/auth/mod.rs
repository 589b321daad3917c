//! Authentication endpoints and their collaborators.

pub mod error;
pub mod login;
pub mod principal;
pub mod register;
pub mod session;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::AuthError;
pub use login::login;
pub use register::register;
pub use session::{current_user, logout};
pub use state::{AppState, AuthConfig};

use crate::store::UniqueField;

// Localized field labels, shared by the rule passes and conflict reporting.
pub(crate) const LABEL_FIRSTNAME: &str = "İsim";
pub(crate) const LABEL_LASTNAME: &str = "Soyisim";
pub(crate) const LABEL_EMAIL: &str = "Email";
pub(crate) const LABEL_PHONE: &str = "Telefon Numarası";
pub(crate) const LABEL_PASSWORD: &str = "Şifre";

pub(crate) fn field_name(field: UniqueField) -> &'static str {
    match field {
        UniqueField::Email => "email",
        UniqueField::PhoneNumber => "phone_number",
    }
}

pub(crate) fn field_label(field: UniqueField) -> &'static str {
    match field {
        UniqueField::Email => LABEL_EMAIL,
        UniqueField::PhoneNumber => LABEL_PHONE,
    }
}
