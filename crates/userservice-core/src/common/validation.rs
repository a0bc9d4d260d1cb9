//! Normalization and validation of registration input.
//!
//! All functions here are pure. The same normalizers are used when storing an
//! account and when looking one up, so comparisons always happen on canonical
//! values.
//!
//! Rules are checked in a fixed order and the first violation wins:
//!
//! 1. full name must be non-empty after trimming
//! 2. user name must be at least [`MIN_USER_NAME_LEN`] characters, then
//!    letters and digits only
//! 3. email must contain `@` and `.`
//! 4. the normalized phone must be [`PHONE_LEN`] characters starting with
//!    [`PHONE_COUNTRY_CODE`]

use crate::proto::RegisterMessageRequest;

/// Minimum user name length, in characters, after trimming.
pub const MIN_USER_NAME_LEN: usize = 4;

/// Country calling code every stored phone number starts with.
pub const PHONE_COUNTRY_CODE: &str = "254";

/// Length of a normalized phone number (`254` + 9 subscriber digits).
pub const PHONE_LEN: usize = 12;

/// A registration rule violation. The display text is sent to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("full name is required")]
    EmptyFullName,

    #[error("username must be at least 4 characters")]
    UsernameTooShort,

    #[error("username can only contain letters and numbers")]
    UsernameInvalidChars,

    #[error("invalid email format")]
    InvalidEmailFormat,

    #[error("phone must be in 254XXXXXXXXX format (12 digits)")]
    InvalidPhoneFormat,
}

/// Registration fields after validation, in canonical form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub user_name: String,
    pub email: String,
    pub phone: String,
}

impl Registration {
    /// Validates raw fields and returns their normalized form.
    pub fn validate(
        full_name: &str,
        user_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::EmptyFullName);
        }

        let trimmed_user_name = user_name.trim();
        if trimmed_user_name.chars().count() < MIN_USER_NAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }
        if !is_alphanumeric(trimmed_user_name) {
            return Err(ValidationError::UsernameInvalidChars);
        }

        let trimmed_email = email.trim();
        if !trimmed_email.contains('@') || !trimmed_email.contains('.') {
            return Err(ValidationError::InvalidEmailFormat);
        }

        let phone = normalize_phone(phone);
        if phone.chars().count() != PHONE_LEN || !phone.starts_with(PHONE_COUNTRY_CODE) {
            return Err(ValidationError::InvalidPhoneFormat);
        }

        Ok(Self {
            full_name: full_name.to_owned(),
            user_name: normalize_user_name(user_name),
            email: normalize_email(email),
            phone,
        })
    }
}

impl TryFrom<&RegisterMessageRequest> for Registration {
    type Error = ValidationError;

    fn try_from(req: &RegisterMessageRequest) -> Result<Self, Self::Error> {
        Self::validate(
            &req.full_name,
            &req.user_name,
            &req.email_address,
            &req.phone_number,
        )
    }
}

/// Trims and lower-cases a user name.
pub fn normalize_user_name(user_name: &str) -> String {
    user_name.trim().to_lowercase()
}

/// Trims and lower-cases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Rewrites local phone formats into the `254XXXXXXXXX` form.
///
/// Spaces are stripped first. `0XXXXXXXXX` and `7XXXXXXXX` gain the country
/// code; anything else is returned unchanged so that the format check can
/// reject it.
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.trim().replace(' ', "");
    let len = phone.chars().count();

    if len == 10 {
        if let Some(subscriber) = phone.strip_prefix('0') {
            return format!("{PHONE_COUNTRY_CODE}{subscriber}");
        }
    }
    if len == 9 && phone.starts_with('7') {
        return format!("{PHONE_COUNTRY_CODE}{phone}");
    }
    phone
}

/// Letters and digits from any script are accepted.
fn is_alphanumeric(s: &str) -> bool {
    s.chars().all(|c| c.is_alphabetic() || c.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(full_name: &str, user_name: &str, email: &str, phone: &str) -> RegisterMessageRequest {
        RegisterMessageRequest {
            full_name: full_name.to_owned(),
            user_name: user_name.to_owned(),
            email_address: email.to_owned(),
            phone_number: phone.to_owned(),
            password: "x".to_owned(),
        }
    }

    #[test]
    fn phone_local_formats_gain_country_code() {
        assert_eq!(normalize_phone("0712345678"), "254712345678");
        assert_eq!(normalize_phone("712345678"), "254712345678");
    }

    #[test]
    fn phone_passes_through_when_not_local() {
        assert_eq!(normalize_phone("254712345678"), "254712345678");
        assert_eq!(normalize_phone("12345"), "12345");
        // Wrong length for the `0` rule.
        assert_eq!(normalize_phone("071234567"), "071234567");
    }

    #[test]
    fn phone_strips_surrounding_and_interior_spaces() {
        assert_eq!(normalize_phone("  0712 345 678 "), "254712345678");
        assert_eq!(normalize_phone("712 345 678"), "254712345678");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["0712345678", "712345678", "254712345678", "12345", " 0712 345678"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once, "phone {raw:?}");
        }
        for raw in ["  JaneD1 ", "janed1", "ÉLODIE"] {
            let once = normalize_user_name(raw);
            assert_eq!(normalize_user_name(&once), once);
        }
        let email = normalize_email(" Jane@Example.COM ");
        assert_eq!(email, "jane@example.com");
        assert_eq!(normalize_email(&email), email);
    }

    #[test]
    fn empty_full_name_is_reported_before_short_user_name() {
        let err = Registration::validate("   ", "ab", "a@b.c", "0712345678").unwrap_err();
        assert_eq!(err, ValidationError::EmptyFullName);
    }

    #[test]
    fn user_name_rules() {
        assert_eq!(
            Registration::validate("Jane", "ab1", "a@b.c", "0712345678"),
            Err(ValidationError::UsernameTooShort)
        );
        assert!(Registration::validate("Jane", "abc1", "a@b.c", "0712345678").is_ok());
        assert_eq!(
            Registration::validate("Jane", "abc-1", "a@b.c", "0712345678"),
            Err(ValidationError::UsernameInvalidChars)
        );
    }

    #[test]
    fn user_name_length_ignores_surrounding_whitespace() {
        assert_eq!(
            Registration::validate("Jane", "  ab1  ", "a@b.c", "0712345678"),
            Err(ValidationError::UsernameTooShort)
        );
    }

    #[test]
    fn user_name_accepts_non_latin_letters_and_digits() {
        let reg = Registration::validate("Jane", "Жанна٣", "a@b.c", "0712345678").unwrap();
        assert_eq!(reg.user_name, "жанна٣");
    }

    #[test]
    fn email_needs_at_and_dot() {
        for bad in ["janeexample.com", "jane@example", "   "] {
            assert_eq!(
                Registration::validate("Jane", "janed1", bad, "0712345678"),
                Err(ValidationError::InvalidEmailFormat),
                "email {bad:?}"
            );
        }
    }

    #[test]
    fn phone_must_be_twelve_chars_with_country_code() {
        for bad in ["12345", "255712345678", "2547123456789", ""] {
            assert_eq!(
                Registration::validate("Jane", "janed1", "a@b.c", bad),
                Err(ValidationError::InvalidPhoneFormat),
                "phone {bad:?}"
            );
        }
    }

    #[test]
    fn valid_request_is_normalized() {
        let req = register(" Jane Doe ", "JaneD1", "Jane@Example.com", "0712345678");
        let reg = Registration::try_from(&req).unwrap();
        assert_eq!(
            reg,
            Registration {
                full_name: "Jane Doe".to_owned(),
                user_name: "janed1".to_owned(),
                email: "jane@example.com".to_owned(),
                phone: "254712345678".to_owned(),
            }
        );
    }
}
