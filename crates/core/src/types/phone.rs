//! E.164 phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Country code prepended to local numbers (United Arab Emirates).
pub const DEFAULT_COUNTRY_CODE: &str = "971";

/// Errors that can occur when normalizing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input has no digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// A `+` appears somewhere other than the first position.
    #[error("phone number may only contain a leading +")]
    MisplacedPlus,
    /// The digit count after the `+` is outside 11-15.
    #[error("phone number must have {min}-{max} digits (got {got})")]
    InvalidLength {
        /// Minimum allowed digits.
        min: usize,
        /// Maximum allowed digits.
        max: usize,
        /// Digits found.
        got: usize,
    },
}

/// A phone number in E.164 form: `+` followed by 11-15 digits.
///
/// ## Examples
///
/// ```
/// use appliance_masters_core::{PhoneNumber, DEFAULT_COUNTRY_CODE};
///
/// let local = PhoneNumber::normalize("050 123 4567", DEFAULT_COUNTRY_CODE).unwrap();
/// assert_eq!(local.as_str(), "+971501234567");
///
/// let international = PhoneNumber::normalize("+44 20 7946 0958", DEFAULT_COUNTRY_CODE).unwrap();
/// assert_eq!(international.as_str(), "+442079460958");
///
/// assert!(PhoneNumber::normalize("12345", DEFAULT_COUNTRY_CODE).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum digits after the `+`.
    pub const MIN_DIGITS: usize = 11;
    /// Maximum digits after the `+`.
    pub const MAX_DIGITS: usize = 15;

    /// Normalize free-form phone input to E.164.
    ///
    /// Everything except ASCII digits and `+` is stripped. Input that does not
    /// start with `+` has its leading zeros removed (covering the `00`
    /// international prefix) and gets `country_code` prepended unless it
    /// already starts with it.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] when the result is not `+` and 11-15 digits.
    pub fn normalize(raw: &str, country_code: &str) -> Result<Self, PhoneError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();

        if !cleaned.chars().any(|c| c.is_ascii_digit()) {
            return Err(PhoneError::Empty);
        }

        let digits = match cleaned.strip_prefix('+') {
            Some(rest) => rest.to_owned(),
            None => {
                let local = cleaned.trim_start_matches('0');
                if local.starts_with(country_code) {
                    local.to_owned()
                } else {
                    format!("{country_code}{local}")
                }
            }
        };

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::MisplacedPlus);
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                got: digits.len(),
            });
        }

        Ok(Self(format!("+{digits}")))
    }

    /// Returns the number as a string slice, including the `+`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the digits without the leading `+`.
    #[must_use]
    pub fn digits(&self) -> &str {
        self.0.trim_start_matches('+')
    }
}

/// Lenient normalization: the E.164 form, or `None` if it cannot be produced.
#[must_use]
pub fn normalize_phone(raw: &str, country_code: &str) -> Option<String> {
    PhoneNumber::normalize(raw, country_code)
        .ok()
        .map(PhoneNumber::into_inner)
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> Option<String> {
        normalize_phone(raw, DEFAULT_COUNTRY_CODE)
    }

    #[test]
    fn test_international_numbers_are_unchanged() {
        assert_eq!(normalize("+971501234567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("+442079460958").as_deref(), Some("+442079460958"));
        assert_eq!(
            normalize("+123456789012345").as_deref(),
            Some("+123456789012345")
        );
    }

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(normalize("0501234567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("00501234567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn test_country_code_is_not_doubled() {
        assert_eq!(normalize("971501234567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("00971501234567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("971 50 123 4567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn test_formatting_characters_are_stripped() {
        assert_eq!(
            normalize("+971 (50) 123-4567").as_deref(),
            Some("+971501234567")
        );
        assert_eq!(normalize("050.123.4567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert_eq!(normalize("+1234567890"), None);
        assert_eq!(normalize("12345"), None);
    }

    #[test]
    fn test_too_long_is_rejected() {
        assert_eq!(normalize("+1234567890123456"), None);
    }

    #[test]
    fn test_inner_plus_is_rejected() {
        assert_eq!(
            PhoneNumber::normalize("050+1234567", DEFAULT_COUNTRY_CODE),
            Err(PhoneError::MisplacedPlus)
        );
    }

    #[test]
    fn test_no_digits_is_empty() {
        assert_eq!(
            PhoneNumber::normalize("call me", DEFAULT_COUNTRY_CODE),
            Err(PhoneError::Empty)
        );
    }

    #[test]
    fn test_custom_country_code() {
        assert_eq!(
            normalize_phone("03001234567", "92").as_deref(),
            Some("+923001234567")
        );
    }

    #[test]
    fn test_digits() {
        let phone = PhoneNumber::normalize("+971501234567", DEFAULT_COUNTRY_CODE).unwrap();
        assert_eq!(phone.digits(), "971501234567");
    }
}
