//! Driver license numbers.
//!
//! A license number is exactly eight characters: three uppercase ASCII
//! letters followed by five ASCII digits (`"ABC12345"`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use taxi_core::ValueObject;

/// Total number of characters in a license number.
pub const LICENSE_LEN: usize = 8;

/// Number of leading uppercase letters.
pub const PREFIX_LEN: usize = 3;

/// Why a license number was rejected.
///
/// Checks run in this order and the first failing one is reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatViolation {
    #[error("License number should consist of 8 characters")]
    Length,

    #[error("First 3 characters should be uppercase letters")]
    Prefix,

    #[error("Last 5 characters should be digits")]
    Suffix,
}

/// Check `value` against the license number format.
///
/// Returns the input unchanged on success. Length is measured in characters,
/// not bytes.
pub fn validate_license_number(value: &str) -> Result<String, FormatViolation> {
    if value.chars().count() != LICENSE_LEN {
        return Err(FormatViolation::Length);
    }

    let mut chars = value.chars();

    if !chars
        .by_ref()
        .take(PREFIX_LEN)
        .all(|c| c.is_ascii_uppercase())
    {
        return Err(FormatViolation::Prefix);
    }

    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(FormatViolation::Suffix);
    }

    Ok(value.to_string())
}

/// A license number that is known to satisfy [`validate_license_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseNumber(String);

impl LicenseNumber {
    pub fn parse(value: &str) -> Result<Self, FormatViolation> {
        validate_license_number(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for LicenseNumber {}

impl TryFrom<String> for LicenseNumber {
    type Error = FormatViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_license_number(&value)?;
        Ok(Self(value))
    }
}

impl From<LicenseNumber> for String {
    fn from(value: LicenseNumber) -> Self {
        value.0
    }
}

impl core::fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_license_is_returned_unchanged() {
        assert_eq!(validate_license_number("SOS32222"), Ok("SOS32222".to_string()));
    }

    #[test]
    fn short_license_fails_on_length() {
        assert_eq!(validate_license_number("ABC1234"), Err(FormatViolation::Length));
    }

    #[test]
    fn long_license_fails_on_length() {
        assert_eq!(validate_license_number("SOS322223"), Err(FormatViolation::Length));
        assert_eq!(validate_license_number(""), Err(FormatViolation::Length));
    }

    #[test]
    fn digit_in_prefix_fails_on_prefix() {
        assert_eq!(validate_license_number("AB123456"), Err(FormatViolation::Prefix));
    }

    #[test]
    fn lowercase_prefix_fails_on_prefix() {
        assert_eq!(validate_license_number("abc12345"), Err(FormatViolation::Prefix));
    }

    #[test]
    fn letter_in_suffix_fails_on_suffix() {
        assert_eq!(validate_license_number("ABC1234A"), Err(FormatViolation::Suffix));
    }

    #[test]
    fn non_ascii_input_is_counted_in_characters() {
        // 8 chars but 9 bytes: must not panic and must fail on the prefix.
        assert_eq!(validate_license_number("ÄBC12345"), Err(FormatViolation::Prefix));
        // Non-ASCII digits are not accepted in the suffix.
        assert_eq!(validate_license_number("ABC1234٣"), Err(FormatViolation::Suffix));
    }

    #[test]
    fn license_number_deserializes_only_when_valid() {
        let ok: LicenseNumber = serde_json::from_str("\"XYZ12345\"").unwrap();
        assert_eq!(ok.as_str(), "XYZ12345");
        assert!(serde_json::from_str::<LicenseNumber>("\"invalid\"").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"XYZ12345\"");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: any string whose length is not 8 fails on length.
            #[test]
            fn wrong_length_always_fails_on_length(
                s in prop_oneof!["\\PC{0,7}", "\\PC{9,24}"]
            ) {
                prop_assert_eq!(validate_license_number(&s), Err(FormatViolation::Length));
            }

            /// Property: a bad prefix is reported regardless of the suffix.
            #[test]
            fn bad_prefix_always_fails_on_prefix(
                prefix in "[A-Za-z0-9]{3}",
                suffix in "[A-Za-z0-9]{5}"
            ) {
                prop_assume!(!prefix.chars().all(|c| c.is_ascii_uppercase()));
                let s = format!("{prefix}{suffix}");
                prop_assert_eq!(validate_license_number(&s), Err(FormatViolation::Prefix));
            }

            /// Property: with a good prefix, a non-numeric tail fails on suffix.
            #[test]
            fn bad_suffix_always_fails_on_suffix(
                prefix in "[A-Z]{3}",
                suffix in "[A-Za-z0-9]{5}"
            ) {
                prop_assume!(!suffix.chars().all(|c| c.is_ascii_digit()));
                let s = format!("{prefix}{suffix}");
                prop_assert_eq!(validate_license_number(&s), Err(FormatViolation::Suffix));
            }

            /// Property: validation is the identity on valid input.
            #[test]
            fn valid_input_is_identity(s in "[A-Z]{3}[0-9]{5}") {
                prop_assert_eq!(validate_license_number(&s), Ok(s.clone()));
                let parsed = LicenseNumber::parse(&s).unwrap();
                prop_assert_eq!(parsed.as_str(), s.as_str());
            }
        }
    }
}
