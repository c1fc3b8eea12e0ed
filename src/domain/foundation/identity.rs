//! Identity value object - the external key a subscription is tracked against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Verified external identity (e.g. a game account name).
///
/// Between 3 and 16 characters drawn from `[A-Za-z0-9_]`. The value is
/// compared byte-for-byte, so `Steve` and `steve` are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Shortest accepted identity.
    pub const MIN_LEN: usize = 3;

    /// Longest accepted identity.
    pub const MAX_LEN: usize = 16;

    /// Creates a new Identity, validating length and character set.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("identity"));
        }

        let len = value.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValidationError::out_of_range(
                "identity",
                Self::MIN_LEN as i64,
                Self::MAX_LEN as i64,
                len as i64,
            ));
        }

        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(ValidationError::invalid_format(
                "identity",
                format!("character '{}' is not a letter, digit or underscore", bad),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_and_underscore() {
        for name in ["Steve123", "Alex", "abc", "a_b_c", "ABCDEFGHIJKLMNOP"] {
            assert!(Identity::new(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Identity::new(""),
            Err(ValidationError::empty_field("identity"))
        );
    }

    #[test]
    fn rejects_too_short_and_too_long() {
        assert!(matches!(
            Identity::new("ab"),
            Err(ValidationError::OutOfRange { actual: 2, .. })
        ));
        assert!(matches!(
            Identity::new("ABCDEFGHIJKLMNOPQ"),
            Err(ValidationError::OutOfRange { actual: 17, .. })
        ));
    }

    #[test]
    fn rejects_punctuation_and_whitespace() {
        for name in ["bad-name", "has space", "dot.name", " Steve", "Stéve"] {
            assert!(
                matches!(Identity::new(name), Err(ValidationError::InvalidFormat { .. })),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let identity = Identity::new("Steve123").unwrap();
        assert_eq!(serde_json::to_string(&identity).unwrap(), "\"Steve123\"");
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<Identity, _> = serde_json::from_str("\"Alex\"");
        assert!(ok.is_ok());

        let bad: Result<Identity, _> = serde_json::from_str("\"no way\"");
        assert!(bad.is_err());
    }
}
