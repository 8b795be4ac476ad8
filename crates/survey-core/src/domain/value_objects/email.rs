//! Email Value Object
//!
//! Immutable, validated email address used for the confirmation hand-off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address value object with validation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address
    pub fn new(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        if !Self::is_valid_format(&value) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> Option<&str> {
        self.0.split('@').nth(1)
    }

    // Accepts local@domain.tld shapes with no whitespace anywhere.
    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let (local, domain) = match email.split_once('@') {
            Some(parts) => parts,
            None => return false,
        };

        if local.is_empty() || domain.is_empty() {
            return false;
        }

        match domain.rsplit_once('.') {
            Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
            None => false,
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    InvalidFormat,
}

impl std::error::Error for EmailError {}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Email cannot be empty"),
            Self::InvalidFormat => write!(f, "Invalid email format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_creation() {
        let email = EmailAddress::new("jordan@example.com").unwrap();
        assert_eq!(email.as_str(), "jordan@example.com");
        assert_eq!(email.domain(), Some("example.com"));
    }

    #[test]
    fn test_email_preserves_case() {
        let email = EmailAddress::new("Jordan.Lee@Example.com").unwrap();
        assert_eq!(email.as_str(), "Jordan.Lee@Example.com");
    }

    #[test]
    fn test_empty_email() {
        assert!(matches!(EmailAddress::new(""), Err(EmailError::Empty)));
        assert!(matches!(EmailAddress::new("  "), Err(EmailError::Empty)));
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert!(matches!(
            EmailAddress::new("jordan.example.com"),
            Err(EmailError::InvalidFormat)
        ));
    }

    #[test]
    fn test_email_requires_dotted_domain() {
        assert!(matches!(EmailAddress::new("jordan@example"), Err(EmailError::InvalidFormat)));
        assert!(matches!(EmailAddress::new("jordan@.com"), Err(EmailError::InvalidFormat)));
        assert!(matches!(EmailAddress::new("jordan@example."), Err(EmailError::InvalidFormat)));
    }

    #[test]
    fn test_email_rejects_whitespace() {
        assert!(matches!(
            EmailAddress::new("jordan lee@example.com"),
            Err(EmailError::InvalidFormat)
        ));
    }

    #[test]
    fn test_email_rejects_empty_local_part() {
        assert!(matches!(EmailAddress::new("@example.com"), Err(EmailError::InvalidFormat)));
    }
}
