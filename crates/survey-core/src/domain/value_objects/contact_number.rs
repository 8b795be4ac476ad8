//! Contact Number Value Object
//!
//! Immutable, validated mobile number able to receive one-time passcodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digits a deliverable mobile number carries
pub const CONTACT_NUMBER_DIGITS: usize = 10;

/// Mobile contact number value object with validation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Create a new validated contact number
    pub fn new(value: impl Into<String>) -> Result<Self, ContactNumberError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(ContactNumberError::Empty);
        }

        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactNumberError::InvalidCharacters);
        }

        if value.len() != CONTACT_NUMBER_DIGITS {
            return Err(ContactNumberError::InvalidLength);
        }

        Ok(Self(value))
    }

    /// Get the number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactNumberError {
    Empty,
    InvalidLength,
    InvalidCharacters,
}

impl std::error::Error for ContactNumberError {}

impl fmt::Display for ContactNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Contact number cannot be empty"),
            Self::InvalidLength => write!(f, "Contact number must be exactly 10 digits"),
            Self::InvalidCharacters => write!(f, "Contact number contains invalid characters"),
        }
    }
}
