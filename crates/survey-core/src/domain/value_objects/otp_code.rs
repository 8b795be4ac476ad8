//! OTP Code Value Object
//!
//! One-time passcode as entered by the respondent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digits a one-time passcode carries
pub const OTP_CODE_DIGITS: usize = 5;

/// One-time passcode value object with validation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    /// Create a new validated passcode
    pub fn new(value: impl Into<String>) -> Result<Self, OtpCodeError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(OtpCodeError::Empty);
        }

        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidCharacters);
        }

        if value.len() != OTP_CODE_DIGITS {
            return Err(OtpCodeError::InvalidLength);
        }

        Ok(Self(value))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpCodeError {
    Empty,
    InvalidLength,
    InvalidCharacters,
}

impl std::error::Error for OtpCodeError {}

impl fmt::Display for OtpCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "OTP code cannot be empty"),
            Self::InvalidLength => write!(f, "OTP code must be exactly 5 digits"),
            Self::InvalidCharacters => write!(f, "OTP code contains invalid characters"),
        }
    }
}
