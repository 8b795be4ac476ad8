//! Value objects module

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod contact_number;
pub mod email;
pub mod otp_code;

pub use contact_number::{ContactNumber, ContactNumberError};
pub use email::{EmailAddress, EmailError};
pub use otp_code::{OtpCode, OtpCodeError};

/// Opaque verification session identifier minted by the verification collaborator
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtpSessionId(String);

impl OtpSessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OtpSessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque access token carried by a tokenized survey entry link
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a token from an already-extracted value
    pub fn new(value: impl Into<String>) -> Result<Self, AccessTokenError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(AccessTokenError::Empty);
        }

        Ok(Self(value))
    }

    /// Extract the token from a tokenized entry link (`token` query parameter)
    pub fn from_entry_url(link: &str) -> Result<Self, AccessTokenError> {
        let parsed = url::Url::parse(link).map_err(|_| AccessTokenError::MalformedLink)?;

        let token = parsed
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .ok_or(AccessTokenError::MissingToken)?;

        Self::new(token).map_err(|_| AccessTokenError::MissingToken)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access token extraction errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTokenError {
    Empty,
    MissingToken,
    MalformedLink,
}

impl fmt::Display for AccessTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Access token cannot be empty"),
            Self::MissingToken | Self::MalformedLink => {
                write!(f, "Invalid or missing token. Please use a valid link.")
            }
        }
    }
}

impl std::error::Error for AccessTokenError {}

/// Survey fields that carry validation errors
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ConsumerName,
    ContactNumber,
    Email,
    FeedbackKind,
    InterestedModel,
    FreeformFeedback,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConsumerName => "consumer_name",
            Self::ContactNumber => "contact_number",
            Self::Email => "email",
            Self::FeedbackKind => "feedback_kind",
            Self::InterestedModel => "interested_model",
            Self::FreeformFeedback => "freeform_feedback",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-field validation errors, at most one message per field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any previous one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for a field, if any
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}
