//! Survey Draft Aggregate
//!
//! Rich aggregate for the survey answers under edit, with encapsulated
//! field-error bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::{Field, FieldErrors};

/// Kind of feedback the respondent is leaving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Purchase,
    General,
    #[default]
    Unset,
}

impl FeedbackKind {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Survey draft aggregate root
#[derive(Clone, Debug)]
pub struct SurveyDraft {
    consumer_name: String,
    contact_number: String,
    email: String,
    feedback_kind: FeedbackKind,
    interested_model: Option<String>,
    freeform_feedback: Option<String>,
    source_platform: Option<String>,
    field_errors: FieldErrors,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SurveyDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            consumer_name: String::new(),
            contact_number: String::new(),
            email: String::new(),
            feedback_kind: FeedbackKind::Unset,
            interested_model: None,
            freeform_feedback: None,
            source_platform: None,
            field_errors: FieldErrors::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ===== Getters =====

    pub fn consumer_name(&self) -> &str {
        &self.consumer_name
    }

    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn feedback_kind(&self) -> FeedbackKind {
        self.feedback_kind
    }

    pub fn interested_model(&self) -> Option<&str> {
        self.interested_model.as_deref()
    }

    pub fn freeform_feedback(&self) -> Option<&str> {
        self.freeform_feedback.as_deref()
    }

    pub fn source_platform(&self) -> Option<&str> {
        self.source_platform.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ===== Business Operations =====

    /// Update the respondent's name
    pub fn set_consumer_name(&mut self, value: impl Into<String>) {
        self.consumer_name = value.into();
        self.field_errors.clear(Field::ConsumerName);
        self.touch();
    }

    /// Update the mobile number; callers owning a verification session must
    /// reset it on every edit, including edits back to the same value
    pub fn set_contact_number(&mut self, value: impl Into<String>) {
        self.contact_number = value.into();
        self.field_errors.clear(Field::ContactNumber);
        self.touch();
    }

    /// Update the email address
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.field_errors.clear(Field::Email);
        self.touch();
    }

    /// Choose the feedback kind; the field belonging to the other kind is
    /// cleared so at most one of model/freeform is ever populated
    pub fn choose_feedback_kind(&mut self, kind: FeedbackKind) {
        match kind {
            FeedbackKind::Purchase => {
                self.freeform_feedback = None;
                self.field_errors.clear(Field::FreeformFeedback);
            }
            FeedbackKind::General => {
                self.interested_model = None;
                self.field_errors.clear(Field::InterestedModel);
            }
            FeedbackKind::Unset => {}
        }

        self.feedback_kind = kind;
        self.field_errors.clear(Field::FeedbackKind);
        self.touch();
    }

    /// Record the model of interest; only collected for purchase feedback
    pub fn set_interested_model(&mut self, value: impl Into<String>) -> Result<(), DraftError> {
        if self.feedback_kind != FeedbackKind::Purchase {
            return Err(DraftError::ModelNotApplicable);
        }

        self.interested_model = Self::normalize_optional(value.into());
        self.field_errors.clear(Field::InterestedModel);
        self.touch();
        Ok(())
    }

    /// Record freeform feedback; only collected for general feedback
    pub fn set_freeform_feedback(&mut self, value: impl Into<String>) -> Result<(), DraftError> {
        if self.feedback_kind != FeedbackKind::General {
            return Err(DraftError::FeedbackNotApplicable);
        }

        self.freeform_feedback = Self::normalize_optional(value.into());
        self.field_errors.clear(Field::FreeformFeedback);
        self.touch();
        Ok(())
    }

    /// Record where the respondent heard about the survey
    pub fn set_source_platform(&mut self, value: impl Into<String>) {
        self.source_platform = Self::normalize_optional(value.into());
        self.touch();
    }

    /// Record a single field error without disturbing the others
    pub fn record_field_error(&mut self, field: Field, message: impl Into<String>) {
        self.field_errors.insert(field, message);
    }

    /// Replace the error map with the outcome of a validation pass
    pub fn set_field_errors(&mut self, errors: FieldErrors) {
        self.field_errors = errors;
    }

    // ===== Private Helpers =====

    fn normalize_optional(value: String) -> Option<String> {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for SurveyDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    ModelNotApplicable,
    FeedbackNotApplicable,
}

impl std::error::Error for DraftError {}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotApplicable => {
                write!(f, "Interested model is only collected for purchase feedback")
            }
            Self::FeedbackNotApplicable => {
                write!(f, "Freeform feedback is only collected for general feedback")
            }
        }
    }
}
