//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: the workflow surface the survey view drives.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::{DraftEdit, FeedbackModel, SubmissionReceipt};
use crate::domain::aggregates::{OtpSession, SurveyDraft};
use crate::domain::value_objects::FieldErrors;

/// Respondent survey workflow use cases
#[async_trait]
pub trait SurveyWorkflow: Send + Sync {
    /// Apply a field edit to the draft
    fn apply_edit(&self, edit: DraftEdit);

    /// Request a passcode for the draft's contact number
    async fn request_code(&self) -> Result<(), OtpError>;

    /// Re-request a passcode once the resend window has elapsed
    async fn resend_code(&self) -> Result<(), OtpError>;

    /// Submit the passcode the respondent entered
    async fn submit_code(&self, code: &str) -> Result<(), OtpError>;

    /// Validate, gate on verification, and deliver the survey
    async fn attempt_submit(&self) -> Result<SubmissionReceipt, SubmitRejection>;

    /// Load the feedback model choices; degrades to empty on failure
    async fn load_feedback_models(&self) -> Vec<FeedbackModel>;

    /// Snapshot of the draft under edit
    fn draft(&self) -> SurveyDraft;

    /// Snapshot of the verification session
    fn session(&self) -> OtpSession;

    /// Seconds until a resend becomes available; `None` once eligible or
    /// when no code is outstanding
    fn resend_wait_secs(&self) -> Option<i64>;
}

/// Errors surfaced by the passcode operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("{0}")]
    InvalidContactNumber(String),
    #[error("Enter 5-digit OTP")]
    MalformedCode,
    #[error("No verification code is outstanding")]
    NoActiveSession,
    #[error("Resend available in {0}s")]
    ResendNotReady(i64),
    #[error("Verification code could not be issued: {0}")]
    IssuanceRefused(String),
    #[error("Invalid OTP")]
    WrongCode,
    #[error("Verification attempts exhausted: {0}")]
    AttemptsExhausted(String),
    #[error("Response superseded by a newer request")]
    Superseded,
    #[error("Verification service unavailable: {0}")]
    Transport(String),
}

/// Submission rejections; `Busy` is absorbed silently by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("Survey fields failed validation")]
    Invalid(FieldErrors),
    #[error("Submission could not be delivered: {0}")]
    Transport(String),
    #[error("A submission is already in flight")]
    Busy,
}

impl SubmitRejection {
    /// Field errors carried by a validation rejection
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
