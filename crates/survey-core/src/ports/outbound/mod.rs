//! Outbound ports (Collaborator traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must
//! implement. The survey core never talks to the outside world except through
//! them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::application::dto::{
    CodeIssuance, CodeVerification, FeedbackModel, SubmissionReceipt, SurveySubmission,
};
use crate::domain::value_objects::{ContactNumber, EmailAddress, OtpCode, OtpSessionId};

/// Errors crossing any collaborator boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The collaborator answered and refused: lockout, expired session,
    /// rejected payload. The operation is settled.
    #[error("Request refused: {0}")]
    Denied(String),
    /// The round trip failed; nothing is known about the operation.
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl GatewayError {
    pub fn message(&self) -> &str {
        match self {
            Self::Denied(message) | Self::Transport(message) => message,
        }
    }
}

/// One-time passcode issuance and verification port
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Send a passcode to the number and open a correlation session
    async fn issue_code(
        &self,
        contact_number: &ContactNumber,
    ) -> Result<CodeIssuance, GatewayError>;

    /// Check a passcode against an open session
    async fn verify_code(
        &self,
        contact_number: &ContactNumber,
        code: &OtpCode,
        session_id: &OtpSessionId,
    ) -> Result<CodeVerification, GatewayError>;
}

/// Completed-survey persistence port
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Persist a completed survey
    async fn submit_survey(
        &self,
        submission: &SurveySubmission,
    ) -> Result<SubmissionReceipt, GatewayError>;
}

/// Read-only catalog of feedback model choices
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_feedback_models(&self) -> Result<Vec<FeedbackModel>, GatewayError>;
}

/// User-facing notices (success and error banners)
pub trait NotificationSink: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Post-submission navigation
pub trait Navigator: Send + Sync {
    /// Hand the respondent off to the confirmation destination
    fn confirmation(&self, email: &EmailAddress);
}

/// Wall-clock source; the resend window is derived by sampling it
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
