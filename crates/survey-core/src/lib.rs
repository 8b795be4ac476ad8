//! OpenSurvey Respondent Core (OSRC)
//!
//! Respondent-facing workflow for tokenized feedback surveys, following
//! Domain-Driven Design (DDD) and Hexagonal Architecture principles.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Survey draft and verification session aggregates, value objects, validation rules
//! - **Application Layer**: Workflow orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: In-memory collaborator adapters
//!
//! ## Key Aggregates
//!
//! - **SurveyDraft**: The survey answers under edit, with per-field errors
//! - **OtpSession**: Mobile-number ownership proof via one-time passcodes
//!
//! ## Features
//!
//! - Tokenized entry links with opaque access tokens
//! - OTP issue / resend / verify with a derived resend window
//! - Stale-response protection for superseded verification sessions
//! - Single-flight submission with silent busy rejection
//! - Validation re-run on every submission attempt

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{DraftError, FeedbackKind, OtpSession, SurveyDraft};
pub use domain::services::SurveyValidator;
pub use domain::value_objects::{
    AccessToken, AccessTokenError, ContactNumber, EmailAddress, Field, FieldErrors, OtpCode,
    OtpSessionId,
};
pub use application::dto::{
    CodeIssuance, CodeVerification, DraftEdit, FeedbackModel, SubmissionReceipt, SurveySubmission,
};
pub use application::flow::{OtpPolicy, SurveyFlowService};
pub use ports::inbound::{OtpError, SubmitRejection, SurveyWorkflow};
pub use ports::outbound::{
    Clock, GatewayError, ModelCatalog, Navigator, NotificationSink, SubmissionGateway,
    VerificationGateway,
};
