//! Aggregates module

pub mod draft;
pub mod otp_session;

pub use draft::{DraftError, FeedbackKind, SurveyDraft};
pub use otp_session::OtpSession;
