//! Survey workflow service
//!
//! Application service orchestrating the respondent flow: draft edits, the
//! passcode exchange, and the single-flight submission. Owns the draft and
//! session behind private cells so every mutation goes through the workflow
//! contracts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::dto::{
    CodeVerification, DraftEdit, FeedbackModel, SubmissionReceipt, SurveySubmission,
};
use crate::domain::aggregates::{OtpSession, SurveyDraft};
use crate::domain::services::SurveyValidator;
use crate::domain::value_objects::{
    AccessToken, ContactNumber, EmailAddress, Field, FieldErrors, OtpCode,
};
use crate::ports::inbound::{OtpError, SubmitRejection, SurveyWorkflow};
use crate::ports::outbound::{
    Clock, GatewayError, ModelCatalog, Navigator, NotificationSink, SubmissionGateway,
    VerificationGateway,
};

/// Passcode issuance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpPolicy {
    /// Seconds a respondent must wait before re-requesting a code
    pub resend_cooldown_secs: i64,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 30,
        }
    }
}

impl OtpPolicy {
    pub fn resend_cooldown(&self) -> Duration {
        Duration::seconds(self.resend_cooldown_secs)
    }
}

/// Survey workflow application service
///
/// The draft and session cells are never held across an await; responses
/// arriving after an interleaved edit are dropped by the staleness checks.
pub struct SurveyFlowService {
    access_token: AccessToken,
    policy: OtpPolicy,
    draft: RwLock<SurveyDraft>,
    session: RwLock<OtpSession>,
    // Single-flight gate: the permit is held across the delivery await.
    submit_gate: Mutex<()>,
    verification: Arc<dyn VerificationGateway>,
    submissions: Arc<dyn SubmissionGateway>,
    catalog: Arc<dyn ModelCatalog>,
    notices: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
}

impl SurveyFlowService {
    pub fn new(
        access_token: AccessToken,
        verification: Arc<dyn VerificationGateway>,
        submissions: Arc<dyn SubmissionGateway>,
        catalog: Arc<dyn ModelCatalog>,
        notices: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            access_token,
            policy: OtpPolicy::default(),
            draft: RwLock::new(SurveyDraft::new()),
            session: RwLock::new(OtpSession::default()),
            submit_gate: Mutex::new(()),
            verification,
            submissions,
            catalog,
            notices,
            navigator,
            clock,
        }
    }

    pub fn with_policy(mut self, policy: OtpPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Issue a code to the draft's current contact number. Shared by
    /// `request_code` and an eligible `resend_code`.
    async fn issue_to_current_number(&self) -> Result<(), OtpError> {
        let number = {
            let mut draft = self.draft.write();
            let raw = draft.contact_number().trim().to_string();

            if raw.is_empty() {
                draft.record_field_error(Field::ContactNumber, "Contact number is required");
                return Err(OtpError::InvalidContactNumber(
                    "Contact number is required".to_string(),
                ));
            }

            match ContactNumber::new(&raw) {
                Ok(number) => number,
                Err(_) => {
                    draft.record_field_error(Field::ContactNumber, "Enter a valid 10-digit number");
                    return Err(OtpError::InvalidContactNumber(
                        "Enter a valid 10-digit number".to_string(),
                    ));
                }
            }
        };

        match self.verification.issue_code(&number).await {
            Ok(issuance) => {
                // The respondent may have edited the number while the
                // request was in flight; the response then belongs to a
                // number nobody is verifying anymore.
                if self.draft.read().contact_number().trim() != number.as_str() {
                    debug!("discarding issuance for {}: contact number edited", number);
                    return Err(OtpError::Superseded);
                }

                let resend_available_at = self.clock.now() + self.policy.resend_cooldown();
                info!(
                    "verification code issued for {} (session {})",
                    number, issuance.session_id
                );
                self.session
                    .write()
                    .apply_issuance(number, issuance.session_id, resend_available_at);
                self.notices.success("OTP sent successfully!");
                Ok(())
            }
            Err(GatewayError::Denied(message)) => {
                warn!("verification code refused for {}: {}", number, message);
                self.notices.error("Failed to send OTP");
                Err(OtpError::IssuanceRefused(message))
            }
            Err(err) => {
                warn!("verification code issuance failed for {}: {}", number, err);
                self.notices.error("Failed to send OTP. Try again.");
                Err(OtpError::Transport(err.message().to_string()))
            }
        }
    }
}

#[async_trait]
impl SurveyWorkflow for SurveyFlowService {
    fn apply_edit(&self, edit: DraftEdit) {
        let mut draft = self.draft.write();

        match edit {
            DraftEdit::ConsumerName(value) => draft.set_consumer_name(value),
            DraftEdit::ContactNumber(value) => {
                draft.set_contact_number(value);
                // Any edit of the number invalidates the session, even an
                // edit back to the same value.
                let mut session = self.session.write();
                if !session.is_idle() {
                    debug!("contact number edited, resetting verification session");
                    session.reset();
                }
            }
            DraftEdit::Email(value) => draft.set_email(value),
            DraftEdit::FeedbackKind(kind) => draft.choose_feedback_kind(kind),
            DraftEdit::InterestedModel(value) => {
                if let Err(err) = draft.set_interested_model(value) {
                    debug!("draft edit ignored: {}", err);
                }
            }
            DraftEdit::FreeformFeedback(value) => {
                if let Err(err) = draft.set_freeform_feedback(value) {
                    debug!("draft edit ignored: {}", err);
                }
            }
            DraftEdit::SourcePlatform(value) => draft.set_source_platform(value),
        }
    }

    async fn request_code(&self) -> Result<(), OtpError> {
        self.issue_to_current_number().await
    }

    async fn resend_code(&self) -> Result<(), OtpError> {
        {
            let session = self.session.read();
            match &*session {
                OtpSession::Issued {
                    resend_available_at,
                    ..
                } => {
                    let now = self.clock.now();
                    if now < *resend_available_at {
                        let wait = ceil_secs(*resend_available_at - now);
                        debug!("resend refused: {}s remaining in the window", wait);
                        return Err(OtpError::ResendNotReady(wait));
                    }
                }
                _ => return Err(OtpError::NoActiveSession),
            }
        }

        self.issue_to_current_number().await
    }

    async fn submit_code(&self, code: &str) -> Result<(), OtpError> {
        let code = match OtpCode::new(code) {
            Ok(code) => code,
            Err(_) => {
                self.notices.error("Enter 5-digit OTP");
                return Err(OtpError::MalformedCode);
            }
        };

        let (number, session_id) = {
            let session = self.session.read();
            match &*session {
                OtpSession::Issued {
                    contact_number,
                    session_id,
                    ..
                } => (contact_number.clone(), session_id.clone()),
                _ => return Err(OtpError::NoActiveSession),
            }
        };

        match self.verification.verify_code(&number, &code, &session_id).await {
            Ok(CodeVerification { verified }) => {
                let applied = self.session.write().apply_verification(&session_id, verified);
                if !applied {
                    debug!("discarding verification response for superseded session {}", session_id);
                    return Err(OtpError::Superseded);
                }

                if verified {
                    info!("contact number {} verified (session {})", number, session_id);
                    self.notices.success("Mobile number verified successfully!");
                    Ok(())
                } else {
                    debug!("wrong code for session {}", session_id);
                    self.notices.error("Invalid OTP");
                    Err(OtpError::WrongCode)
                }
            }
            Err(GatewayError::Denied(message)) => {
                if !self.session.write().apply_denial(&session_id) {
                    debug!("discarding denial for superseded session {}", session_id);
                    return Err(OtpError::Superseded);
                }
                warn!("verification denied for session {}: {}", session_id, message);
                self.notices.error(&message);
                Err(OtpError::AttemptsExhausted(message))
            }
            Err(err) => {
                warn!("verification failed for session {}: {}", session_id, err);
                self.notices.error("OTP verification failed");
                Err(OtpError::Transport(err.message().to_string()))
            }
        }
    }

    async fn attempt_submit(&self) -> Result<SubmissionReceipt, SubmitRejection> {
        let _permit = match self.submit_gate.try_lock() {
            Ok(permit) => permit,
            Err(_) => {
                debug!("submission already in flight, absorbing duplicate attempt");
                return Err(SubmitRejection::Busy);
            }
        };

        let (submission, respondent_email) = {
            let mut draft = self.draft.write();

            let errors = SurveyValidator::validate(&draft);
            if !errors.is_empty() {
                debug!("submission blocked by {} field error(s)", errors.len());
                draft.set_field_errors(errors.clone());
                return Err(SubmitRejection::Invalid(errors));
            }

            let number = match ContactNumber::new(draft.contact_number()) {
                Ok(number) => number,
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.insert(Field::ContactNumber, "Invalid mobile number");
                    draft.set_field_errors(errors.clone());
                    return Err(SubmitRejection::Invalid(errors));
                }
            };

            let email = match EmailAddress::new(draft.email()) {
                Ok(email) => email,
                Err(_) => {
                    let mut errors = FieldErrors::new();
                    errors.insert(Field::Email, "Invalid email");
                    draft.set_field_errors(errors.clone());
                    return Err(SubmitRejection::Invalid(errors));
                }
            };

            if !self.session.read().is_verified_for(&number) {
                let mut errors = FieldErrors::new();
                errors.insert(Field::ContactNumber, "Mobile number must be verified");
                draft.set_field_errors(errors.clone());
                self.notices.error("Please verify your mobile number first");
                return Err(SubmitRejection::Invalid(errors));
            }

            draft.set_field_errors(FieldErrors::new());
            (SurveySubmission::assemble(&self.access_token, &draft), email)
        };

        match self.submissions.submit_survey(&submission).await {
            Ok(receipt) if receipt.accepted => {
                info!("survey response recorded for {}", respondent_email);
                self.notices.success("Thank you! Your response has been recorded.");
                self.navigator.confirmation(&respondent_email);
                // The completed draft is discarded; a fresh one takes its place.
                *self.draft.write() = SurveyDraft::new();
                *self.session.write() = OtpSession::default();
                Ok(receipt)
            }
            Ok(receipt) => {
                let message = receipt
                    .message
                    .unwrap_or_else(|| "Submission failed. Please try again.".to_string());
                warn!("survey submission refused: {}", message);
                self.notices.error(&message);
                Err(SubmitRejection::Transport(message))
            }
            Err(err) => {
                warn!("survey submission failed: {}", err);
                self.notices.error("Something went wrong. Please try again.");
                Err(SubmitRejection::Transport(err.to_string()))
            }
        }
    }

    async fn load_feedback_models(&self) -> Vec<FeedbackModel> {
        match self.catalog.list_feedback_models().await {
            Ok(models) => {
                debug!("loaded {} feedback models", models.len());
                models
            }
            Err(err) => {
                warn!("feedback model catalog unavailable: {}", err);
                self.notices.error("Failed to load models");
                Vec::new()
            }
        }
    }

    fn draft(&self) -> SurveyDraft {
        self.draft.read().clone()
    }

    fn session(&self) -> OtpSession {
        self.session.read().clone()
    }

    fn resend_wait_secs(&self) -> Option<i64> {
        let session = self.session.read();
        session.resend_wait(self.clock.now()).map(ceil_secs)
    }
}

fn ceil_secs(wait: Duration) -> i64 {
    (wait.num_milliseconds() + 999) / 1000
}
