//! In-memory collaborator implementations for testing and demos

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};

use crate::application::dto::{
    CodeIssuance, CodeVerification, FeedbackModel, SubmissionReceipt, SurveySubmission,
};
use crate::domain::value_objects::{ContactNumber, EmailAddress, OtpCode, OtpSessionId};
use crate::ports::outbound::{
    Clock, GatewayError, ModelCatalog, Navigator, NotificationSink, SubmissionGateway,
    VerificationGateway,
};

/// Outstanding passcode challenge
#[derive(Debug, Clone)]
struct IssuedChallenge {
    contact_number: ContactNumber,
    code: String,
    attempts: u32,
    expires_at: DateTime<Utc>,
}

/// In-memory verification collaborator
///
/// Issues one challenge per session id. A challenge is consumed on success,
/// removed after `max_attempts` wrong codes, and refused once expired.
pub struct InMemoryVerificationGateway {
    challenges: dashmap::DashMap<String, IssuedChallenge>,
    fixed_code: Option<String>,
    max_attempts: u32,
    ttl: Duration,
}

impl InMemoryVerificationGateway {
    pub fn new() -> Self {
        Self {
            challenges: dashmap::DashMap::new(),
            fixed_code: None,
            max_attempts: 3,
            ttl: Duration::minutes(5),
        }
    }

    /// Issue a known code instead of a random one
    pub fn with_fixed_code(code: impl Into<String>) -> Self {
        let mut gateway = Self::new();
        gateway.fixed_code = Some(code.into());
        gateway
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Code outstanding for a session, if any
    pub fn issued_code(&self, session_id: &OtpSessionId) -> Option<String> {
        self.challenges
            .get(session_id.as_str())
            .map(|challenge| challenge.code.clone())
    }
}

impl Default for InMemoryVerificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationGateway for InMemoryVerificationGateway {
    async fn issue_code(&self, number: &ContactNumber) -> Result<CodeIssuance, GatewayError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let code = match &self.fixed_code {
            Some(code) => code.clone(),
            None => generate_otp_code(),
        };

        tracing::info!("Issuing verification code to {} (session {})", number, session_id);

        self.challenges.insert(
            session_id.clone(),
            IssuedChallenge {
                contact_number: number.clone(),
                code,
                attempts: 0,
                expires_at: Utc::now() + self.ttl,
            },
        );

        Ok(CodeIssuance {
            session_id: OtpSessionId::new(session_id),
        })
    }

    async fn verify_code(
        &self,
        number: &ContactNumber,
        code: &OtpCode,
        session_id: &OtpSessionId,
    ) -> Result<CodeVerification, GatewayError> {
        // The guard must be dropped before any remove on the same key.
        let (matched, exhausted, expired) = {
            let mut challenge = match self.challenges.get_mut(session_id.as_str()) {
                Some(challenge) => challenge,
                None => return Err(GatewayError::Denied("OTP session expired".to_string())),
            };

            if Utc::now() >= challenge.expires_at {
                (false, false, true)
            } else {
                challenge.attempts += 1;
                let matched =
                    challenge.contact_number == *number && challenge.code == code.as_str();
                (matched, !matched && challenge.attempts >= self.max_attempts, false)
            }
        };

        if expired {
            self.challenges.remove(session_id.as_str());
            return Err(GatewayError::Denied("OTP session expired".to_string()));
        }

        if matched {
            // Consumed: a second verify against this session is refused.
            self.challenges.remove(session_id.as_str());
            return Ok(CodeVerification { verified: true });
        }

        if exhausted {
            self.challenges.remove(session_id.as_str());
            return Err(GatewayError::Denied("OTP attempts exhausted".to_string()));
        }

        Ok(CodeVerification { verified: false })
    }
}

/// In-memory collection endpoint
///
/// Keeps every accepted response and refuses a second response for the same
/// access token.
#[derive(Default)]
pub struct InMemorySubmissionGateway {
    responses: dashmap::DashMap<String, SurveySubmission>,
}

impl InMemorySubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.responses.len()
    }

    pub fn recorded(&self) -> Vec<SurveySubmission> {
        self.responses
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl SubmissionGateway for InMemorySubmissionGateway {
    async fn submit_survey(
        &self,
        submission: &SurveySubmission,
    ) -> Result<SubmissionReceipt, GatewayError> {
        if self.responses.contains_key(&submission.access_token) {
            return Ok(SubmissionReceipt::refused("This link has already been used"));
        }

        tracing::info!("Recording survey response for {}", submission.contact_number);
        self.responses
            .insert(submission.access_token.clone(), submission.clone());

        Ok(SubmissionReceipt::accepted())
    }
}

/// Fixed model lineup
pub struct StaticModelCatalog {
    models: Vec<FeedbackModel>,
}

impl StaticModelCatalog {
    pub fn new(models: Vec<FeedbackModel>) -> Self {
        Self { models }
    }
}

#[async_trait]
impl ModelCatalog for StaticModelCatalog {
    async fn list_feedback_models(&self) -> Result<Vec<FeedbackModel>, GatewayError> {
        Ok(self.models.clone())
    }
}

/// Notice captured by the recording sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Notification sink that records every notice
#[derive(Default)]
pub struct RecordingNotificationSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter_map(|notice| match notice {
                Notice::Success(message) => Some(message.clone()),
                Notice::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter_map(|notice| match notice {
                Notice::Error(message) => Some(message.clone()),
                Notice::Success(_) => None,
            })
            .collect()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn success(&self, message: &str) {
        self.notices.lock().push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().push(Notice::Error(message.to_string()));
    }
}

/// Navigator that records confirmation hand-offs
#[derive(Default)]
pub struct RecordingNavigator {
    confirmations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn confirmation(&self, email: &EmailAddress) {
        self.confirmations.lock().push(email.as_str().to_string());
    }
}

/// Wall-clock time source
#[derive(Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven time source for tests
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write() = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

fn generate_otp_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    format!("{:05}", rng.gen_range(0..100000))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_number() -> ContactNumber {
        ContactNumber::new("9876543210").unwrap()
    }

    fn test_submission() -> SurveySubmission {
        SurveySubmission {
            access_token: "tok-1".to_string(),
            consumer_name: "A".to_string(),
            contact_number: "9876543210".to_string(),
            email: "a@b.co".to_string(),
            feedback_kind: crate::domain::aggregates::FeedbackKind::Purchase,
            interested_model: Some("X3".to_string()),
            freeform_feedback: None,
            source_platform: None,
        }
    }

    #[tokio::test]
    async fn test_issue_and_verify_roundtrip() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let number = test_number();

        let issuance = gateway.issue_code(&number).await.unwrap();
        let code = OtpCode::new("12345").unwrap();
        let outcome = gateway
            .verify_code(&number, &code, &issuance.session_id)
            .await
            .unwrap();

        assert!(outcome.verified);
    }

    #[tokio::test]
    async fn test_random_code_is_five_digits() {
        let gateway = InMemoryVerificationGateway::new();
        let issuance = gateway.issue_code(&test_number()).await.unwrap();

        let code = gateway.issued_code(&issuance.session_id).unwrap();
        assert_eq!(code.len(), 5);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_wrong_code_is_not_verified() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let number = test_number();
        let issuance = gateway.issue_code(&number).await.unwrap();

        let wrong = OtpCode::new("00000").unwrap();
        let outcome = gateway
            .verify_code(&number, &wrong, &issuance.session_id)
            .await
            .unwrap();

        assert!(!outcome.verified);
        // The challenge survives a wrong code.
        assert!(gateway.issued_code(&issuance.session_id).is_some());
    }

    #[tokio::test]
    async fn test_attempts_exhaust_after_three_wrong_codes() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let number = test_number();
        let issuance = gateway.issue_code(&number).await.unwrap();
        let wrong = OtpCode::new("00000").unwrap();

        for _ in 0..2 {
            let outcome = gateway
                .verify_code(&number, &wrong, &issuance.session_id)
                .await
                .unwrap();
            assert!(!outcome.verified);
        }

        let third = gateway.verify_code(&number, &wrong, &issuance.session_id).await;
        assert!(matches!(third, Err(GatewayError::Denied(_))));

        // The session is gone; even the right code is refused now.
        let right = OtpCode::new("12345").unwrap();
        let after = gateway.verify_code(&number, &right, &issuance.session_id).await;
        assert!(matches!(after, Err(GatewayError::Denied(_))));
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let number = test_number();
        let issuance = gateway.issue_code(&number).await.unwrap();
        let code = OtpCode::new("12345").unwrap();

        let first = gateway
            .verify_code(&number, &code, &issuance.session_id)
            .await
            .unwrap();
        assert!(first.verified);

        let second = gateway.verify_code(&number, &code, &issuance.session_id).await;
        assert!(matches!(second, Err(GatewayError::Denied(_))));
    }

    #[tokio::test]
    async fn test_unknown_session_is_denied() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let code = OtpCode::new("12345").unwrap();

        let outcome = gateway
            .verify_code(&test_number(), &code, &OtpSessionId::new("missing"))
            .await;

        assert!(matches!(outcome, Err(GatewayError::Denied(_))));
    }

    #[tokio::test]
    async fn test_expired_session_is_denied() {
        let gateway =
            InMemoryVerificationGateway::with_fixed_code("12345").with_ttl(Duration::zero());
        let number = test_number();
        let issuance = gateway.issue_code(&number).await.unwrap();

        let code = OtpCode::new("12345").unwrap();
        let outcome = gateway.verify_code(&number, &code, &issuance.session_id).await;

        assert!(matches!(outcome, Err(GatewayError::Denied(_))));
        assert!(gateway.issued_code(&issuance.session_id).is_none());
    }

    #[tokio::test]
    async fn test_number_mismatch_is_not_verified() {
        let gateway = InMemoryVerificationGateway::with_fixed_code("12345");
        let issuance = gateway.issue_code(&test_number()).await.unwrap();

        let other = ContactNumber::new("1234567890").unwrap();
        let code = OtpCode::new("12345").unwrap();
        let outcome = gateway
            .verify_code(&other, &code, &issuance.session_id)
            .await
            .unwrap();

        assert!(!outcome.verified);
    }

    #[tokio::test]
    async fn test_submission_gateway_records_response() {
        let gateway = InMemorySubmissionGateway::new();

        let receipt = gateway.submit_survey(&test_submission()).await.unwrap();

        assert!(receipt.accepted);
        assert_eq!(gateway.count(), 1);
        assert_eq!(gateway.recorded()[0].consumer_name, "A");
    }

    #[tokio::test]
    async fn test_submission_gateway_refuses_reused_token() {
        let gateway = InMemorySubmissionGateway::new();
        gateway.submit_survey(&test_submission()).await.unwrap();

        let second = gateway.submit_survey(&test_submission()).await.unwrap();

        assert!(!second.accepted);
        assert_eq!(second.message.as_deref(), Some("This link has already been used"));
        assert_eq!(gateway.count(), 1);
    }

    #[tokio::test]
    async fn test_static_catalog_lists_models() {
        let catalog = StaticModelCatalog::new(vec![FeedbackModel::new("m1", "Model X3")]);

        let models = catalog.list_feedback_models().await.unwrap();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "m1");
    }

    #[test]
    fn test_recording_sink_partitions_notices() {
        let sink = RecordingNotificationSink::new();
        sink.success("sent");
        sink.error("failed");
        sink.success("verified");

        assert_eq!(sink.successes(), vec!["sent".to_string(), "verified".to_string()]);
        assert_eq!(sink.errors(), vec!["failed".to_string()]);
        assert_eq!(sink.notices().len(), 3);
    }

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance(Duration::seconds(30));
        assert_eq!(clock.now(), start + Duration::seconds(30));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
