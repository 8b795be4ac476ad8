//! Data Transfer Objects
//!
//! Edits arriving from the view and wire shapes crossing the collaborator
//! ports.

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{FeedbackKind, SurveyDraft};
use crate::domain::value_objects::{AccessToken, OtpSessionId};

// ===== Draft Edits =====

/// A single field edit arriving from the survey view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    ConsumerName(String),
    ContactNumber(String),
    Email(String),
    FeedbackKind(FeedbackKind),
    InterestedModel(String),
    FreeformFeedback(String),
    SourcePlatform(String),
}

// ===== Verification Exchanges =====

/// Issuance acknowledgement from the verification collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeIssuance {
    pub session_id: OtpSessionId,
}

/// Verification outcome from the verification collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeVerification {
    pub verified: bool,
}

// ===== Submission Exchanges =====

/// Completed survey payload delivered to the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub access_token: String,
    pub consumer_name: String,
    pub contact_number: String,
    pub email: String,
    pub feedback_kind: FeedbackKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interested_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeform_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_platform: Option<String>,
}

impl SurveySubmission {
    /// Assemble the payload from a validated draft
    pub fn assemble(access_token: &AccessToken, draft: &SurveyDraft) -> Self {
        Self {
            access_token: access_token.as_str().to_string(),
            consumer_name: draft.consumer_name().trim().to_string(),
            contact_number: draft.contact_number().trim().to_string(),
            email: draft.email().trim().to_string(),
            feedback_kind: draft.feedback_kind(),
            interested_model: draft.interested_model().map(str::to_string),
            freeform_feedback: draft.freeform_feedback().map(str::to_string),
            source_platform: draft.source_platform().map(str::to_string),
        }
    }
}

/// Acknowledgement from the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionReceipt {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            message: None,
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            message: Some(message.into()),
        }
    }
}

// ===== Catalogs =====

/// Feedback model catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackModel {
    pub id: String,
    pub label: String,
}

impl FeedbackModel {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Source platform catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePlatform {
    pub value: &'static str,
    pub label: &'static str,
}

/// Platforms a respondent may have arrived from
pub const SOURCE_PLATFORMS: &[SourcePlatform] = &[
    SourcePlatform {
        value: "facebook",
        label: "Facebook",
    },
    SourcePlatform {
        value: "instagram",
        label: "Instagram",
    },
    SourcePlatform {
        value: "youtube",
        label: "YouTube",
    },
];
