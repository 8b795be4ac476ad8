//! Domain services module

use crate::domain::aggregates::{FeedbackKind, SurveyDraft};
use crate::domain::value_objects::{ContactNumber, EmailAddress, Field, FieldErrors};

/// Survey validation domain service
///
/// Pure rule pass over a draft. Every violated rule is reported in one map;
/// callers must never see a first-error-only view.
pub struct SurveyValidator;

impl SurveyValidator {
    /// Validate a draft and report all violated rules
    pub fn validate(draft: &SurveyDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if draft.consumer_name().trim().is_empty() {
            errors.insert(Field::ConsumerName, "Name is required");
        }

        let number = draft.contact_number().trim();
        if number.is_empty() {
            errors.insert(Field::ContactNumber, "Mobile number is required");
        } else if ContactNumber::new(number).is_err() {
            errors.insert(Field::ContactNumber, "Invalid mobile number");
        }

        let email = draft.email().trim();
        if email.is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if EmailAddress::new(email).is_err() {
            errors.insert(Field::Email, "Invalid email");
        }

        match draft.feedback_kind() {
            FeedbackKind::Unset => {
                errors.insert(Field::FeedbackKind, "Select a feedback type");
            }
            FeedbackKind::Purchase => {
                if is_blank(draft.interested_model()) {
                    errors.insert(Field::InterestedModel, "Model is required");
                }
            }
            FeedbackKind::General => {
                if is_blank(draft.freeform_feedback()) {
                    errors.insert(Field::FreeformFeedback, "Feedback is required");
                }
            }
        }

        errors
    }

    /// Whether a draft would pass validation as-is
    pub fn is_submittable(draft: &SurveyDraft) -> bool {
        Self::validate(draft).is_empty()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).unwrap_or("").is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_purchase_draft() -> SurveyDraft {
        let mut draft = SurveyDraft::new();
        draft.set_consumer_name("Jordan Lee");
        draft.set_contact_number("9876543210");
        draft.set_email("jordan@example.com");
        draft.choose_feedback_kind(FeedbackKind::Purchase);
        draft.set_interested_model("Model X3").unwrap();
        draft
    }

    #[test]
    fn test_empty_draft_reports_every_missing_field() {
        let errors = SurveyValidator::validate(&SurveyDraft::new());

        assert_eq!(errors.get(Field::ConsumerName), Some("Name is required"));
        assert_eq!(errors.get(Field::ContactNumber), Some("Mobile number is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::FeedbackKind), Some("Select a feedback type"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_all_rules_reported_in_one_pass() {
        let mut draft = SurveyDraft::new();
        draft.set_contact_number("12345");
        draft.set_email("not-an-email");

        let errors = SurveyValidator::validate(&draft);

        assert_eq!(errors.get(Field::ConsumerName), Some("Name is required"));
        assert_eq!(errors.get(Field::ContactNumber), Some("Invalid mobile number"));
        assert_eq!(errors.get(Field::Email), Some("Invalid email"));
        assert_eq!(errors.get(Field::FeedbackKind), Some("Select a feedback type"));
    }

    #[test]
    fn test_unset_kind_always_rejected() {
        let mut draft = SurveyDraft::new();
        draft.set_consumer_name("Jordan Lee");
        draft.set_contact_number("9876543210");
        draft.set_email("jordan@example.com");

        let errors = SurveyValidator::validate(&draft);
        assert_eq!(errors.get(Field::FeedbackKind), Some("Select a feedback type"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_purchase_requires_model() {
        let mut draft = create_valid_purchase_draft();
        draft.set_interested_model("").unwrap();

        let errors = SurveyValidator::validate(&draft);
        assert_eq!(errors.get(Field::InterestedModel), Some("Model is required"));
        assert!(!errors.contains(Field::FreeformFeedback));
    }

    #[test]
    fn test_general_requires_freeform_feedback() {
        let mut draft = create_valid_purchase_draft();
        draft.choose_feedback_kind(FeedbackKind::General);

        let errors = SurveyValidator::validate(&draft);
        assert_eq!(errors.get(Field::FreeformFeedback), Some("Feedback is required"));
        assert!(!errors.contains(Field::InterestedModel));
    }

    #[test]
    fn test_valid_purchase_draft_passes() {
        let draft = create_valid_purchase_draft();
        assert!(SurveyValidator::validate(&draft).is_empty());
        assert!(SurveyValidator::is_submittable(&draft));
    }

    #[test]
    fn test_valid_general_draft_passes() {
        let mut draft = create_valid_purchase_draft();
        draft.choose_feedback_kind(FeedbackKind::General);
        draft.set_freeform_feedback("Smooth delivery, great service").unwrap();

        assert!(SurveyValidator::validate(&draft).is_empty());
    }

    #[test]
    fn test_source_platform_is_never_required() {
        let draft = create_valid_purchase_draft();
        assert!(draft.source_platform().is_none());
        assert!(SurveyValidator::validate(&draft).is_empty());
    }
}
