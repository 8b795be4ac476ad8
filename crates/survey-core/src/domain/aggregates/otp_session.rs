//! OTP Session Aggregate
//!
//! Mobile-number ownership proof as an explicit state machine. One session
//! exists per draft; every transition is driven by the workflow service and
//! guarded against responses from superseded issuances.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::{ContactNumber, OtpSessionId};

/// Verification session states
///
/// ```text
/// Idle ──issue──> Issued ──verified──> Verified
///   ^               │  │
///   │           resend  └──denied──> Failed
///   └── contact number edit (from any state)
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OtpSession {
    /// No code has been issued
    #[default]
    Idle,
    /// A code is out for the number; responses correlate by session id
    Issued {
        contact_number: ContactNumber,
        session_id: OtpSessionId,
        resend_available_at: DateTime<Utc>,
    },
    /// Ownership proven for exactly this number
    Verified { contact_number: ContactNumber },
    /// The collaborator refused the session; terminal until a fresh issuance
    Failed {
        contact_number: ContactNumber,
        attempts_exhausted: bool,
    },
}

impl OtpSession {
    // ===== Queries =====

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued { .. })
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// True only when ownership was proven for this exact number
    pub fn is_verified_for(&self, number: &ContactNumber) -> bool {
        matches!(self, Self::Verified { contact_number } if contact_number == number)
    }

    pub fn attempts_exhausted(&self) -> bool {
        matches!(
            self,
            Self::Failed {
                attempts_exhausted: true,
                ..
            }
        )
    }

    /// Number the current state is bound to, if any
    pub fn contact_number(&self) -> Option<&ContactNumber> {
        match self {
            Self::Idle => None,
            Self::Issued { contact_number, .. }
            | Self::Verified { contact_number }
            | Self::Failed { contact_number, .. } => Some(contact_number),
        }
    }

    /// Correlation id of the outstanding issuance, if any
    pub fn session_id(&self) -> Option<&OtpSessionId> {
        match self {
            Self::Issued { session_id, .. } => Some(session_id),
            _ => None,
        }
    }

    pub fn resend_available_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Issued {
                resend_available_at,
                ..
            } => Some(*resend_available_at),
            _ => None,
        }
    }

    /// Whether a resend may be requested at the sampled instant
    pub fn can_resend(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Issued {
                resend_available_at,
                ..
            } => now >= *resend_available_at,
            _ => false,
        }
    }

    /// Remaining resend cooldown at the sampled instant; `None` once elapsed
    /// or when no code is outstanding. The countdown shown to respondents is
    /// derived from this, never stored.
    pub fn resend_wait(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self {
            Self::Issued {
                resend_available_at,
                ..
            } if now < *resend_available_at => Some(*resend_available_at - now),
            _ => None,
        }
    }

    // ===== Transitions =====

    /// An edit of the contact number invalidates whatever state the session
    /// was in, including `Verified`. Edits back to the same value count.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// A fresh issuance supersedes any previous state
    pub fn apply_issuance(
        &mut self,
        contact_number: ContactNumber,
        session_id: OtpSessionId,
        resend_available_at: DateTime<Utc>,
    ) {
        *self = Self::Issued {
            contact_number,
            session_id,
            resend_available_at,
        };
    }

    /// Apply a verification outcome. Returns `false` when the response is
    /// stale (no outstanding issuance, or a superseded session id) and was
    /// discarded without touching the state.
    pub fn apply_verification(&mut self, session_id: &OtpSessionId, verified: bool) -> bool {
        match self {
            Self::Issued {
                contact_number,
                session_id: current,
                ..
            } if current == session_id => {
                if verified {
                    *self = Self::Verified {
                        contact_number: contact_number.clone(),
                    };
                }
                // A wrong code leaves the session Issued: the respondent may
                // retry or wait out the resend window.
                true
            }
            _ => false,
        }
    }

    /// Apply a collaborator denial (lockout or expired session). Returns
    /// `false` when the response is stale and was discarded.
    pub fn apply_denial(&mut self, session_id: &OtpSessionId) -> bool {
        match self {
            Self::Issued {
                contact_number,
                session_id: current,
                ..
            } if current == session_id => {
                *self = Self::Failed {
                    contact_number: contact_number.clone(),
                    attempts_exhausted: true,
                };
                true
            }
            _ => false,
        }
    }
}
