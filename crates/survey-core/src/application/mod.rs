//! Application layer
//!
//! Orchestrates the respondent workflow and coordinates domain objects.

pub mod dto;
pub mod flow;

pub use dto::*;
pub use flow::{OtpPolicy, SurveyFlowService};
