//! Infrastructure Layer
//!
//! Adapters implementing the outbound ports. The in-memory set backs tests
//! and demos; deployments substitute adapters speaking to the real
//! verification and collection services.

pub mod memory;

pub use memory::{
    InMemorySubmissionGateway, InMemoryVerificationGateway, ManualClock, Notice,
    RecordingNavigator, RecordingNotificationSink, StaticModelCatalog, SystemClock,
};
