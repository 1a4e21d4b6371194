//! Activity submission and the faculty review workflow.

pub mod domain;
mod proof;
pub mod repository;
pub mod review;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ActivityId, ActivityListQuery, ActivityRecord, ActivityStatus, ActivitySubmission,
    ActivityType, ProofDocument,
};
pub use repository::{ActivityQuery, ActivityRepository};
pub use review::{
    ReviewDecision, ReviewError, ReviewRequest, ReviewWorkflow, UserRemovalPlan,
};
pub use router::activity_router;
pub use service::{ActivityService, ActivityServiceError};
