//! Member workflow: domain records, the per-run state, the six steps, and the driver that
//! folds a member through them.

pub mod domain;
pub mod pipeline;
pub mod report;
pub mod repository;
pub mod router;
pub mod sample;
pub mod service;
pub mod state;
pub mod steps;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactChannel, ContactPreferences, DocumentRecord, EligibilityInfo, EligibilityStatus,
    Member, MemberId, WorkRequirement, WORK_HOURS_THRESHOLD,
};
pub use pipeline::{
    FailurePolicy, MedicaidWorkflow, RunOutcome, StepFailure, WorkflowConfig, WorkflowRun,
};
pub use report::{MemberListing, WorkflowSummary};
pub use repository::{InMemoryMemberRepository, MemberRepository, RepositoryError};
pub use router::member_router;
pub use sample::{sample_members, SampleScenario};
pub use service::{MemberWorkflowService, WorkflowServiceError};
pub use state::{
    AgentKind, AuditEntry, ComplianceIssue, ComplianceStatus, EntryStatus, InteractionRecord,
    WorkflowState,
};
pub use steps::{StepContext, StepError, WorkflowStep};
