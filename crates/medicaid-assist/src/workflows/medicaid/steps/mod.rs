//! The six rule-based workflow steps.
//!
//! Each step reads the state produced by earlier steps and returns a new state with its own
//! derived fields set and its own log entries appended. Steps never touch entries written by
//! other steps; the log API on [`WorkflowState`] only allows appends.

mod compliance;
mod documents;
mod eligibility;
mod language;
mod reminders;
mod work;

pub use compliance::{derive_compliance_issues, ComplianceAudit};
pub use documents::DocumentCheck;
pub use eligibility::EligibilityCheck;
pub use language::MultilingualFlag;
pub use reminders::{build_reminders, ReminderGeneration};
pub use work::WorkRequirementCheck;

use chrono::{DateTime, Utc};

use super::pipeline::WorkflowConfig;
use super::state::{AgentKind, WorkflowState};

/// Run-wide inputs shared by every step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub now: DateTime<Utc>,
    pub config: &'a WorkflowConfig,
}

/// A single transformation in the member workflow.
pub trait WorkflowStep: Send + Sync {
    fn agent(&self) -> AgentKind;

    /// Audit action this step records; also used for the error entry when it fails.
    fn action(&self) -> &'static str;

    /// Conditional steps return `false` to be skipped without writing any log entries.
    fn applies(&self, _state: &WorkflowState) -> bool {
        true
    }

    fn run(&self, state: &WorkflowState, ctx: &StepContext<'_>)
        -> Result<WorkflowState, StepError>;
}

/// Failure raised inside a step. The driver turns it into an `error` audit entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("member record invalid: {field} {reason}")]
    InvalidMember {
        field: &'static str,
        reason: &'static str,
    },
    #[error("required document at position {index} has a blank identifier")]
    BlankDocumentKind { index: usize },
    #[error("{0}")]
    Unavailable(String),
}

/// The standard step sequence, in execution order.
pub fn standard_steps() -> Vec<Box<dyn WorkflowStep>> {
    vec![
        Box::new(EligibilityCheck),
        Box::new(DocumentCheck),
        Box::new(WorkRequirementCheck),
        Box::new(ReminderGeneration),
        Box::new(MultilingualFlag),
        Box::new(ComplianceAudit),
    ]
}
