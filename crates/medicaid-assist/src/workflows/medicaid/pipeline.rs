use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::Member;
use super::state::{AgentKind, AuditEntry, EntryStatus, WorkflowState};
use super::steps::{standard_steps, StepContext, StepError, WorkflowStep};

const DEFAULT_RENEWAL_WINDOW_DAYS: u32 = 60;

/// What the driver does after a step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and keep running later steps against the pre-failure state.
    #[default]
    Continue,
    /// Record the failure and stop the run.
    Halt,
}

impl FailurePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Halt => "halt",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown failure policy '{0}'")]
pub struct UnknownFailurePolicy(pub String);

impl FromStr for FailurePolicy {
    type Err = UnknownFailurePolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "halt" | "stop" => Ok(Self::Halt),
            _ => Err(UnknownFailurePolicy(value.to_string())),
        }
    }
}

/// Knobs shared by every run of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub failure_policy: FailurePolicy,
    /// Days ahead of the run date within which a renewal counts as due soon.
    pub renewal_window_days: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            renewal_window_days: DEFAULT_RENEWAL_WINDOW_DAYS,
        }
    }
}

/// A step that failed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub agent: AgentKind,
    pub message: String,
}

/// Overall result of a run, so callers need not scan the audit log for errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Degraded { failed: Vec<AgentKind> },
    Halted { at: AgentKind },
}

impl RunOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Degraded { .. } => "degraded",
            Self::Halted { .. } => "halted",
        }
    }
}

/// Final state of a run together with what went wrong along the way.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRun {
    pub state: WorkflowState,
    pub outcome: RunOutcome,
    pub failures: Vec<StepFailure>,
    pub started_at: DateTime<Utc>,
}

impl WorkflowRun {
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

/// Fixed-order driver folding the member state through the workflow steps.
pub struct MedicaidWorkflow {
    steps: Vec<Box<dyn WorkflowStep>>,
    config: WorkflowConfig,
}

impl MedicaidWorkflow {
    /// Eligibility, documents, work, reminders, language, compliance.
    pub fn standard(config: WorkflowConfig) -> Self {
        Self::with_steps(standard_steps(), config)
    }

    pub fn with_steps(steps: Vec<Box<dyn WorkflowStep>>, config: WorkflowConfig) -> Self {
        Self { steps, config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn step_agents(&self) -> Vec<AgentKind> {
        self.steps.iter().map(|step| step.agent()).collect()
    }

    /// Run every step against a fresh state for `member`.
    pub fn run(&self, member: Arc<Member>, now: DateTime<Utc>) -> WorkflowRun {
        let ctx = StepContext {
            now,
            config: &self.config,
        };
        let mut state = WorkflowState::new(member);
        let mut failures = Vec::new();
        let mut halted_at = None;

        info!(member_id = %state.member_id(), "starting member workflow");

        for step in &self.steps {
            let agent = step.agent();
            if !step.applies(&state) {
                debug!(member_id = %state.member_id(), step = agent.as_str(), "step skipped");
                continue;
            }

            match step.run(&state, &ctx) {
                Ok(next) => {
                    state = next;
                    info!(member_id = %state.member_id(), step = agent.as_str(), "step completed");
                }
                Err(error) => {
                    warn!(
                        member_id = %state.member_id(),
                        step = agent.as_str(),
                        %error,
                        "step failed"
                    );
                    record_failure(&mut state, step.as_ref(), &error, now);
                    failures.push(StepFailure {
                        agent,
                        message: error.to_string(),
                    });

                    if self.config.failure_policy == FailurePolicy::Halt {
                        halted_at = Some(agent);
                        break;
                    }
                }
            }
        }

        let outcome = match halted_at {
            Some(at) => RunOutcome::Halted { at },
            None if failures.is_empty() => RunOutcome::Completed,
            None => RunOutcome::Degraded {
                failed: failures.iter().map(|failure| failure.agent).collect(),
            },
        };

        info!(
            member_id = %state.member_id(),
            outcome = outcome.label(),
            audit_entries = state.audit_log().len(),
            "member workflow finished"
        );

        WorkflowRun {
            state,
            outcome,
            failures,
            started_at: now,
        }
    }
}

fn record_failure(
    state: &mut WorkflowState,
    step: &dyn WorkflowStep,
    error: &StepError,
    now: DateTime<Utc>,
) {
    let entry = AuditEntry::new(
        step.agent(),
        step.action(),
        state.member_id().clone(),
        EntryStatus::Error,
        now,
    )
    .with_extra("error", error.to_string());
    state.record_audit(entry);
}
