use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::domain::WORK_HOURS_THRESHOLD;
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, EntryStatus, InteractionRecord, WorkflowState,
};

/// Compares reported monthly hours to the fixed 80-hour threshold.
pub struct WorkRequirementCheck;

impl WorkflowStep for WorkRequirementCheck {
    fn agent(&self) -> AgentKind {
        AgentKind::WorkRequirement
    }

    fn action(&self) -> &'static str {
        "work_verification"
    }

    fn applies(&self, state: &WorkflowState) -> bool {
        state.member.work_requirement.required
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        let requirement = &state.member.work_requirement;
        let hours = requirement.hours_reported;
        let met = hours >= WORK_HOURS_THRESHOLD;
        let status = if met {
            EntryStatus::Compliant
        } else {
            EntryStatus::NonCompliant
        };

        let mut next = state.clone();
        next.work_requirements_met = met;
        next.work_requirements_needed = !met;
        next.work_hours_reported = hours;

        next.record_interaction(InteractionRecord::new(
            self.agent(),
            "verify_hours",
            status,
            ctx.now,
            format!("Hours: {hours}/{WORK_HOURS_THRESHOLD}"),
        ));
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                state.member_id().clone(),
                status,
                ctx.now,
            )
            .with_extra("hours", hours)
            .with_extra("hours_needed", requirement.hours_needed)
            .with_extra("exemption_status", requirement.exemption_status.as_str()),
        );

        Ok(next)
    }
}
