use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, EntryStatus, InteractionRecord, WorkflowState,
};

/// Marks eligibility as verified and carries the member's required documents forward.
///
/// No regulatory rules are evaluated here; verification is a stub that always succeeds
/// for a well-formed member record.
pub struct EligibilityCheck;

impl WorkflowStep for EligibilityCheck {
    fn agent(&self) -> AgentKind {
        AgentKind::EligibilityChecker
    }

    fn action(&self) -> &'static str {
        "eligibility_verification"
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        let member = &state.member;
        if member.id.as_str().trim().is_empty() {
            return Err(StepError::InvalidMember {
                field: "id",
                reason: "is blank",
            });
        }

        let mut next = state.clone();
        next.eligibility_verified = true;
        if !member.eligibility.required_documents.is_empty() {
            next.documents_required = member.eligibility.required_documents.clone();
        }

        let due_soon =
            member.is_renewal_due_soon(ctx.now.date_naive(), ctx.config.renewal_window_days);
        let details = format!(
            "Status: {}, Renewal: {} ({})",
            member.eligibility.status,
            member.eligibility.renewal_date,
            if due_soon { "due soon" } else { "not due soon" }
        );

        next.record_interaction(InteractionRecord::new(
            self.agent(),
            "check_eligibility",
            EntryStatus::Completed,
            ctx.now,
            details,
        ));
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                member.id.clone(),
                EntryStatus::Completed,
                ctx.now,
            )
            .with_extra("eligibility_status", member.eligibility.status.as_str())
            .with_extra("renewal_due_soon", due_soon),
        );

        Ok(next)
    }
}
