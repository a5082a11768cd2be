use serde_json::{json, Value};

use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::domain::EligibilityStatus;
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, ComplianceIssue, ComplianceStatus, InteractionRecord, WorkflowState,
};

/// Terminal step producing the externally reported compliance status.
pub struct ComplianceAudit;

/// Re-derives compliance issues from the member plus the document and work results.
///
/// Pure: the same state always yields the same list. A required work check that never
/// recorded a result counts as not met.
pub fn derive_compliance_issues(state: &WorkflowState) -> Vec<ComplianceIssue> {
    let member = &state.member;
    let mut issues = Vec::new();

    if member.work_requirement.required && !state.work_requirements_met {
        issues.push(ComplianceIssue::WorkRequirementsNotMet);
    }

    if state.has_missing_documents() {
        issues.push(ComplianceIssue::MissingRequiredDocuments);
    }

    if member.eligibility.status == EligibilityStatus::Inactive {
        issues.push(ComplianceIssue::InactiveEligibility);
    }

    issues
}

impl WorkflowStep for ComplianceAudit {
    fn agent(&self) -> AgentKind {
        AgentKind::AuditCompliance
    }

    fn action(&self) -> &'static str {
        "compliance_verification"
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        let issues = derive_compliance_issues(state);
        let status = if issues.is_empty() {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        };

        let mut next = state.clone();
        next.compliance_status = Some(status);
        next.compliance_issues = issues;

        let details = if next.compliance_issues.is_empty() {
            "No compliance issues".to_string()
        } else {
            next.compliance_issues
                .iter()
                .map(|issue| issue.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let issue_labels: Vec<Value> = next
            .compliance_issues
            .iter()
            .map(|issue| Value::from(issue.label()))
            .collect();

        next.record_interaction(InteractionRecord::new(
            self.agent(),
            "verify_compliance",
            status.entry_status(),
            ctx.now,
            details,
        ));

        // Counts cover this step's own interaction and audit entry.
        let summary = json!({
            "agents_executed": next.agents_executed() + 1,
            "total_interactions": next.interactions().len(),
            "audit_trail_entries": next.audit_log().len() + 1,
        });
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                state.member_id().clone(),
                status.entry_status(),
                ctx.now,
            )
            .with_extra("issues", issue_labels)
            .with_extra("summary", summary),
        );

        Ok(next)
    }
}
