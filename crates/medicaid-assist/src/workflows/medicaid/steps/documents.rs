use serde_json::Value;

use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, EntryStatus, InteractionRecord, WorkflowState,
};

/// Matches required document kinds against the documents the member has on file.
pub struct DocumentCheck;

impl WorkflowStep for DocumentCheck {
    fn agent(&self) -> AgentKind {
        AgentKind::DocumentAssistant
    }

    fn action(&self) -> &'static str {
        "document_validation"
    }

    fn applies(&self, state: &WorkflowState) -> bool {
        !state.documents_required.is_empty()
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        if let Some(index) = state
            .documents_required
            .iter()
            .position(|kind| kind.trim().is_empty())
        {
            return Err(StepError::BlankDocumentKind { index });
        }

        let mut next = state.clone();
        next.documents_submitted = state
            .documents_required
            .iter()
            .filter(|kind| state.member.has_document(kind))
            .cloned()
            .collect();

        let submitted = next.documents_submitted.len();
        let required = next.documents_required.len();
        let all_present = submitted == required;
        let missing: Vec<Value> = next
            .missing_documents()
            .into_iter()
            .map(Value::from)
            .collect();

        next.record_interaction(InteractionRecord::new(
            self.agent(),
            "check_documents",
            if all_present {
                EntryStatus::Completed
            } else {
                EntryStatus::Pending
            },
            ctx.now,
            format!("Submitted: {submitted}/{required}"),
        ));
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                state.member_id().clone(),
                if all_present {
                    EntryStatus::Completed
                } else {
                    EntryStatus::Incomplete
                },
                ctx.now,
            )
            .with_extra("submitted", submitted)
            .with_extra("required", required)
            .with_extra("missing_documents", missing),
        );

        Ok(next)
    }
}
