use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, EntryStatus, InteractionRecord, WorkflowState,
};

/// Flags members whose preferred language is not English. Translation itself is simulated.
pub struct MultilingualFlag;

impl WorkflowStep for MultilingualFlag {
    fn agent(&self) -> AgentKind {
        AgentKind::MultilingualChat
    }

    fn action(&self) -> &'static str {
        "translation"
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        let contact = &state.member.contact;
        let mut next = state.clone();
        next.multilingual_supported = contact.needs_translation();

        if !next.multilingual_supported {
            return Ok(next);
        }

        let language = contact.preferred_language.as_str();
        next.record_interaction(
            InteractionRecord::new(
                self.agent(),
                "translate_communications",
                EntryStatus::Translated,
                ctx.now,
                format!("Content translated to {language}"),
            )
            .with_language(language),
        );
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                state.member_id().clone(),
                EntryStatus::Completed,
                ctx.now,
            )
            .with_extra("language", language),
        );

        Ok(next)
    }
}
