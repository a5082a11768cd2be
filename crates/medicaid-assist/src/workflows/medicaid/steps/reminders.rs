use super::{StepContext, StepError, WorkflowStep};
use crate::workflows::medicaid::domain::EligibilityStatus;
use crate::workflows::medicaid::state::{
    AgentKind, AuditEntry, EntryStatus, InteractionRecord, WorkflowState,
};

/// Builds member reminders from the eligibility, document, and work results so far.
pub struct ReminderGeneration;

/// Reminder texts for the current state, in a fixed order: renewal, documents, work hours,
/// inactive coverage.
pub fn build_reminders(state: &WorkflowState) -> Vec<String> {
    let member = &state.member;
    let mut reminders = Vec::new();

    if member.eligibility.status == EligibilityStatus::RenewalNeeded {
        reminders.push(format!(
            "Your Medicaid benefits expire on {}. Please renew soon.",
            member.eligibility.renewal_date
        ));
    }

    if state.has_missing_documents() {
        reminders.push(format!(
            "Please submit the following documents: {}",
            state.missing_documents().join(", ")
        ));
    }

    if member.work_requirement.required && !state.work_requirements_met {
        reminders.push(format!(
            "You need to report {} more work hours this month.",
            member.work_requirement.hours_remaining()
        ));
    }

    if member.eligibility.status == EligibilityStatus::Inactive {
        reminders.push(
            "Your Medicaid coverage is inactive. Please contact your caseworker to reinstate it."
                .to_string(),
        );
    }

    reminders
}

impl WorkflowStep for ReminderGeneration {
    fn agent(&self) -> AgentKind {
        AgentKind::Reminder
    }

    fn action(&self) -> &'static str {
        "notification_sent"
    }

    fn run(
        &self,
        state: &WorkflowState,
        ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        let mut next = state.clone();
        next.reminders = build_reminders(state);
        next.reminders_sent = !next.reminders.is_empty();

        // Nothing to send means nothing to log.
        if !next.reminders_sent {
            return Ok(next);
        }

        let contact = &state.member.contact;
        let channel = contact.preferred_contact_method.label();
        let count = next.reminders.len();

        next.record_interaction(InteractionRecord::new(
            self.agent(),
            "send_notifications",
            EntryStatus::Sent,
            ctx.now,
            format!("{count} reminders sent via {channel}"),
        ));
        next.record_audit(
            AuditEntry::new(
                self.agent(),
                self.action(),
                state.member_id().clone(),
                EntryStatus::Completed,
                ctx.now,
            )
            .with_extra("channel", channel)
            .with_extra("language", contact.preferred_language.as_str())
            .with_extra("count", count),
        );

        Ok(next)
    }
}
