use serde::Serialize;

use super::domain::{ContactChannel, EligibilityStatus, Member};
use super::pipeline::{StepFailure, WorkflowRun};
use super::state::ComplianceStatus;

/// Roster row used by the member listing endpoints and CLI.
#[derive(Debug, Clone, Serialize)]
pub struct MemberListing {
    pub member_id: String,
    pub name: String,
    pub status: EligibilityStatus,
    pub status_label: &'static str,
    pub renewal_date: String,
    pub required_documents: usize,
    pub work_required: bool,
    pub preferred_language: String,
    pub preferred_contact_method: ContactChannel,
}

impl From<&Member> for MemberListing {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id.to_string(),
            name: member.full_name(),
            status: member.eligibility.status,
            status_label: member.eligibility.status.label(),
            renewal_date: member.eligibility.renewal_date.clone(),
            required_documents: member.eligibility.required_documents.len(),
            work_required: member.work_requirement.required,
            preferred_language: member.contact.preferred_language.clone(),
            preferred_contact_method: member.contact.preferred_contact_method,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkSummary {
    pub hours_reported: u32,
    pub hours_needed: u32,
    pub met: bool,
    pub exemption_status: String,
}

/// Condensed view of a finished run for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub member_id: String,
    pub member_name: String,
    pub eligibility_status: EligibilityStatus,
    pub eligibility_verified: bool,
    pub documents_required: Vec<String>,
    pub missing_documents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<WorkSummary>,
    pub reminders: Vec<String>,
    pub preferred_language: String,
    pub multilingual_supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<ComplianceStatus>,
    pub compliance_issues: Vec<&'static str>,
    pub interactions: usize,
    pub audit_entries: usize,
    pub agents_executed: usize,
    pub outcome: &'static str,
    pub failures: Vec<StepFailure>,
}

impl WorkflowSummary {
    pub fn from_run(run: &WorkflowRun) -> Self {
        let state = &run.state;
        let member = &state.member;

        let work = member.work_requirement.required.then(|| WorkSummary {
            hours_reported: member.work_requirement.hours_reported,
            hours_needed: member.work_requirement.hours_needed,
            met: state.work_requirements_met,
            exemption_status: member.work_requirement.exemption_status.clone(),
        });

        Self {
            member_id: member.id.to_string(),
            member_name: member.full_name(),
            eligibility_status: member.eligibility.status,
            eligibility_verified: state.eligibility_verified,
            documents_required: state.documents_required.clone(),
            missing_documents: state
                .missing_documents()
                .into_iter()
                .map(str::to_string)
                .collect(),
            work,
            reminders: state.reminders.clone(),
            preferred_language: member.contact.preferred_language.clone(),
            multilingual_supported: state.multilingual_supported,
            compliance_status: state.compliance_status,
            compliance_issues: state
                .compliance_issues
                .iter()
                .map(|issue| issue.label())
                .collect(),
            interactions: state.interactions().len(),
            audit_entries: state.audit_log().len(),
            agents_executed: state.agents_executed(),
            outcome: run.outcome.label(),
            failures: run.failures.clone(),
        }
    }

    pub fn compliance_label(&self) -> &'static str {
        self.compliance_status
            .map(ComplianceStatus::as_str)
            .unwrap_or("unknown")
    }
}
