use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::domain::{Member, MemberId};

/// The six workflow agents, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    EligibilityChecker,
    DocumentAssistant,
    WorkRequirement,
    Reminder,
    MultilingualChat,
    AuditCompliance,
}

impl AgentKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::EligibilityChecker,
            Self::DocumentAssistant,
            Self::WorkRequirement,
            Self::Reminder,
            Self::MultilingualChat,
            Self::AuditCompliance,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EligibilityChecker => "eligibility_checker",
            Self::DocumentAssistant => "document_assistant",
            Self::WorkRequirement => "work_requirement",
            Self::Reminder => "reminder",
            Self::MultilingualChat => "multilingual_chat",
            Self::AuditCompliance => "audit_compliance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EligibilityChecker => "Eligibility Check",
            Self::DocumentAssistant => "Document Check",
            Self::WorkRequirement => "Work Requirement Check",
            Self::Reminder => "Reminder Generation",
            Self::MultilingualChat => "Multilingual Support",
            Self::AuditCompliance => "Compliance Audit",
        }
    }
}

/// Result recorded on interactions and status recorded on audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Completed,
    Pending,
    Incomplete,
    Compliant,
    NonCompliant,
    Sent,
    Translated,
    Error,
}

impl EntryStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Incomplete => "incomplete",
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::Sent => "sent",
            Self::Translated => "translated",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

impl ComplianceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
        }
    }

    pub const fn entry_status(self) -> EntryStatus {
        match self {
            Self::Compliant => EntryStatus::Compliant,
            Self::NonCompliant => EntryStatus::NonCompliant,
        }
    }
}

/// Findings raised by the terminal compliance audit, in derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceIssue {
    #[serde(rename = "Work requirements not met")]
    WorkRequirementsNotMet,
    #[serde(rename = "Missing required documents")]
    MissingRequiredDocuments,
    #[serde(rename = "Inactive eligibility status")]
    InactiveEligibility,
}

impl ComplianceIssue {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkRequirementsNotMet => "Work requirements not met",
            Self::MissingRequiredDocuments => "Missing required documents",
            Self::InactiveEligibility => "Inactive eligibility status",
        }
    }
}

/// Member-facing event emitted by a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    pub agent: AgentKind,
    pub action: &'static str,
    pub result: EntryStatus,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl InteractionRecord {
    pub fn new(
        agent: AgentKind,
        action: &'static str,
        result: EntryStatus,
        timestamp: DateTime<Utc>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            action,
            result,
            timestamp,
            details: details.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Compliance trail record emitted by a step (or by the driver when a step fails).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub agent: AgentKind,
    pub action: &'static str,
    pub member_id: MemberId,
    pub status: EntryStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl AuditEntry {
    pub fn new(
        agent: AgentKind,
        action: &'static str,
        member_id: MemberId,
        status: EntryStatus,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            agent,
            action,
            member_id,
            status,
            timestamp,
            extras: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extras.insert(key.to_string(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }
}

/// Accumulator threaded through one pipeline run.
///
/// Derived fields are public; the two logs are append-only and can only be extended
/// through [`WorkflowState::record_interaction`] and [`WorkflowState::record_audit`].
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub member: Arc<Member>,
    pub eligibility_verified: bool,
    pub documents_required: Vec<String>,
    pub documents_submitted: Vec<String>,
    pub work_requirements_needed: bool,
    pub work_requirements_met: bool,
    pub work_hours_reported: u32,
    pub reminders: Vec<String>,
    pub reminders_sent: bool,
    pub multilingual_supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<ComplianceStatus>,
    pub compliance_issues: Vec<ComplianceIssue>,
    interactions: Vec<InteractionRecord>,
    audit_log: Vec<AuditEntry>,
}

impl WorkflowState {
    pub fn new(member: Arc<Member>) -> Self {
        Self {
            member,
            eligibility_verified: false,
            documents_required: Vec::new(),
            documents_submitted: Vec::new(),
            work_requirements_needed: false,
            work_requirements_met: false,
            work_hours_reported: 0,
            reminders: Vec::new(),
            reminders_sent: false,
            multilingual_supported: false,
            compliance_status: None,
            compliance_issues: Vec::new(),
            interactions: Vec::new(),
            audit_log: Vec::new(),
        }
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member.id
    }

    pub fn interactions(&self) -> &[InteractionRecord] {
        &self.interactions
    }

    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit_log
    }

    pub fn record_interaction(&mut self, interaction: InteractionRecord) {
        self.interactions.push(interaction);
    }

    pub fn record_audit(&mut self, entry: AuditEntry) {
        self.audit_log.push(entry);
    }

    pub fn interactions_by(&self, agent: AgentKind) -> impl Iterator<Item = &InteractionRecord> {
        self.interactions
            .iter()
            .filter(move |interaction| interaction.agent == agent)
    }

    pub fn audit_entries_by(&self, agent: AgentKind) -> impl Iterator<Item = &AuditEntry> {
        self.audit_log
            .iter()
            .filter(move |entry| entry.agent == agent)
    }

    /// Required documents not yet on file, in required order.
    pub fn missing_documents(&self) -> Vec<&str> {
        self.documents_required
            .iter()
            .filter(|kind| !self.documents_submitted.contains(kind))
            .map(String::as_str)
            .collect()
    }

    pub fn has_missing_documents(&self) -> bool {
        self.documents_submitted.len() < self.documents_required.len()
    }

    /// Number of distinct agents that wrote to the audit log so far.
    pub fn agents_executed(&self) -> usize {
        AgentKind::ordered()
            .into_iter()
            .filter(|agent| self.audit_entries_by(*agent).next().is_some())
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.audit_log
            .iter()
            .any(|entry| entry.status == EntryStatus::Error)
    }
}
