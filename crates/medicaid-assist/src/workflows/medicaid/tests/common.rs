use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::medicaid::domain::{
    ContactChannel, ContactPreferences, DocumentRecord, EligibilityInfo, EligibilityStatus,
    Member, MemberId, WorkRequirement,
};
use crate::workflows::medicaid::pipeline::{MedicaidWorkflow, WorkflowConfig, WorkflowRun};
use crate::workflows::medicaid::repository::{MemberRepository, RepositoryError};
use crate::workflows::medicaid::state::{AgentKind, WorkflowState};
use crate::workflows::medicaid::steps::{StepContext, StepError, WorkflowStep};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn config() -> WorkflowConfig {
    WorkflowConfig::default()
}

pub(super) fn member() -> Member {
    Member {
        id: MemberId::new("m-100"),
        first_name: "Jennifer".to_string(),
        last_name: "Smith".to_string(),
        eligibility: EligibilityInfo {
            program: "Medicaid".to_string(),
            status: EligibilityStatus::Active,
            renewal_date: "2024-12-01".to_string(),
            required_documents: Vec::new(),
        },
        work_requirement: WorkRequirement::not_required(),
        contact: ContactPreferences {
            preferred_language: "English".to_string(),
            preferred_contact_method: ContactChannel::Email,
        },
        documents: BTreeMap::new(),
    }
}

pub(super) fn document_on_file() -> DocumentRecord {
    DocumentRecord {
        submitted_on: NaiveDate::from_ymd_opt(2023, 12, 4).expect("valid date"),
        verified: true,
    }
}

pub(super) fn member_with_documents(required: &[&str], on_file: &[&str]) -> Member {
    let mut member = member();
    member.eligibility.required_documents = required.iter().map(|kind| kind.to_string()).collect();
    member.documents = on_file
        .iter()
        .map(|kind| (kind.to_string(), document_on_file()))
        .collect();
    member
}

pub(super) fn member_with_hours(hours_reported: u32) -> Member {
    let mut member = member();
    member.work_requirement = WorkRequirement::required_with_hours(hours_reported);
    member
}

pub(super) fn state_for(member: Member) -> WorkflowState {
    WorkflowState::new(Arc::new(member))
}

pub(super) fn run_step(step: &dyn WorkflowStep, state: &WorkflowState) -> WorkflowState {
    let config = config();
    let ctx = StepContext {
        now: now(),
        config: &config,
    };
    step.run(state, &ctx).expect("step succeeds")
}

pub(super) fn run_standard(member: Member) -> WorkflowRun {
    MedicaidWorkflow::standard(config()).run(Arc::new(member), now())
}

/// Step that always fails, used to exercise the driver's failure handling.
pub(super) struct FailingStep {
    pub(super) agent: AgentKind,
}

impl WorkflowStep for FailingStep {
    fn agent(&self) -> AgentKind {
        self.agent
    }

    fn action(&self) -> &'static str {
        "simulated_failure"
    }

    fn run(
        &self,
        _state: &WorkflowState,
        _ctx: &StepContext<'_>,
    ) -> Result<WorkflowState, StepError> {
        Err(StepError::Unavailable("verification backend offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) members: Arc<Mutex<BTreeMap<MemberId, Member>>>,
}

impl MemoryRepository {
    pub(super) fn with(members: Vec<Member>) -> Self {
        let repository = Self::default();
        for member in members {
            repository.upsert(member).expect("upsert succeeds");
        }
        repository
    }
}

impl MemberRepository for MemoryRepository {
    fn get(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let guard = self.members.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        let guard = self.members.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn list_by_status(&self, status: EligibilityStatus) -> Result<Vec<Member>, RepositoryError> {
        let guard = self.members.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|member| member.eligibility.status == status)
            .cloned()
            .collect())
    }

    fn upsert(&self, member: Member) -> Result<(), RepositoryError> {
        let mut guard = self.members.lock().expect("repository mutex poisoned");
        guard.insert(member.id.clone(), member);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl MemberRepository for UnavailableRepository {
    fn get(&self, _id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_status(&self, _status: EligibilityStatus) -> Result<Vec<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _member: Member) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
