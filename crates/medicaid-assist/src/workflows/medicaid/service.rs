use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{EligibilityStatus, Member, MemberId};
use super::pipeline::{MedicaidWorkflow, WorkflowConfig, WorkflowRun};
use super::repository::{MemberRepository, RepositoryError};

/// Service composing the member repository with the workflow driver.
pub struct MemberWorkflowService<R> {
    repository: Arc<R>,
    workflow: Arc<MedicaidWorkflow>,
}

impl<R> MemberWorkflowService<R>
where
    R: MemberRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: WorkflowConfig) -> Self {
        Self::with_workflow(repository, MedicaidWorkflow::standard(config))
    }

    pub fn with_workflow(repository: Arc<R>, workflow: MedicaidWorkflow) -> Self {
        Self {
            repository,
            workflow: Arc::new(workflow),
        }
    }

    pub fn workflow(&self) -> &MedicaidWorkflow {
        &self.workflow
    }

    /// Run the workflow for a stored member, stamping entries with the current time.
    pub fn process(&self, member_id: &MemberId) -> Result<WorkflowRun, WorkflowServiceError> {
        self.process_at(member_id, Utc::now())
    }

    pub fn process_at(
        &self,
        member_id: &MemberId,
        now: DateTime<Utc>,
    ) -> Result<WorkflowRun, WorkflowServiceError> {
        let member = self.member(member_id)?;
        Ok(self.workflow.run(Arc::new(member), now))
    }

    pub fn member(&self, member_id: &MemberId) -> Result<Member, WorkflowServiceError> {
        self.repository
            .get(member_id)?
            .ok_or_else(|| WorkflowServiceError::MemberNotFound(member_id.clone()))
    }

    /// All members, or only those with the given eligibility status.
    pub fn members(
        &self,
        status: Option<EligibilityStatus>,
    ) -> Result<Vec<Member>, WorkflowServiceError> {
        let members = match status {
            Some(status) => self.repository.list_by_status(status)?,
            None => self.repository.list()?,
        };
        Ok(members)
    }
}

/// Error raised by the workflow service.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowServiceError {
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
