use medicaid_assist::config::AppConfig;
use medicaid_assist::workflows::medicaid::{
    EligibilityStatus, FailurePolicy, InMemoryMemberRepository, MemberWorkflowService,
    WorkflowConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SeededService = MemberWorkflowService<InMemoryMemberRepository>;

/// Workflow settings from the loaded config, with the CLI halt flag applied on top.
pub(crate) fn workflow_config(config: &AppConfig, halt_on_error: bool) -> WorkflowConfig {
    let mut workflow = config.workflow.clone();
    if halt_on_error {
        workflow.failure_policy = FailurePolicy::Halt;
    }
    workflow
}

pub(crate) fn seeded_service(workflow: WorkflowConfig) -> Arc<SeededService> {
    let repository = Arc::new(InMemoryMemberRepository::seeded());
    Arc::new(MemberWorkflowService::new(repository, workflow))
}

pub(crate) fn parse_status(raw: &str) -> Result<EligibilityStatus, String> {
    raw.parse::<EligibilityStatus>()
        .map_err(|err| err.to_string())
}
