use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{EligibilityStatus, MemberId};
use super::pipeline::WorkflowRun;
use super::report::{MemberListing, WorkflowSummary};
use super::repository::MemberRepository;
use super::service::{MemberWorkflowService, WorkflowServiceError};

/// Router builder exposing member lookup and workflow execution endpoints.
pub fn member_router<R>(service: Arc<MemberWorkflowService<R>>) -> Router
where
    R: MemberRepository + 'static,
{
    Router::new()
        .route("/api/v1/members", get(list_handler::<R>))
        .route("/api/v1/members/:member_id", get(member_handler::<R>))
        .route(
            "/api/v1/members/:member_id/workflow",
            post(workflow_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkflowResponse {
    summary: WorkflowSummary,
    run: WorkflowRun,
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<MemberWorkflowService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: MemberRepository + 'static,
{
    let status = match query.status.as_deref().map(str::parse::<EligibilityStatus>) {
        Some(Ok(status)) => Some(status),
        Some(Err(error)) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
        None => None,
    };

    match service.members(status) {
        Ok(members) => {
            let listings: Vec<MemberListing> = members.iter().map(MemberListing::from).collect();
            (StatusCode::OK, axum::Json(listings)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn member_handler<R>(
    State(service): State<Arc<MemberWorkflowService<R>>>,
    Path(member_id): Path<String>,
) -> Response
where
    R: MemberRepository + 'static,
{
    match service.member(&MemberId(member_id)) {
        Ok(member) => (StatusCode::OK, axum::Json(member)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn workflow_handler<R>(
    State(service): State<Arc<MemberWorkflowService<R>>>,
    Path(member_id): Path<String>,
) -> Response
where
    R: MemberRepository + 'static,
{
    match service.process(&MemberId(member_id)) {
        Ok(run) => {
            let response = WorkflowResponse {
                summary: WorkflowSummary::from_run(&run),
                run,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: WorkflowServiceError) -> Response {
    let status = match error {
        WorkflowServiceError::MemberNotFound(_) => StatusCode::NOT_FOUND,
        WorkflowServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
