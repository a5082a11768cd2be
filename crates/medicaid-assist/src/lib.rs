//! Rule-based Medicaid member workflow.
//!
//! A member record is routed through six fixed steps (eligibility, documents, work
//! requirements, reminders, language support, compliance audit) that accumulate an
//! interaction log and an audit trail on a per-run [`workflows::medicaid::WorkflowState`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
