//! Coordinator error types.

use thiserror::Error;

/// Errors surfaced to the caller that triggered an operation.
///
/// Collaborator failures (remote end/reject requests, notification
/// delivery) are contained inside the coordinator and never escalate;
/// only an unsupported environment rejects the action outright.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("calls are not supported in this environment")]
    Unsupported,
}
