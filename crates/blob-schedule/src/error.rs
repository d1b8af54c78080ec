use blob_core::AgentId;
use thiserror::Error;

/// Failures while executing one action.  The dispatcher logs them and drops
/// the event; they never abort a tick.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action target {0} does not exist")]
    AgentNotFound(AgentId),
}

pub type ActionResult<T> = Result<T, ActionError>;
