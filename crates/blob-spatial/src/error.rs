//! Interaction-processing error type.

use thiserror::Error;

use blob_core::{AgentId, InteractionId, ObjectId};

/// Errors produced while processing one interaction.  The detector logs and
/// counts them; they never abort a tick.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("interaction {interaction}: agent {agent} not found")]
    AgentNotFound { interaction: InteractionId, agent: AgentId },

    #[error("interaction {interaction}: object {object} not found")]
    ObjectNotFound { interaction: InteractionId, object: ObjectId },

    #[error("interaction {interaction}: hook failed: {reason}")]
    Hook { interaction: InteractionId, reason: String },
}

pub type InteractionResult<T> = Result<T, InteractionError>;
