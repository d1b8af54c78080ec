use blob_behavior::BehaviorError;
use blob_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("decision model error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
