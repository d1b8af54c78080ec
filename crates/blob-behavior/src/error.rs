use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid decision policy: {0}")]
    InvalidPolicy(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
