#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeqError {
    /// A required sequence or function argument was not supplied.
    #[error("missing argument: {0}")]
    NullArgument(String),
    /// A numeric bound fell outside its domain.
    #[error("{name} must be at least 1, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },
    #[error("cannot reverse an empty sequence")]
    EmptySequence,
    #[error("unknown source {0}")]
    UnknownSource(String),
    #[error("unknown stage {0}")]
    UnknownStage(String),
    #[error("invalid number {0}")]
    InvalidNumber(String),
}

pub type Result<T> = std::result::Result<T, SeqError>;

pub(crate) fn require_positive(name: &'static str, value: i64) -> Result<u64> {
    if value < 1 {
        return Err(SeqError::InvalidArgument { name, value });
    }
    Ok(value as u64)
}
