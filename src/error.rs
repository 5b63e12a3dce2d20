use thiserror::Error;

/// Failure of a construction or an edit on a tabulated function.
///
/// Every variant is reported before any state changes, so a container that
/// returned one of these is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulatedFunctionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} is out of range [0, {count})")]
    IndexOutOfRange {
        index: usize,
        count: usize
    },

    #[error("inappropriate point: {0}")]
    InvalidPoint(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Function(#[from] TabulatedFunctionError),
}
