//! Error types for annealing runs.

use thiserror::Error;

/// Result type alias for annealing operations.
pub type Result<T> = std::result::Result<T, AnnealError>;

/// Failures that abort an annealing run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnealError {
    /// Temperatures or cooling fraction outside their valid ranges.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A candidate could not be generated, or a task could not be scored.
    #[error("degenerate candidate: {0}")]
    DegenerateCandidate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnnealError::InvalidParameters("alpha must be in (0, 1)".into());
        assert_eq!(err.to_string(), "invalid parameters: alpha must be in (0, 1)");

        let err = AnnealError::DegenerateCandidate("empty track".into());
        assert_eq!(err.to_string(), "degenerate candidate: empty track");
    }
}
