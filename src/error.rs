use thiserror::Error;

/// Result alias for `labelprop`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by label propagation and annotation export.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Graph is directed; label propagation needs an undirected view.
    #[error("label propagation is not defined for directed graphs; convert to an undirected view first")]
    InvalidGraph,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// Shape mismatch (string description).
    #[error("shape mismatch: expected {expected}, actual {actual}")]
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Export was requested from a run that recorded no iteration.
    #[error("no iteration history recorded")]
    EmptyHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidParameter {
            name: "delta",
            message: "must be finite".into(),
        };
        assert_eq!(err.to_string(), "invalid parameter 'delta': must be finite");

        let err = Error::ShapeMismatch {
            expected: "3 rows".into(),
            actual: "2 rows".into(),
        };
        assert_eq!(err.to_string(), "shape mismatch: expected 3 rows, actual 2 rows");
        assert!(Error::InvalidGraph.to_string().contains("directed"));
    }
}
