//! Error types for the diff crate.

/// Errors that can occur while computing a patch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The arguments cannot describe a comparison (both sides absent,
    /// negative context count, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A caller handed over something that is neither absent nor byte content.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl PatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Build a [`PatchError::TypeMismatch`] for a source that is not byte content.
    pub fn type_mismatch(actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: "byte content or absent".into(),
            actual: actual.into(),
        }
    }
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = PatchError::invalid("both sides absent");
        assert_eq!(err.to_string(), "invalid input: both sides absent");

        let err = PatchError::type_mismatch("directory");
        assert_eq!(
            err.to_string(),
            "type mismatch: expected byte content or absent, got directory"
        );
    }
}
