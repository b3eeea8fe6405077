//! Error taxonomy and run outcomes
//!
//! Library functions propagate failures as [`SetupError`]. The binary catches
//! them at each procedure boundary and converts the result to a [`RunOutcome`]
//! that determines the process exit code.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the bootstrap procedures
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required input file (the schema script) is missing or unreadable.
    /// Fatal to initialization; the smoke test is skipped.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The schema batch failed to apply. Nothing is committed.
    #[error("schema execution error: {0}")]
    SchemaExecution(String),

    /// An insert/query/delete during the smoke test failed. The run becomes
    /// a partial success (schema applied, test failed).
    #[error("smoke test error: {0}")]
    TestOperation(String),

    /// Catch-all for anything not classified above (permissions, disk).
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

/// Overall result of a bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Schema applied and smoke test passed
    Success,

    /// Schema applied but the smoke test failed
    SchemaOnly,

    /// Initialization failed; the smoke test never ran
    Failed,
}

impl RunOutcome {
    /// Process exit code for this outcome
    ///
    /// 0 for full success, 1 for full failure, 2 for partial success.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failed => 1,
            RunOutcome::SchemaOnly => 2,
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Success => write!(f, "success"),
            RunOutcome::SchemaOnly => write!(f, "schema applied, smoke test failed"),
            RunOutcome::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::Success.exit_code(), 0);
        assert_eq!(RunOutcome::Failed.exit_code(), 1);
        assert_eq!(RunOutcome::SchemaOnly.exit_code(), 2);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(format!("{}", RunOutcome::Success), "success");
        assert_eq!(format!("{}", RunOutcome::Failed), "failed");
        assert_eq!(
            format!("{}", RunOutcome::SchemaOnly),
            "schema applied, smoke test failed"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = SetupError::Configuration("schema script not found".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: schema script not found"
        );

        let err = SetupError::SchemaExecution("near \"CREAT\": syntax error".to_string());
        assert!(err.to_string().starts_with("schema execution error"));
    }
}
