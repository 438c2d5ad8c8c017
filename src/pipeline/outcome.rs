//! Per-stage outcome: a genuine stage result or a policy substitute

use tracing::warn;

use crate::stages::StageError;

/// Result of one stage after the fallback policy has been applied.
///
/// Either way the payload is usable; `Fallback` only records that it came
/// from policy rather than from the stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Completed(T),
    Fallback(T),
}

impl<T> StageOutcome<T> {
    /// Apply `fallback` to a failed stage call, logging the failure.
    pub fn resolve<F>(stage: &'static str, result: Result<T, StageError>, fallback: F) -> Self
    where
        F: FnOnce(&StageError) -> T,
    {
        match result {
            Ok(value) => StageOutcome::Completed(value),
            Err(e) => {
                warn!(stage, error = %e, "Stage failed, substituting fallback");
                StageOutcome::Fallback(fallback(&e))
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StageOutcome::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            StageOutcome::Completed(v) | StageOutcome::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            StageOutcome::Completed(v) | StageOutcome::Fallback(v) => v,
        }
    }
}
