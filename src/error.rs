// src/error.rs

use thiserror::Error;

/// Command-level failures that are not transport errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The API answered with `isSuccess: false` and the answer has already
    /// been printed. The process exits non-zero without printing again.
    #[error("neglect")]
    AlreadyReported,
}

/// True when the error chain carries [`Failure::AlreadyReported`].
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<Failure>() == Some(&Failure::AlreadyReported))
}
