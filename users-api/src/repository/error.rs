//! Store error types

use thiserror::Error;

/// Errors reported by a [`UserRepository`](super::UserRepository).
///
/// The in-memory store has no I/O failure modes; absence is reported
/// through `Option`/`bool` results, so only input problems remain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The supplied identifier cannot address a record
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}
