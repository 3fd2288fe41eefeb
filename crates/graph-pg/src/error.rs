//! Error types for the Postgres backend.
use std::fmt;

/// Everything that can go wrong while talking to the `graph` table, short of
/// a cycle (which is reported as [`graph_core::InconsistentState`] instead).
#[derive(Debug)]
pub struct PgError(String);

impl fmt::Display for PgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "postgres backend error: {}", self.0)
    }
}

impl std::error::Error for PgError {}

impl From<sqlx::Error> for PgError {
    fn from(e: sqlx::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<PgError> for graph_core::ModelError {
    fn from(e: PgError) -> Self {
        graph_core::ModelError(e.0)
    }
}

impl From<PgError> for graph_core::InsertError {
    fn from(e: PgError) -> Self {
        graph_core::InsertError::Backend(e.0)
    }
}

impl From<PgError> for graph_core::TreesError {
    fn from(e: PgError) -> Self {
        graph_core::TreesError::Backend(e.0)
    }
}
