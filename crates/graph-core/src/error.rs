//! Error types shared by every graph backend.
//!
//! [`InconsistentState`] is the one error a cycle-checked mutation can raise.
//! [`InsertError`], [`ModelError`] and [`TreesError`] widen it with the
//! transient, backend-specific failures a persistent store can also produce.
use std::fmt;

/// A mutation was rejected because it would have introduced a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InconsistentState(String);

impl InconsistentState {
    /// A single edge would close a cycle.
    pub fn cycle_for<V: fmt::Debug>(from: &V, to: &V) -> Self {
        Self(format!("inserting {from:?} -> {to:?} would create a cycle"))
    }

    /// A batch of edges is individually acyclic but jointly cyclic.
    pub fn batch_cycle() -> Self {
        Self("batch contains an internal cycle".to_owned())
    }

    /// A union of two acyclic graphs is jointly cyclic.
    pub fn union_cycle() -> Self {
        Self("union would create a cycle".to_owned())
    }

    /// The human-readable reason, included verbatim in the variant's `Display`.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InconsistentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InconsistentState {}

/// Failure of a write against a [`GraphModel`](crate::model::GraphModel).
#[derive(Debug)]
pub enum InsertError {
    /// The edge set would have introduced a cycle.
    Cycle(InconsistentState),
    /// The backing store could not complete the write (connection loss, lock
    /// timeout, and the like).
    Backend(String),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(e) => write!(f, "{e}"),
            Self::Backend(detail) => write!(f, "backend error: {detail}"),
        }
    }
}

impl std::error::Error for InsertError {}

impl From<InconsistentState> for InsertError {
    fn from(e: InconsistentState) -> Self {
        Self::Cycle(e)
    }
}

/// Failure of a read (`has`, `vertices`) against a [`GraphModel`](crate::model::GraphModel).
#[derive(Debug)]
pub struct ModelError(pub String);

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend error: {}", self.0)
    }
}

impl std::error::Error for ModelError {}

/// Failure of a `trees` lookup.
#[derive(Debug)]
pub enum TreesError {
    /// The requested vertex has never been observed by the model.
    NotFound,
    /// The backing store could not complete the read.
    Backend(String),
}

impl fmt::Display for TreesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("vertex not found"),
            Self::Backend(detail) => write!(f, "backend error: {detail}"),
        }
    }
}

impl std::error::Error for TreesError {}
