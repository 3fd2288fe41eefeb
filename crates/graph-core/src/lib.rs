#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod acyclic;
pub mod async_out;
pub mod cycles;
pub mod digraph;
pub mod error;
pub mod model;
pub mod paths;

pub use acyclic::AcyclicDiGraph;
pub use async_out::{AsyncOutFn, BoxFuture};
pub use digraph::DiGraph;
pub use error::{InconsistentState, InsertError, ModelError, TreesError};
pub use model::{EdgeInput, GraphModel, InMemoryModel, VertexId};

/// Returns the current version of the graph-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
