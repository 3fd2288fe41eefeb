//! The graph model contract and its in-memory implementation.
//!
//! A [`GraphModel`] is the surface every backend (in-memory here, Postgres in
//! `graph-pg`) exposes to the HTTP layer: insert a batch of parent/child
//! edges, check whether a vertex is known, list every vertex, and enumerate
//! the root-to-leaf paths through a vertex.
use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::acyclic::AcyclicDiGraph;
use crate::error::{InsertError, ModelError, TreesError};
use crate::paths;

/// The identifier type every backend stores vertices under.
pub type VertexId = String;

/// One `(node_id, parent)` pair from an insert request. `parent = None`
/// declares `node_id` a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeInput {
    pub node_id: VertexId,
    pub parent: Option<VertexId>,
}

impl EdgeInput {
    pub fn new(node_id: impl Into<VertexId>, parent: Option<VertexId>) -> Self {
        Self {
            node_id: node_id.into(),
            parent,
        }
    }

    /// Normalizes into `(from, to)` graph-insert form: a root declares
    /// itself with no target, a child is inserted as its parent's
    /// out-neighbor.
    fn normalize(&self) -> (VertexId, Option<VertexId>) {
        match &self.parent {
            None => (self.node_id.clone(), None),
            Some(parent) => (parent.clone(), Some(self.node_id.clone())),
        }
    }
}

/// The contract shared by every graph backend.
#[async_trait]
pub trait GraphModel: Send + Sync {
    /// Inserts a batch of edges as a single atomic unit: either every edge
    /// lands, or (on a cycle) none does.
    async fn insert(&self, edges: Vec<EdgeInput>) -> Result<(), InsertError>;

    /// Every vertex the model has ever observed, as either a child or a
    /// root declaration.
    async fn vertices(&self) -> Result<Vec<VertexId>, ModelError>;

    /// Whether `vertex` has ever been observed.
    async fn has(&self, vertex: &str) -> Result<bool, ModelError>;

    /// Every root-to-leaf path passing through `vertex`.
    async fn trees(&self, vertex: &str) -> Result<Vec<Vec<VertexId>>, TreesError>;
}

struct ModelState {
    g: AcyclicDiGraph<VertexId>,
    g_rev: AcyclicDiGraph<VertexId>,
}

/// A `GraphModel` held entirely in memory behind a reader/writer lock.
///
/// Alongside the forward graph `g`, it keeps a derived reverse graph `g_rev`
/// for ancestor lookups in [`trees`](GraphModel::trees). `g_rev` is
/// maintained without its own cycle check — its acyclicity follows from
/// `g`'s, since it is built purely by flipping `g`'s edges.
pub struct InMemoryModel {
    state: RwLock<ModelState>,
}

impl Default for InMemoryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ModelState {
                g: AcyclicDiGraph::new(),
                g_rev: AcyclicDiGraph::new(),
            }),
        }
    }
}

#[async_trait]
impl GraphModel for InMemoryModel {
    async fn insert(&self, mut edges: Vec<EdgeInput>) -> Result<(), InsertError> {
        match edges.len() {
            0 => Ok(()),
            1 => {
                let Some(edge) = edges.pop() else {
                    return Ok(());
                };
                let (from, to) = edge.normalize();
                let mut state = self.state.write();
                state.g.insert(from.clone(), to.clone())?;
                if let Some(child) = to {
                    state.g_rev.insert_unchecked(child, Some(from));
                }
                Ok(())
            }
            _ => {
                let normalized: Vec<(VertexId, Option<VertexId>)> =
                    edges.iter().map(EdgeInput::normalize).collect();
                let mut scratch: AcyclicDiGraph<VertexId> = AcyclicDiGraph::new();
                for (from, to) in normalized {
                    scratch
                        .insert(from, to)
                        .map_err(|_| InsertError::from(crate::error::InconsistentState::batch_cycle()))?;
                }
                let mut state = self.state.write();
                state.g.union(&scratch)?;
                state.g_rev.union_unchecked(&scratch.reverse());
                Ok(())
            }
        }
    }

    async fn vertices(&self) -> Result<Vec<VertexId>, ModelError> {
        let state = self.state.read();
        Ok(state.g.vertices().cloned().collect())
    }

    async fn has(&self, vertex: &str) -> Result<bool, ModelError> {
        let state = self.state.read();
        Ok(state.g.has_vertex(&vertex.to_owned()))
    }

    async fn trees(&self, vertex: &str) -> Result<Vec<Vec<VertexId>>, TreesError> {
        let state = self.state.read();
        let vertex = vertex.to_owned();
        if !state.g.has_vertex(&vertex) {
            return Err(TreesError::NotFound);
        }
        let f_out = |v: &VertexId| -> HashSet<VertexId> { state.g.out_neighbors(v) };
        let f_in = |v: &VertexId| -> HashSet<VertexId> { state.g_rev.out_neighbors(v) };
        Ok(paths::trees(&f_out, &f_in, &vertex))
    }
}
