//! [`DiGraph`]: an unchecked, mutable directed graph keyed by vertex identity.
//!
//! This is the storage layer underneath [`AcyclicDiGraph`](crate::acyclic::AcyclicDiGraph).
//! It never rejects an insert; cycle-checking lives one layer up.
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A directed graph represented as an adjacency map from each vertex to its
/// out-neighbors.
///
/// A vertex inserted with no target (a "root declaration") gets an explicit
/// empty entry in the adjacency map, distinguishing "known, childless vertex"
/// from "never observed."
#[derive(Debug, Clone)]
pub struct DiGraph<V: Eq + Hash + Clone> {
    out: HashMap<V, HashSet<V>>,
    vertices: HashSet<V>,
}

impl<V: Eq + Hash + Clone> Default for DiGraph<V> {
    fn default() -> Self {
        Self {
            out: HashMap::new(),
            vertices: HashSet::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> DiGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `from`, and `to` if present, as known vertices, and records
    /// the `from -> to` edge. Calling this with `to = None` for a vertex that
    /// already has out-neighbors leaves those neighbors untouched — root
    /// declarations never clear an existing adjacency entry.
    pub fn insert(&mut self, from: V, to: Option<V>) {
        self.vertices.insert(from.clone());
        self.out.entry(from.clone()).or_default();
        if let Some(to) = to {
            self.vertices.insert(to.clone());
            self.out.entry(from).or_default().insert(to);
        }
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.out.get(from).is_some_and(|tos| tos.contains(to))
    }

    /// The out-neighbors of `v`, or an empty set if `v` is unknown.
    pub fn out_neighbors(&self, v: &V) -> HashSet<V> {
        self.out.get(v).cloned().unwrap_or_default()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// Number of vertices with a materialized adjacency entry. A vertex that
    /// only ever appears as someone else's child is known (see
    /// [`Self::has_vertex`]) but does not carry its own entry, so this is not
    /// the same as `vertices().count()`.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Merges `other`'s vertices and edges into `self`.
    pub fn union(&mut self, other: &Self) {
        for v in &other.vertices {
            self.vertices.insert(v.clone());
            let tos = other.out_neighbors(v);
            self.vertices.extend(tos.iter().cloned());
            self.out.entry(v.clone()).or_default().extend(tos);
        }
    }

    /// A new graph with every edge reversed. Root declarations (vertices
    /// with no out-neighbors) produce no edge in either direction and so do
    /// not appear in the result.
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for (from, tos) in &self.out {
            for to in tos {
                result.insert(to.clone(), Some(from.clone()));
            }
        }
        result
    }
}
