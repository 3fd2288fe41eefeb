//! [`AcyclicDiGraph`]: a [`DiGraph`] that refuses mutations which would
//! introduce a cycle.
use std::collections::HashSet;
use std::hash::Hash;

use crate::cycles::has_cycle;
use crate::digraph::DiGraph;
use crate::error::InconsistentState;

/// A directed graph that is acyclic by construction: every checked mutation
/// either leaves the graph acyclic or is rejected with
/// [`InconsistentState`].
#[derive(Debug, Clone)]
pub struct AcyclicDiGraph<V: Eq + Hash + Clone + std::fmt::Debug> {
    inner: DiGraph<V>,
}

impl<V: Eq + Hash + Clone + std::fmt::Debug> Default for AcyclicDiGraph<V> {
    fn default() -> Self {
        Self {
            inner: DiGraph::new(),
        }
    }
}

impl<V: Eq + Hash + Clone + std::fmt::Debug> AcyclicDiGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-built [`DiGraph`], checking the whole thing for
    /// cycles up front. The seed frontier is every vertex with at least one
    /// out-neighbor; childless roots cannot participate in a cycle.
    pub fn try_from_digraph(graph: DiGraph<V>) -> Result<Self, InconsistentState> {
        let seeds: HashSet<V> = graph
            .vertices()
            .filter(|v| !graph.out_neighbors(v).is_empty())
            .cloned()
            .collect();
        let out_fn = |v: &V| graph.out_neighbors(v);
        let mut seen = HashSet::new();
        if has_cycle(&out_fn, &seeds, &mut seen) {
            return Err(InconsistentState::batch_cycle());
        }
        Ok(Self { inner: graph })
    }

    pub fn inner(&self) -> &DiGraph<V> {
        &self.inner
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.inner.has_vertex(v)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        self.inner.has_edge(from, to)
    }

    pub fn out_neighbors(&self, v: &V) -> HashSet<V> {
        self.inner.out_neighbors(v)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.inner.vertices()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Inserts `from -> to` (or declares `from` a root, if `to` is `None`),
    /// checking first that doing so would not close a cycle. A no-op if the
    /// edge already exists.
    pub fn insert(&mut self, from: V, to: Option<V>) -> Result<(), InconsistentState> {
        let Some(to) = to else {
            // A root declaration adds no edge, so it can never create a cycle.
            self.inner.insert(from, None);
            return Ok(());
        };
        if self.inner.has_edge(&from, &to) {
            return Ok(());
        }
        let mut hypothetical = self.inner.out_neighbors(&from);
        hypothetical.insert(to.clone());
        let out_fn = |v: &V| {
            if *v == from {
                hypothetical.clone()
            } else {
                self.inner.out_neighbors(v)
            }
        };
        let mut seen = HashSet::new();
        if has_cycle(&out_fn, &HashSet::from([from.clone()]), &mut seen) {
            return Err(InconsistentState::cycle_for(&from, &to));
        }
        self.inner.insert(from, Some(to));
        Ok(())
    }

    /// Inserts `from -> to` without any cycle check. Used to maintain a
    /// derived index (a reverse graph, say) whose own acyclicity follows
    /// from a check already performed elsewhere.
    pub fn insert_unchecked(&mut self, from: V, to: Option<V>) {
        self.inner.insert(from, to);
    }

    /// Merges `other` into `self`, checking that the combined graph stays
    /// acyclic. The seed frontier is every vertex of `other` with at least
    /// one out-neighbor.
    pub fn union(&mut self, other: &Self) -> Result<(), InconsistentState> {
        let seeds: HashSet<V> = other
            .vertices()
            .filter(|v| !other.out_neighbors(v).is_empty())
            .cloned()
            .collect();
        let out_fn = |v: &V| {
            let mut combined = self.inner.out_neighbors(v);
            combined.extend(other.out_neighbors(v));
            combined
        };
        let mut seen = HashSet::new();
        if has_cycle(&out_fn, &seeds, &mut seen) {
            return Err(InconsistentState::union_cycle());
        }
        self.inner.union(&other.inner);
        Ok(())
    }

    /// Merges `other` into `self` without any cycle check.
    pub fn union_unchecked(&mut self, other: &Self) {
        self.inner.union(&other.inner);
    }

    /// Returns a reversed copy. Reversing an acyclic graph always yields an
    /// acyclic graph, so no re-check is performed.
    pub fn reverse(&self) -> Self {
        Self {
            inner: self.inner.reverse(),
        }
    }

    /// Copies the larger of the two inputs (by [`Self::len`]) and unions the
    /// smaller into the copy.
    pub fn merge(a: &Self, b: &Self) -> Result<Self, InconsistentState> {
        let (mut bigger, smaller) = if a.len() >= b.len() {
            (a.clone(), b)
        } else {
            (b.clone(), a)
        };
        bigger.union(smaller)?;
        Ok(bigger)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn insert_builds_a_chain() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        assert!(g.insert(0, Some(1)).is_ok());
        assert!(g.insert(1, Some(2)).is_ok());
        assert!(g.has_edge(&0, &1));
        assert!(g.has_edge(&1, &2));
    }

    #[test]
    fn insert_rejects_a_direct_cycle() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        g.insert(0, Some(1)).expect("no_cycle");
        let err = g.insert(1, Some(0));
        assert!(err.is_err());
        assert!(!g.has_edge(&1, &0));
    }

    #[test]
    fn insert_rejects_an_indirect_cycle() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        g.insert(0, Some(1)).expect("no_cycle");
        g.insert(1, Some(2)).expect("no_cycle");
        assert!(g.insert(2, Some(0)).is_err());
    }

    #[test]
    fn insert_is_idempotent_for_an_existing_edge() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        g.insert(0, Some(1)).expect("no_cycle");
        assert!(g.insert(0, Some(1)).is_ok());
    }

    #[test]
    fn root_declaration_never_conflicts() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        g.insert(0, Some(1)).expect("no_cycle");
        assert!(g.insert(1, None).is_ok());
    }

    #[test]
    fn union_of_disjoint_graphs_succeeds() {
        let mut a: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        a.insert(0, Some(1)).expect("no_cycle");
        let mut b: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        b.insert(2, Some(3)).expect("no_cycle");
        assert!(a.union(&b).is_ok());
        assert!(a.has_edge(&2, &3));
    }

    #[test]
    fn union_rejects_a_cross_graph_cycle() {
        let mut a: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        a.insert(0, Some(1)).expect("no_cycle");
        let mut b: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        b.insert(1, Some(0)).expect("no_cycle");
        assert!(a.union(&b).is_err());
    }

    #[test]
    fn merge_picks_the_larger_graph_as_the_base() {
        let mut a: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        a.insert(0, Some(1)).expect("no_cycle");
        let mut b: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        b.insert(2, Some(3)).expect("no_cycle");
        b.insert(3, Some(4)).expect("no_cycle");
        let merged = AcyclicDiGraph::merge(&a, &b).expect("acyclic");
        assert!(merged.has_edge(&0, &1));
        assert!(merged.has_edge(&2, &3));
        assert!(merged.has_edge(&3, &4));
    }

    #[test]
    fn reverse_flips_every_edge() {
        let mut g: AcyclicDiGraph<i32> = AcyclicDiGraph::new();
        g.insert(0, Some(1)).expect("no_cycle");
        let r = g.reverse();
        assert!(r.has_edge(&1, &0));
    }

    #[test]
    fn try_from_digraph_rejects_a_preexisting_cycle() {
        let mut raw: DiGraph<i32> = DiGraph::new();
        raw.insert(0, Some(1));
        raw.insert(1, Some(0));
        assert!(AcyclicDiGraph::try_from_digraph(raw).is_err());
    }
}
