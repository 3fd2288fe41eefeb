//! Root-to-leaf path enumeration.
//!
//! `enumerate_paths` walks an out-function depth-first from a start vertex,
//! recording one path per reachable leaf (a vertex with no out-neighbors).
//! `trees` composes it with a walk over the reverse out-function to produce
//! every full root-to-leaf path that passes through a given vertex.
use std::collections::HashSet;
use std::hash::Hash;

use crate::async_out::{AsyncOutFn, BoxFuture};

/// All paths from `start` to a leaf reachable via `out_fn`, each as the
/// sequence of vertices from `start` (inclusive) to the leaf (inclusive).
pub fn enumerate_paths<V, F>(out_fn: &F, start: &V) -> Vec<Vec<V>>
where
    V: Clone,
    F: Fn(&V) -> HashSet<V>,
{
    let mut stack = vec![start.clone()];
    let mut results = Vec::new();
    walk(out_fn, &mut stack, &mut results);
    results
}

fn walk<V, F>(out_fn: &F, stack: &mut Vec<V>, results: &mut Vec<Vec<V>>)
where
    V: Clone,
    F: Fn(&V) -> HashSet<V>,
{
    let Some(current) = stack.last().cloned() else {
        return;
    };
    let neighbors = out_fn(&current);
    if neighbors.is_empty() {
        results.push(stack.clone());
        return;
    }
    for n in neighbors {
        stack.push(n);
        walk(out_fn, stack, results);
        stack.pop();
    }
}

/// Async twin of [`enumerate_paths`].
pub async fn enumerate_paths_async<V, O>(out_fn: &mut O, start: V) -> Result<Vec<Vec<V>>, O::Error>
where
    V: Clone + Send + Sync,
    O: AsyncOutFn<V>,
{
    let mut stack = vec![start];
    let mut results = Vec::new();
    walk_async(out_fn, &mut stack, &mut results).await?;
    Ok(results)
}

fn walk_async<'a, V, O>(
    out_fn: &'a mut O,
    stack: &'a mut Vec<V>,
    results: &'a mut Vec<Vec<V>>,
) -> BoxFuture<'a, Result<(), O::Error>>
where
    V: Clone + Send + Sync + 'a,
    O: AsyncOutFn<V> + 'a,
{
    Box::pin(async move {
        let Some(current) = stack.last().cloned() else {
            return Ok(());
        };
        let neighbors = out_fn.out(&current).await?;
        if neighbors.is_empty() {
            results.push(stack.clone());
            return Ok(());
        }
        for n in neighbors {
            stack.push(n);
            walk_async(out_fn, stack, results).await?;
            stack.pop();
        }
        Ok(())
    })
}

/// Every root-to-leaf path passing through `v`: the Cartesian product of
/// `v`'s ancestor paths (walked via `f_in`, reversed and with the trailing
/// `v` dropped) and its descendant paths (walked via `f_out`).
pub fn trees<V, FOut, FIn>(f_out: &FOut, f_in: &FIn, v: &V) -> Vec<Vec<V>>
where
    V: Clone + Eq + Hash,
    FOut: Fn(&V) -> HashSet<V>,
    FIn: Fn(&V) -> HashSet<V>,
{
    let descendant_paths = enumerate_paths(f_out, v);
    let ancestor_paths = enumerate_paths(f_in, v);

    let mut result = Vec::with_capacity(ancestor_paths.len() * descendant_paths.len().max(1));
    for ancestor_path in &ancestor_paths {
        let mut prefix: Vec<V> = ancestor_path.iter().rev().cloned().collect();
        prefix.pop(); // drop the trailing `v`, reintroduced by each descendant path
        for descendant_path in &descendant_paths {
            let mut full = prefix.clone();
            full.extend(descendant_path.iter().cloned());
            result.push(full);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn out_fn_from(edges: &HashMap<i32, HashSet<i32>>) -> impl Fn(&i32) -> HashSet<i32> + '_ {
        move |v| edges.get(v).cloned().unwrap_or_default()
    }

    #[test]
    fn single_vertex_with_no_children_is_its_own_path() {
        let edges = HashMap::new();
        let f = out_fn_from(&edges);
        assert_eq!(enumerate_paths(&f, &0), vec![vec![0]]);
    }

    #[test]
    fn chain_produces_one_path_to_the_leaf() {
        let mut edges = HashMap::new();
        edges.insert(0, HashSet::from([1]));
        edges.insert(1, HashSet::from([2]));
        let f = out_fn_from(&edges);
        assert_eq!(enumerate_paths(&f, &0), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn branch_produces_one_path_per_leaf() {
        let mut edges = HashMap::new();
        edges.insert(0, HashSet::from([1, 2]));
        let f = out_fn_from(&edges);
        let mut paths = enumerate_paths(&f, &0);
        paths.sort();
        assert_eq!(paths, vec![vec![0, 1], vec![0, 2]]);
    }

    #[test]
    fn trees_for_an_isolated_vertex_is_a_single_element_path() {
        let out_edges: HashMap<i32, HashSet<i32>> = HashMap::new();
        let in_edges: HashMap<i32, HashSet<i32>> = HashMap::new();
        let f_out = out_fn_from(&out_edges);
        let f_in = out_fn_from(&in_edges);
        assert_eq!(trees(&f_out, &f_in, &0), vec![vec![0]]);
    }

    #[test]
    fn trees_combines_ancestor_and_descendant_paths() {
        // forward: 0 -> 1 -> 2
        let mut out_edges = HashMap::new();
        out_edges.insert(0, HashSet::from([1]));
        out_edges.insert(1, HashSet::from([2]));
        // reverse: 2 -> 1 -> 0
        let mut in_edges = HashMap::new();
        in_edges.insert(2, HashSet::from([1]));
        in_edges.insert(1, HashSet::from([0]));
        let f_out = out_fn_from(&out_edges);
        let f_in = out_fn_from(&in_edges);
        assert_eq!(trees(&f_out, &f_in, &1), vec![vec![0, 1, 2]]);
    }
}
