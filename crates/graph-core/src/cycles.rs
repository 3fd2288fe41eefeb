//! Cycle detection shared by every mutation on an [`AcyclicDiGraph`](crate::acyclic::AcyclicDiGraph).
//!
//! Both functions here implement the same algorithm: seed a frontier of
//! vertices, walk their out-neighbors depth-first marking each one seen on
//! entry and unmarking it on exit, and report a cycle the moment a neighbor
//! is already marked. The out-function is supplied by the caller so the same
//! walk serves a plain insert (a single hypothetical edge), a batch insert
//! (a hypothetical union), and a union of two graphs.
use std::collections::HashSet;
use std::hash::Hash;

use crate::async_out::{AsyncOutFn, BoxFuture};

/// Synchronous cycle check over an in-memory out-function.
///
/// `seen` is caller-owned so a single scratch set can be reused across
/// sibling calls; on return (whether or not a cycle was found) any vertex
/// marked along an ultimately cycle-free branch has been unmarked again.
pub fn has_cycle<V, F>(out_fn: &F, from_vs: &HashSet<V>, seen: &mut HashSet<V>) -> bool
where
    V: Eq + Hash + Clone,
    F: Fn(&V) -> HashSet<V>,
{
    if from_vs.is_empty() {
        return false;
    }
    for from_edge in from_vs {
        seen.insert(from_edge.clone());
        for out_edge in out_fn(from_edge) {
            if seen.contains(&out_edge) {
                return true;
            }
            seen.insert(out_edge.clone());
            let next = out_fn(&out_edge);
            if has_cycle(out_fn, &next, seen) {
                return true;
            }
            seen.remove(&out_edge);
        }
        seen.remove(from_edge);
    }
    false
}

/// Async twin of [`has_cycle`], for out-functions that must query a
/// persistent store.
pub async fn has_cycle_async<V, O>(
    out_fn: &mut O,
    from_vs: HashSet<V>,
    seen: &mut HashSet<V>,
) -> Result<bool, O::Error>
where
    V: Eq + Hash + Clone + Send + Sync,
    O: AsyncOutFn<V>,
{
    if from_vs.is_empty() {
        return Ok(false);
    }
    for from_edge in from_vs {
        seen.insert(from_edge.clone());
        let neighbors = out_fn.out(&from_edge).await?;
        for out_edge in neighbors {
            if seen.contains(&out_edge) {
                return Ok(true);
            }
            seen.insert(out_edge.clone());
            let next = out_fn.out(&out_edge).await?;
            let found: BoxFuture<'_, Result<bool, O::Error>> =
                Box::pin(has_cycle_async(out_fn, next, seen));
            if found.await? {
                return Ok(true);
            }
            seen.remove(&out_edge);
        }
        seen.remove(&from_edge);
    }
    Ok(false)
}
