//! `PgModel`: the Postgres-backed [`GraphModel`].
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use graph_core::{
    DiGraph, EdgeInput, GraphModel, InconsistentState, InsertError, ModelError, TreesError,
    cycles::has_cycle_async, paths::enumerate_paths_async,
};

use crate::engine::PgEngine;
use crate::queries::{
    self, Ancestors, Descendants, DescendantsWithHypothetical, DescendantsWithScratch,
};

/// A `GraphModel` backed by a single-table Postgres schema: one row per
/// vertex, its out-neighbors in a `text[]` column, GIN-indexed for the
/// ancestor lookup `trees` needs.
pub struct PgModel {
    engine: PgEngine,
}

impl PgModel {
    pub fn new(engine: PgEngine) -> Self {
        Self { engine }
    }

    /// Drops and recreates the `graph` table and its index. Destructive —
    /// intended for first-time provisioning, not routine startup.
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.engine.pool().acquire().await?;
        sqlx::query("DROP TABLE IF EXISTS graph")
            .execute(&mut *conn)
            .await?;
        sqlx::query("CREATE TABLE graph (vertex TEXT PRIMARY KEY, vertex_out TEXT[])")
            .execute(&mut *conn)
            .await?;
        sqlx::query(
            "CREATE INDEX vertex_out_gin_idx ON graph USING gin (vertex_out) WITH (fastupdate = off)",
        )
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

fn normalize(edge: &EdgeInput) -> (String, Option<String>) {
    match &edge.parent {
        None => (edge.node_id.clone(), None),
        Some(parent) => (parent.clone(), Some(edge.node_id.clone())),
    }
}

#[async_trait]
impl GraphModel for PgModel {
    async fn insert(&self, mut edges: Vec<EdgeInput>) -> Result<(), InsertError> {
        match edges.len() {
            0 => Ok(()),
            1 => {
                let Some(edge) = edges.pop() else {
                    return Ok(());
                };
                let (from, to) = normalize(&edge);
                let mut tx = self
                    .engine
                    .pool()
                    .begin()
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;

                queries::lock_table(&mut tx)
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;

                let Some(to) = to else {
                    queries::upsert_root(&mut tx, &from)
                        .await
                        .map_err(|e| InsertError::Backend(e.to_string()))?;
                    tx.commit()
                        .await
                        .map_err(|e| InsertError::Backend(e.to_string()))?;
                    return Ok(());
                };

                let mut hypothetical_out = queries::descendants(&mut tx, &from)
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                hypothetical_out.insert(to.clone());

                let mut out_fn = DescendantsWithHypothetical {
                    tx: &mut tx,
                    hypothetical_vertex: from.clone(),
                    hypothetical_out,
                };
                let cyclic = has_cycle_async(&mut out_fn, HashSet::from([from.clone()]), &mut HashSet::new())
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                if cyclic {
                    return Err(InsertError::Cycle(InconsistentState::cycle_for(&from, &to)));
                }

                queries::upsert_edge(&mut tx, &from, &to)
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                tx.commit()
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                Ok(())
            }
            _ => {
                let normalized: Vec<(String, Option<String>)> = edges.iter().map(normalize).collect();

                let mut scratch: DiGraph<String> = DiGraph::new();
                for (from, to) in &normalized {
                    scratch.insert(from.clone(), to.clone());
                }
                let scratch_acyclic = graph_core::AcyclicDiGraph::try_from_digraph(scratch)
                    .map_err(|_| InsertError::Cycle(InconsistentState::batch_cycle()))?;
                let scratch_map: HashMap<String, HashSet<String>> = scratch_acyclic
                    .vertices()
                    .map(|v| (v.clone(), scratch_acyclic.out_neighbors(v)))
                    .collect();

                let mut tx = self
                    .engine
                    .pool()
                    .begin()
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                queries::lock_table(&mut tx)
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;

                let seeds: HashSet<String> = scratch_map
                    .iter()
                    .filter(|(_, tos)| !tos.is_empty())
                    .map(|(v, _)| v.clone())
                    .collect();
                let mut out_fn = DescendantsWithScratch {
                    tx: &mut tx,
                    scratch: scratch_map,
                };
                let cyclic = has_cycle_async(&mut out_fn, seeds, &mut HashSet::new())
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                if cyclic {
                    return Err(InsertError::Cycle(InconsistentState::batch_cycle()));
                }

                for (from, to) in &normalized {
                    match to {
                        None => queries::upsert_root(&mut tx, from)
                            .await
                            .map_err(|e| InsertError::Backend(e.to_string()))?,
                        Some(to) => queries::upsert_edge(&mut tx, from, to)
                            .await
                            .map_err(|e| InsertError::Backend(e.to_string()))?,
                    }
                }
                tx.commit()
                    .await
                    .map_err(|e| InsertError::Backend(e.to_string()))?;
                Ok(())
            }
        }
    }

    async fn vertices(&self) -> Result<Vec<String>, ModelError> {
        queries::all_vertices(self.engine.pool())
            .await
            .map_err(Into::into)
    }

    async fn has(&self, vertex: &str) -> Result<bool, ModelError> {
        queries::has_vertex(self.engine.pool(), vertex)
            .await
            .map_err(Into::into)
    }

    async fn trees(&self, vertex: &str) -> Result<Vec<Vec<String>>, TreesError> {
        if !self
            .has(vertex)
            .await
            .map_err(|e| TreesError::Backend(e.to_string()))?
        {
            return Err(TreesError::NotFound);
        }

        let mut tx = self
            .engine
            .pool()
            .begin()
            .await
            .map_err(|e| TreesError::Backend(e.to_string()))?;

        let mut descendants_fn = Descendants(&mut tx);
        let descendant_paths = enumerate_paths_async(&mut descendants_fn, vertex.to_owned())
            .await
            .map_err(|e| TreesError::Backend(e.to_string()))?;

        let mut ancestors_fn = Ancestors(&mut tx);
        let ancestor_paths = enumerate_paths_async(&mut ancestors_fn, vertex.to_owned())
            .await
            .map_err(|e| TreesError::Backend(e.to_string()))?;

        tx.rollback()
            .await
            .map_err(|e| TreesError::Backend(e.to_string()))?;

        let mut result = Vec::with_capacity(ancestor_paths.len() * descendant_paths.len().max(1));
        for ancestor_path in &ancestor_paths {
            let mut prefix: Vec<String> = ancestor_path.iter().rev().cloned().collect();
            prefix.pop();
            for descendant_path in &descendant_paths {
                let mut full = prefix.clone();
                full.extend(descendant_path.iter().cloned());
                result.push(full);
            }
        }
        Ok(result)
    }
}
