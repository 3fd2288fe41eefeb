//! Row-level queries against the `graph` table, and the `AsyncOutFn`
//! wrappers that let `graph-core`'s cycle checker and path enumerator walk
//! them without knowing they're backed by SQL.
use std::collections::{HashMap, HashSet};

use graph_core::{AsyncOutFn, BoxFuture};
use sqlx::postgres::PgPool;
use sqlx::{Postgres, Transaction};

use crate::error::PgError;

pub async fn descendants(
    tx: &mut Transaction<'_, Postgres>,
    vertex: &str,
) -> Result<HashSet<String>, PgError> {
    let row: Option<(Option<Vec<String>>,)> =
        sqlx::query_as("SELECT vertex_out FROM graph WHERE vertex = $1")
            .bind(vertex)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(row
        .and_then(|(out,)| out)
        .unwrap_or_default()
        .into_iter()
        .collect())
}

pub async fn ancestors(
    tx: &mut Transaction<'_, Postgres>,
    vertex: &str,
) -> Result<HashSet<String>, PgError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT vertex FROM graph WHERE vertex_out @> ARRAY[$1]")
            .bind(vertex)
            .fetch_all(&mut **tx)
            .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

pub async fn has_vertex(pool: &PgPool, vertex: &str) -> Result<bool, PgError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT vertex FROM graph WHERE vertex = $1")
        .bind(vertex)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn all_vertices(pool: &PgPool) -> Result<Vec<String>, PgError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT vertex FROM graph")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

pub async fn lock_table(tx: &mut Transaction<'_, Postgres>) -> Result<(), PgError> {
    sqlx::query("LOCK TABLE graph IN ROW EXCLUSIVE MODE")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// `vertex = null` / `vertex_out = '{}'`: a root declaration with no
/// out-neighbors.
pub async fn upsert_root(tx: &mut Transaction<'_, Postgres>, vertex: &str) -> Result<(), PgError> {
    sqlx::query(
        "INSERT INTO graph AS g (vertex, vertex_out) VALUES ($1, '{}') \
         ON CONFLICT (vertex) DO NOTHING",
    )
    .bind(vertex)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Inserts `from -> to`, or, if `from` already has a row, appends `to` to
/// its out-neighbors (first removing any stale copy, so re-inserting the
/// same edge is idempotent rather than duplicating it).
pub async fn upsert_edge(
    tx: &mut Transaction<'_, Postgres>,
    from: &str,
    to: &str,
) -> Result<(), PgError> {
    sqlx::query(
        "INSERT INTO graph AS g (vertex, vertex_out) VALUES ($1, $2) \
         ON CONFLICT (vertex) DO UPDATE SET \
         vertex_out = array_append(array_remove(g.vertex_out, $3), $4)",
    )
    .bind(from)
    .bind(vec![to.to_owned()])
    .bind(to)
    .bind(to)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Walks descendants through a live transaction, with one vertex's
/// neighbors hypothetically widened by an extra edge under consideration —
/// the shape [`crate::model::PgModel::insert`] needs for its single-edge
/// cycle pre-check without mutating the table first.
pub struct DescendantsWithHypothetical<'tx, 'conn> {
    pub tx: &'tx mut Transaction<'conn, Postgres>,
    pub hypothetical_vertex: String,
    pub hypothetical_out: HashSet<String>,
}

impl<'tx, 'conn> AsyncOutFn<String> for DescendantsWithHypothetical<'tx, 'conn> {
    type Error = PgError;

    fn out<'a>(&'a mut self, v: &'a String) -> BoxFuture<'a, Result<HashSet<String>, PgError>>
    where
        String: 'a,
    {
        Box::pin(async move {
            if *v == self.hypothetical_vertex {
                Ok(self.hypothetical_out.clone())
            } else {
                descendants(&mut *self.tx, v).await
            }
        })
    }
}

/// Walks descendants through a live transaction widened by a whole scratch
/// graph's worth of hypothetical edges — the shape a batch insert's
/// pre-check needs.
pub struct DescendantsWithScratch<'tx, 'conn> {
    pub tx: &'tx mut Transaction<'conn, Postgres>,
    pub scratch: HashMap<String, HashSet<String>>,
}

impl<'tx, 'conn> AsyncOutFn<String> for DescendantsWithScratch<'tx, 'conn> {
    type Error = PgError;

    fn out<'a>(&'a mut self, v: &'a String) -> BoxFuture<'a, Result<HashSet<String>, PgError>>
    where
        String: 'a,
    {
        Box::pin(async move {
            let mut combined = descendants(&mut *self.tx, v).await?;
            if let Some(extra) = self.scratch.get(v) {
                combined.extend(extra.iter().cloned());
            }
            Ok(combined)
        })
    }
}

/// Plain descendants walk, for `trees`.
pub struct Descendants<'tx, 'conn>(pub &'tx mut Transaction<'conn, Postgres>);

impl<'tx, 'conn> AsyncOutFn<String> for Descendants<'tx, 'conn> {
    type Error = PgError;

    fn out<'a>(&'a mut self, v: &'a String) -> BoxFuture<'a, Result<HashSet<String>, PgError>>
    where
        String: 'a,
    {
        Box::pin(async move { descendants(&mut *self.0, v).await })
    }
}

/// Plain ancestors walk, for `trees`.
pub struct Ancestors<'tx, 'conn>(pub &'tx mut Transaction<'conn, Postgres>);

impl<'tx, 'conn> AsyncOutFn<String> for Ancestors<'tx, 'conn> {
    type Error = PgError;

    fn out<'a>(&'a mut self, v: &'a String) -> BoxFuture<'a, Result<HashSet<String>, PgError>>
    where
        String: 'a,
    {
        Box::pin(async move { ancestors(&mut *self.0, v).await })
    }
}
