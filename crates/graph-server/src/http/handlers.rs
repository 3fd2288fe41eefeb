use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use graph_core::GraphModel;

use crate::http::dto::{NodesRequest, TreesResponse};
use crate::http::error::ApiError;

pub type SharedModel = Arc<dyn GraphModel>;

pub async fn post_nodes(
    State(model): State<SharedModel>,
    Json(body): Json<NodesRequest>,
) -> Result<StatusCode, ApiError> {
    let edges = body.into_edges()?;
    model.insert(edges).await?;
    Ok(StatusCode::OK)
}

pub async fn get_nodes(State(model): State<SharedModel>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(model.vertices().await?))
}

pub async fn get_trees(
    State(model): State<SharedModel>,
    Path(node_id): Path<String>,
) -> Result<Json<TreesResponse>, ApiError> {
    let trees = model.trees(&node_id).await?;
    Ok(Json(TreesResponse { trees }))
}
