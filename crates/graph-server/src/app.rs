//! Router assembly, kept separate from `main` so integration tests can build
//! a fully-wired app without going through process bootstrap.
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::http::SharedModel;
use crate::http::handlers::{get_nodes, get_trees, post_nodes};

pub fn build_router(model: SharedModel) -> Router {
    Router::new()
        .route("/nodes", post(post_nodes).get(get_nodes))
        .route("/nodes/:node_id/trees", get(get_trees))
        .layer(TraceLayer::new_for_http())
        .with_state(model)
}
