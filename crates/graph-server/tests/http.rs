//! End-to-end tests against the router, wired to an in-memory model so they
//! need no external services.
#![allow(clippy::expect_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use graph_core::InMemoryModel;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> axum::Router {
    graph_server::build_router(Arc::new(InMemoryModel::new()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("collect").to_bytes();
    serde_json::from_slice(&bytes).expect("valid json")
}

fn post_nodes_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/nodes")
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

#[tokio::test]
async fn post_nodes_then_get_nodes_round_trips() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_nodes_request(r#"{"nodes":[{"id":"1","parent":null}]}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nodes")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let nodes = body_json(response).await;
    assert_eq!(nodes, serde_json::json!(["1"]));
}

#[tokio::test]
async fn direct_cycle_is_unprocessable() {
    let app = app();
    let first = app
        .clone()
        .oneshot(post_nodes_request(r#"{"nodes":[{"id":"2","parent":"1"}]}"#))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_nodes_request(r#"{"nodes":[{"id":"1","parent":"2"}]}"#))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn self_loop_is_unprocessable() {
    let app = app();
    let response = app
        .oneshot(post_nodes_request(r#"{"nodes":[{"id":"1","parent":"1"}]}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn intra_batch_cycle_is_unprocessable_and_leaves_no_trace() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_nodes_request(
            r#"{"nodes":[{"id":"4","parent":"2"},{"id":"3","parent":"4"},{"id":"2","parent":"3"}]}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let nodes_response = app
        .oneshot(
            Request::builder()
                .uri("/nodes")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let nodes = body_json(nodes_response).await;
    assert_eq!(nodes, serde_json::json!([]));
}

#[tokio::test]
async fn missing_id_is_bad_request() {
    let app = app();
    let response = app
        .oneshot(post_nodes_request(r#"{"nodes":[{"id":"","parent":null}]}"#))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trees_for_unknown_vertex_is_not_found() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/nodes/999/trees")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trees_enumerates_subtrees() {
    let app = app();
    let response = app
        .clone()
        .oneshot(post_nodes_request(
            r#"{"nodes":[{"id":"1","parent":"0"},{"id":"2","parent":"0"},{"id":"3","parent":"1"},{"id":"3","parent":"2"},{"id":"4","parent":"3"}]}"#,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nodes/3/trees")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let mut trees: Vec<Vec<String>> = serde_json::from_value(body["trees"].clone()).expect("trees array");
    trees.sort();
    assert_eq!(
        trees,
        vec![
            vec!["0".to_owned(), "1".to_owned(), "3".to_owned(), "4".to_owned()],
            vec!["0".to_owned(), "2".to_owned(), "3".to_owned(), "4".to_owned()],
        ]
    );
}
