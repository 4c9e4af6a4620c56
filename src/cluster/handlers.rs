use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::node::Node;
use super::protocol::{
    AckResponse, ClusterInfoResponse, JoinRequest, ServerWriteRequest, ValueResponse, WriteRequest,
};

/// Builds the node's full RPC surface. Shared by the server binary and
/// the integration tests.
pub fn router(node: Arc<Node>) -> Router {
    Router::new()
        .route("/read/:key", get(handle_read))
        .route("/write", post(handle_write))
        .route("/server_write", post(handle_server_write))
        .route("/cluster_info", get(handle_cluster_info))
        .route("/join", post(handle_join))
        .layer(Extension(node))
}

pub async fn handle_read(
    Extension(node): Extension<Arc<Node>>,
    Path(key): Path<String>,
) -> (StatusCode, Json<ValueResponse>) {
    tracing::info!("received client read: {}", key);
    let value = node.read(&key).await;
    (StatusCode::OK, Json(ValueResponse { value }))
}

pub async fn handle_write(
    Extension(node): Extension<Arc<Node>>,
    Json(req): Json<WriteRequest>,
) -> (StatusCode, Json<AckResponse>) {
    tracing::info!("received client write: {}={}", req.key, req.value);

    match node.write(req.key, req.value).await {
        Ok(()) => (StatusCode::OK, Json(AckResponse { success: true })),
        Err(e) => {
            tracing::error!("write failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(AckResponse { success: false }),
            )
        }
    }
}

pub async fn handle_server_write(
    Extension(node): Extension<Arc<Node>>,
    Json(req): Json<ServerWriteRequest>,
) -> (StatusCode, Json<AckResponse>) {
    tracing::info!("received node write: {}={}", req.key, req.value);
    node.apply_replica(req.key, req.value).await;
    (StatusCode::OK, Json(AckResponse { success: true }))
}

pub async fn handle_cluster_info(
    Extension(node): Extension<Arc<Node>>,
) -> (StatusCode, Json<ClusterInfoResponse>) {
    tracing::info!("received cluster info request");
    (StatusCode::OK, Json(node.cluster_info().await))
}

pub async fn handle_join(
    Extension(node): Extension<Arc<Node>>,
    Json(req): Json<JoinRequest>,
) -> (StatusCode, Json<AckResponse>) {
    tracing::info!("node {} joining cluster", req.address);

    match node.accept_join(&req.address).await {
        Ok(()) => (StatusCode::OK, Json(AckResponse { success: true })),
        Err(e) => {
            tracing::error!("failed to register joining peer {}: {}", req.address, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(AckResponse { success: false }),
            )
        }
    }
}
