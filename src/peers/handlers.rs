use axum::{
    Router,
    extract::{Extension, OriginalUri, Path},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;

use super::pool::HttpPool;
use super::protocol::CONTENT_TYPE_OCTET_STREAM;
use crate::error::CacheError;
use crate::group::GroupRegistry;

/// Builds the peer server: `GET {base_path}{group}/{key}` on the pool's base
/// path. Any other path is answered with `400 Bad Request`.
pub fn router(pool: Arc<HttpPool>, registry: Arc<GroupRegistry>) -> Router {
    let route = format!("{}:group/*key", pool.base_path());

    Router::new()
        .route(&route, get(handle_get_value))
        .fallback(handle_bad_path)
        .layer(Extension(registry))
        .layer(Extension(pool))
}

pub async fn handle_get_value(
    Extension(pool): Extension<Arc<HttpPool>>,
    Extension(registry): Extension<Arc<GroupRegistry>>,
    Path((group_name, key)): Path<(String, String)>,
) -> Response {
    tracing::info!("[Server {}] GET {}/{}", pool.self_addr(), group_name, key);

    let group = match registry.require(&group_name) {
        Ok(group) => group,
        Err(e) if e.is_not_found() => {
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };
    group.record_server_request();

    match group.get(&key).await {
        Ok(value) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)],
            value.to_bytes(),
        )
            .into_response(),
        Err(CacheError::EmptyKey) => {
            (StatusCode::BAD_REQUEST, CacheError::EmptyKey.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(
                "[Server {}] Failed to serve {}/{}: {}",
                pool.self_addr(),
                group_name,
                key,
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn handle_bad_path(
    Extension(pool): Extension<Arc<HttpPool>>,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, String) {
    tracing::warn!(
        "[Server {}] Rejecting unexpected path: {}",
        pool.self_addr(),
        uri.path()
    );
    (
        StatusCode::BAD_REQUEST,
        format!("expected {}<group>/<key>, got {}", pool.base_path(), uri.path()),
    )
}
