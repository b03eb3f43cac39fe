use axum::extract::{Extension, Query};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use clap::Parser;
use distributed_cache::config::NodeConfig;
use distributed_cache::group::{Group, GroupRegistry, GroupReport};
use distributed_cache::peers::protocol::CONTENT_TYPE_OCTET_STREAM;
use distributed_cache::peers::{HttpPool, PeerPicker, router};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::parse();
    config.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    let self_addr = config.self_addr();
    tracing::info!("Starting node {}", self_addr);
    tracing::info!("Peers: {:?}", config.peers);

    // 1. Groups:
    let registry = GroupRegistry::new();
    let scores = create_scores_group(&registry, config.cache_bytes)?;

    // 2. Peers:
    let pool = HttpPool::new(self_addr.clone());
    pool.set_peers(&config.peers);
    let picker: Arc<dyn PeerPicker> = pool.clone();
    scores.register_peers(picker)?;

    // 3. Front-end API server:
    if config.api {
        let app = Router::new()
            .route("/api", get(handle_api_get))
            .route("/api/stats", get(handle_api_stats))
            .layer(Extension(scores.clone()))
            .layer(Extension(registry.clone()));

        let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.api_port)).await?;
        tracing::info!("Front-end server listening on {}", listener.local_addr()?);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Front-end server stopped: {}", e);
            }
        });
    }

    // 4. Peer server:
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Cache server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, router(pool, registry)).await?;

    Ok(())
}

/// Demo group over an in-memory table standing in for a slow database.
fn create_scores_group(registry: &GroupRegistry, cache_bytes: i64) -> anyhow::Result<Arc<Group>> {
    let db: Arc<HashMap<String, String>> = Arc::new(HashMap::from([
        ("Tom".to_string(), "630".to_string()),
        ("Jack".to_string(), "589".to_string()),
        ("Sam".to_string(), "567".to_string()),
    ]));

    let group = registry.create("scores", cache_bytes, move |key: String| {
        let db = db.clone();
        async move {
            tracing::info!("[SlowDB] search key {}", key);
            db.get(&key)
                .map(|value| value.clone().into_bytes())
                .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
        }
    })?;

    Ok(group)
}

#[derive(Debug, Deserialize)]
struct ApiParams {
    #[serde(default)]
    key: String,
}

async fn handle_api_get(
    Extension(group): Extension<Arc<Group>>,
    Query(params): Query<ApiParams>,
) -> Response {
    match group.get(&params.key).await {
        Ok(value) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE_OCTET_STREAM)],
            value.to_bytes(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("API get {} failed: {}", params.key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn handle_api_stats(
    Extension(registry): Extension<Arc<GroupRegistry>>,
) -> Json<Vec<GroupReport>> {
    Json(registry.reports())
}
