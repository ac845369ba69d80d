use anyhow::Context;
use todo_api::{app, cors_layer, Config, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Fail fast: no point serving requests without a working store.
    let store = TodoStore::connect(&config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open database pool: {e}"))?;
    store
        .bootstrap()
        .await
        .map_err(|e| anyhow::anyhow!("failed to bootstrap schema: {e}"))?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server starting");

    let router = app(store, cors_layer(&config.allow_origin));
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
