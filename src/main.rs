//! Conversations web API
//!
//! (c) Softlandia 2025

use tokio_conversations_api::api;
use tokio_conversations_api::config::Settings;
use tokio_conversations_api::core::services::DbConversationService;
use tokio_conversations_api::infrastructure::database::DatabaseConnection;
use tokio_conversations_api::infrastructure::repositories::{
    DbConversationRepository, DbUserRepository,
};

use anyhow::anyhow;
use axum::Router;
use axum::http::Method;
use di::{Injectable, ServiceCollection};
use di_axum::RouterServiceProviderExtensions;
use log::{info, warn};
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(web_server_task(settings))
}

async fn web_server_task(settings: Settings) -> anyhow::Result<()> {
    let database = DatabaseConnection::connect(&settings).await?;
    sqlx::migrate!().run(&*database).await?;

    let provider = ServiceCollection::new()
        .add(DatabaseConnection::singleton((*database).clone()))
        .add(DbConversationRepository::scoped())
        .add(DbUserRepository::scoped())
        .add(DbConversationService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("failed to build service provider: {e:?}"))?;

    let app = Router::new()
        .nest("/conversations", api::conversations::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_origin(AllowOrigin::list(settings.allowed_origins)),
        )
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(settings.bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
