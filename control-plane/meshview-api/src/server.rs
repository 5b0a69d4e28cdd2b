use crate::{
    api::{ClusterResolver, create_middleware_stack, handlers},
    config::ServerConfig,
    services::{NamespaceService, ValidationService},
};
use axum::{
    Router,
    routing::{get, patch},
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub namespace_service: Arc<NamespaceService>,
    pub validation_service: Arc<ValidationService>,
    pub resolver: ClusterResolver,
    pub audit_user_header: String,
}

pub struct ApiServer {
    app: Router,
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        let app = build_router(state).layer(create_middleware_stack());
        Self { app, config }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind((
            self.config.host.as_str(),
            self.config.port,
        ))
        .await?;
        let addr = listener.local_addr()?;

        info!("meshview API server listening on {}", addr);
        info!("Health check available at: http://{}/health", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Consume and return the underlying Axum Router so callers can serve it
    /// themselves, e.g. through `oneshot` in tests.
    pub fn into_router(self) -> Router {
        self.app
    }
}

/// All API routes, without middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Namespace APIs
        .route("/api/namespaces", get(handlers::list_namespaces))
        .route(
            "/api/namespaces/{namespace}",
            patch(handlers::update_namespace),
        )
        .route(
            "/api/namespaces/{namespace}/validations",
            get(handlers::namespace_validation_summary),
        )
        // Multi-cluster namespace APIs
        .route(
            "/api/clusters/{cluster}/namespaces/{namespace}",
            patch(handlers::update_namespace),
        )
        // Validation APIs
        .route(
            "/api/istio/validations",
            get(handlers::config_validation_summary),
        )
        // Health check endpoint
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "meshview-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
