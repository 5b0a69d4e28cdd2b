use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::{
    api::ClusterResolver,
    audit::TracingAuditSink,
    backend::MemoryBackend,
    config::AppConfig,
    server::{ApiServer, AppState},
    services::{NamespaceService, ValidationService},
};

/// Build a fully-wired ApiServer from environment variables.
/// Mirrors the logic in bin/main and is useful for tests and embedding.
pub async fn build_api_server_from_env() -> Result<ApiServer> {
    let config = AppConfig::load_from_env()?;
    build_api_server(&config).await
}

pub async fn build_api_server(config: &AppConfig) -> Result<ApiServer> {
    let backend = match &config.backend().seed_path {
        Some(path) => MemoryBackend::load_seed(path).await?,
        None => {
            info!("No backend seed configured, starting empty");
            MemoryBackend::new()
        }
    };
    let backend = Arc::new(backend);

    let audit_config = config.audit();
    let audit = Arc::new(TracingAuditSink::new(audit_config.enabled));

    let cluster_config = config.cluster();
    info!("Home cluster: {}", cluster_config.home_cluster);

    let state = AppState {
        namespace_service: Arc::new(NamespaceService::new(
            backend.clone(),
            audit,
        )),
        validation_service: Arc::new(ValidationService::new(backend)),
        resolver: ClusterResolver::new(cluster_config.home_cluster),
        audit_user_header: audit_config.user_header,
    };

    Ok(ApiServer::new(state, config.server()))
}
