use crate::{
    api::extractors::{NamespacePath, QueryParams},
    audit::AuditContext,
    errors::ApiError,
    models::{Namespace, PatchPayload, ValidationSummary},
    server::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
};
use tracing::{error, info};

pub async fn list_namespaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<Namespace>>, ApiError> {
    info!("API: Listing namespaces");

    match state.namespace_service.get_namespaces().await {
        Ok(namespaces) => Ok(Json(namespaces)),
        Err(e) => {
            error!("Failed to list namespaces: {}", e);
            Err(ApiError::InternalServerError(e.to_string()))
        }
    }
}

pub async fn namespace_validation_summary(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    params: QueryParams,
) -> Result<Json<ValidationSummary>, ApiError> {
    let cluster = state.resolver.resolve(params.get("cluster"));
    info!(
        "API: Getting validation summary for namespace {} in cluster {}",
        namespace, cluster
    );

    match state
        .validation_service
        .namespace_summary(&cluster, &namespace)
        .await
    {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            error!(
                "Failed to get validations for namespace {} in cluster {}: {}",
                namespace, cluster, e
            );
            Err(ApiError::InternalServerError(e.to_string()))
        }
    }
}

pub async fn update_namespace(
    State(state): State<AppState>,
    Path(path): Path<NamespacePath>,
    audit_ctx: AuditContext,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Namespace>, ApiError> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            error!(
                "Failed to read update patch for namespace {}: {}",
                path.namespace, e
            );
            return Err(ApiError::BadRequest(format!(
                "Update request with bad update patch: {}",
                e
            )));
        }
    };
    let patch = PatchPayload::from(body);
    let cluster = state.resolver.resolve(path.cluster.as_deref());
    info!(
        "API: Updating namespace {} in cluster {}",
        path.namespace, cluster
    );

    match state
        .namespace_service
        .update_namespace(&audit_ctx, &path.namespace, &cluster, &patch)
        .await
    {
        Ok(namespace) => Ok(Json(namespace)),
        Err(e) => {
            error!(
                "Failed to update namespace {} in cluster {}: {}",
                path.namespace, cluster, e
            );
            Err(ApiError::Backend(e))
        }
    }
}
