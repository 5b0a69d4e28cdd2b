use crate::{
    api::extractors::{QueryParams, parse_namespaces},
    models::ValidationSummaries,
    server::AppState,
};
use axum::{Json, extract::State};
use tracing::info;

/// Summaries for every namespace in `namespaces`. Backend failures are
/// logged by the service and answered with an empty object.
pub async fn config_validation_summary(
    State(state): State<AppState>,
    params: QueryParams,
) -> Json<ValidationSummaries> {
    let namespaces = parse_namespaces(params.get("namespaces"));
    let cluster = state.resolver.resolve(params.get("cluster"));
    info!(
        "API: Getting validation summaries for {:?} in cluster {}",
        namespaces, cluster
    );

    Json(
        state
            .validation_service
            .namespaces_summary(&cluster, &namespaces)
            .await,
    )
}
