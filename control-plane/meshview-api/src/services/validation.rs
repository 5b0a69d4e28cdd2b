use crate::{
    backend::ValidationBackend,
    errors::BackendError,
    models::{ValidationSummaries, ValidationSummary},
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Derives per-namespace validation summaries from one backend fetch.
pub struct ValidationService {
    backend: Arc<dyn ValidationBackend>,
}

impl ValidationService {
    pub fn new(backend: Arc<dyn ValidationBackend>) -> Self {
        Self { backend }
    }

    pub async fn namespace_summary(
        &self,
        cluster: &str,
        namespace: &str,
    ) -> Result<ValidationSummary, BackendError> {
        info!(%cluster, %namespace, "Summarizing namespace validations");
        let results = self
            .backend
            .get_validations(cluster, namespace, "", "")
            .await?;
        Ok(results.summarize(namespace))
    }

    /// Fetches the whole cluster once and summarizes each namespace from it.
    /// A backend failure yields an empty map, not an error.
    pub async fn namespaces_summary(
        &self,
        cluster: &str,
        namespaces: &[String],
    ) -> ValidationSummaries {
        info!(
            %cluster,
            count = namespaces.len(),
            "Summarizing validations for namespaces"
        );
        let fetched = self.backend.get_validations(cluster, "", "", "").await;
        let results = match fetched {
            Ok(results) => results,
            Err(e) => {
                error!(
                    %cluster,
                    "Failed to fetch validations, returning empty summary: {}",
                    e
                );
                return ValidationSummaries::new();
            }
        };

        let summaries: ValidationSummaries = namespaces
            .iter()
            .map(|ns| (ns.clone(), results.summarize(ns)))
            .collect();
        debug!(
            %cluster,
            objects = results.len(),
            namespaces = summaries.len(),
            "Summarized validations"
        );
        summaries
    }
}
