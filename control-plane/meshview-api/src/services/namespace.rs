use crate::{
    audit::{AuditContext, AuditSink},
    backend::NamespaceBackend,
    errors::BackendError,
    models::{Namespace, PatchPayload},
};
use std::sync::Arc;
use tracing::info;

pub struct NamespaceService {
    backend: Arc<dyn NamespaceBackend>,
    audit: Arc<dyn AuditSink>,
}

impl NamespaceService {
    pub fn new(
        backend: Arc<dyn NamespaceBackend>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self { backend, audit }
    }

    pub async fn get_namespaces(&self) -> Result<Vec<Namespace>, BackendError> {
        info!("Listing namespaces");
        self.backend.get_namespaces().await
    }

    /// Applies `patch` through the backend, then records exactly one audit
    /// entry. Nothing is audited when the backend rejects the patch.
    pub async fn update_namespace(
        &self,
        ctx: &AuditContext,
        namespace: &str,
        cluster: &str,
        patch: &PatchPayload,
    ) -> Result<Namespace, BackendError> {
        info!(%namespace, %cluster, "Updating namespace");
        let updated =
            self.backend.update_namespace(namespace, patch, cluster).await?;
        self.audit.audit(ctx, &update_audit_message(namespace, patch));
        Ok(updated)
    }
}

pub fn update_audit_message(namespace: &str, patch: &PatchPayload) -> String {
    format!("UPDATE on Namespace: {} Patch: {}", namespace, patch.as_text())
}
