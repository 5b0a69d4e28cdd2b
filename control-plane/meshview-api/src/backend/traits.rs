use crate::{
    errors::BackendError,
    models::{Namespace, PatchPayload, ValidationResults},
};
use async_trait::async_trait;

pub type BackendResult<T> = Result<T, BackendError>;

#[async_trait]
pub trait NamespaceBackend: Send + Sync {
    /// All namespaces visible to this control plane, across clusters.
    async fn get_namespaces(&self) -> BackendResult<Vec<Namespace>>;

    /// Apply `patch` to `namespace` in `cluster` and return the new state.
    /// The backend alone validates the patch.
    async fn update_namespace(
        &self,
        namespace: &str,
        patch: &PatchPayload,
        cluster: &str,
    ) -> BackendResult<Namespace>;
}

#[async_trait]
pub trait ValidationBackend: Send + Sync {
    /// Validation results for `cluster`. Empty `namespace`, `object_type`
    /// or `object_name` means no filter on that field.
    async fn get_validations(
        &self,
        cluster: &str,
        namespace: &str,
        object_type: &str,
        object_name: &str,
    ) -> BackendResult<ValidationResults>;
}
