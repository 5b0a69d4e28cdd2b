use crate::{
    backend::traits::*,
    errors::BackendError,
    models::{Namespace, ObjectValidation, PatchPayload, ValidationResults},
};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

type NamespaceKey = (String, String);

/// Startup data for [`MemoryBackend`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSeed {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    #[serde(default)]
    pub validations: Vec<ObjectValidation>,
}

/// In-process namespace store and validation source, keyed by cluster.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    namespaces: Arc<RwLock<BTreeMap<NamespaceKey, Namespace>>>,
    validations: Arc<RwLock<Vec<ObjectValidation>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: BackendSeed) -> Self {
        let namespaces = seed
            .namespaces
            .into_iter()
            .map(|ns| ((ns.cluster.clone(), ns.name.clone()), ns))
            .collect();
        Self {
            namespaces: Arc::new(RwLock::new(namespaces)),
            validations: Arc::new(RwLock::new(seed.validations)),
        }
    }

    pub async fn load_seed(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path).await.with_context(|| {
            format!("failed to read backend seed {}", path.display())
        })?;
        let seed: BackendSeed = serde_json::from_slice(&raw).with_context(
            || format!("invalid backend seed {}", path.display()),
        )?;
        info!(
            namespaces = seed.namespaces.len(),
            validations = seed.validations.len(),
            "Loaded backend seed from {}",
            path.display()
        );
        Ok(Self::from_seed(seed))
    }
}

#[async_trait]
impl NamespaceBackend for MemoryBackend {
    async fn get_namespaces(&self) -> BackendResult<Vec<Namespace>> {
        let store = self.namespaces.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn update_namespace(
        &self,
        namespace: &str,
        patch: &PatchPayload,
        cluster: &str,
    ) -> BackendResult<Namespace> {
        let patch: Value = serde_json::from_slice(patch.as_bytes())
            .map_err(|e| {
                BackendError::Invalid(format!("patch is not JSON: {e}"))
            })?;
        if !patch.is_object() {
            return Err(BackendError::Invalid(
                "patch must be a JSON object".to_string(),
            ));
        }

        let mut store = self.namespaces.write().await;
        let key = (cluster.to_string(), namespace.to_string());
        let current = store.get(&key).ok_or_else(|| {
            BackendError::NotFound(format!(
                "namespace {namespace} in cluster {cluster}"
            ))
        })?;

        let updated = apply_metadata_patch(current, &patch)?;
        debug!(%namespace, %cluster, "Applied namespace patch");
        store.insert(key, updated.clone());
        Ok(updated)
    }
}

#[async_trait]
impl ValidationBackend for MemoryBackend {
    async fn get_validations(
        &self,
        cluster: &str,
        namespace: &str,
        object_type: &str,
        object_name: &str,
    ) -> BackendResult<ValidationResults> {
        let store = self.validations.read().await;
        let results: ValidationResults = store
            .iter()
            .filter(|v| v.cluster == cluster)
            .filter(|v| namespace.is_empty() || v.namespace == namespace)
            .filter(|v| object_type.is_empty() || v.object_type == object_type)
            .filter(|v| object_name.is_empty() || v.name == object_name)
            .cloned()
            .collect();
        debug!(
            %cluster,
            %namespace,
            count = results.len(),
            "Served validations from memory"
        );
        Ok(results)
    }
}

/// Merge `patch` into the `{"metadata": {labels, annotations}}` projection
/// of `current`. Other fields of the patch are accepted and ignored.
fn apply_metadata_patch(
    current: &Namespace,
    patch: &Value,
) -> BackendResult<Namespace> {
    let mut doc = json!({
        "metadata": {
            "labels": current.labels,
            "annotations": current.annotations,
        }
    });
    merge_patch(&mut doc, patch);

    let metadata = doc.get("metadata");
    let mut updated = current.clone();
    updated.labels =
        string_map(metadata.and_then(|m| m.get("labels")), "labels")?;
    updated.annotations =
        string_map(metadata.and_then(|m| m.get("annotations")), "annotations")?;
    Ok(updated)
}

/// RFC 7386 JSON merge patch.
fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            if value.is_null() {
                target_map.remove(key);
            } else {
                merge_patch(
                    target_map.entry(key.clone()).or_insert(Value::Null),
                    value,
                );
            }
        }
    }
}

fn string_map(
    value: Option<&Value>,
    field: &str,
) -> BackendResult<BTreeMap<String, String>> {
    match value {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                _ => Err(BackendError::Invalid(format!(
                    "metadata.{field}.{k} must be a string"
                ))),
            })
            .collect(),
        Some(_) => Err(BackendError::Invalid(format!(
            "metadata.{field} must be an object"
        ))),
    }
}
