#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use meshview_api::{
    AuditContext, AuditSink, BackendError, ClusterResolver, NamespaceService,
    ValidationService,
    backend::{BackendResult, NamespaceBackend, ValidationBackend},
    models::{Namespace, PatchPayload, ValidationResults},
    server::{AppState, build_router},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tower::ServiceExt;

pub const HOME: &str = "Kubernetes";
pub const USER_HEADER: &str = "x-remote-user";

/// Namespace backend returning canned results and recording calls.
#[derive(Default)]
pub struct FakeNamespaceBackend {
    pub namespaces: Vec<Namespace>,
    pub failure: Option<BackendError>,
    pub updates: Mutex<Vec<(String, String, String)>>,
}

impl FakeNamespaceBackend {
    pub fn with_namespaces(namespaces: Vec<Namespace>) -> Self {
        Self {
            namespaces,
            ..Default::default()
        }
    }

    pub fn failing(err: BackendError) -> Self {
        Self {
            failure: Some(err),
            ..Default::default()
        }
    }

    /// (namespace, patch text, cluster) per update call.
    pub fn update_calls(&self) -> Vec<(String, String, String)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl NamespaceBackend for FakeNamespaceBackend {
    async fn get_namespaces(&self) -> BackendResult<Vec<Namespace>> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.namespaces.clone()),
        }
    }

    async fn update_namespace(
        &self,
        namespace: &str,
        patch: &PatchPayload,
        cluster: &str,
    ) -> BackendResult<Namespace> {
        self.updates.lock().unwrap().push((
            namespace.to_string(),
            patch.as_text().into_owned(),
            cluster.to_string(),
        ));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(Namespace::new(namespace, cluster)
                .with_label("updated", "true")),
        }
    }
}

/// Validation backend returning one canned result set and counting calls.
#[derive(Default)]
pub struct FakeValidationBackend {
    pub results: ValidationResults,
    pub failure: Option<BackendError>,
    pub calls: AtomicUsize,
    pub scopes: Mutex<Vec<(String, String)>>,
}

impl FakeValidationBackend {
    pub fn with_results(results: ValidationResults) -> Self {
        Self {
            results,
            ..Default::default()
        }
    }

    pub fn failing(err: BackendError) -> Self {
        Self {
            failure: Some(err),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (cluster, namespace) per call.
    pub fn scopes(&self) -> Vec<(String, String)> {
        self.scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValidationBackend for FakeValidationBackend {
    async fn get_validations(
        &self,
        cluster: &str,
        namespace: &str,
        _object_type: &str,
        _object_name: &str,
    ) -> BackendResult<ValidationResults> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scopes
            .lock()
            .unwrap()
            .push((cluster.to_string(), namespace.to_string()));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.results.clone()),
        }
    }
}

#[derive(Default)]
pub struct RecordingAuditSink {
    pub records: Mutex<Vec<(AuditContext, String)>>,
}

impl RecordingAuditSink {
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl AuditSink for RecordingAuditSink {
    fn audit(&self, ctx: &AuditContext, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push((ctx.clone(), message.to_string()));
    }
}

pub struct TestApp {
    pub router: Router,
    pub namespaces: Arc<FakeNamespaceBackend>,
    pub validations: Arc<FakeValidationBackend>,
    pub audit: Arc<RecordingAuditSink>,
}

pub fn create_test_app(
    namespaces: FakeNamespaceBackend,
    validations: FakeValidationBackend,
) -> TestApp {
    let namespaces = Arc::new(namespaces);
    let validations = Arc::new(validations);
    let audit = Arc::new(RecordingAuditSink::default());
    let state = AppState {
        namespace_service: Arc::new(NamespaceService::new(
            namespaces.clone(),
            audit.clone(),
        )),
        validation_service: Arc::new(ValidationService::new(
            validations.clone(),
        )),
        resolver: ClusterResolver::new(HOME),
        audit_user_header: USER_HEADER.to_string(),
    };
    TestApp {
        router: build_router(state),
        namespaces,
        validations,
        audit,
    }
}

pub async fn send(
    router: &Router,
    request: Request<Body>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)?
    };
    Ok((status, json))
}

pub async fn get(
    router: &Router,
    uri: &str,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    send(router, Request::builder().uri(uri).body(Body::empty())?).await
}
