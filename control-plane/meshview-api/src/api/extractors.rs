// Request context resolution: cluster defaulting, namespace lists and the
// audit context of the caller.

use crate::{audit::AuditContext, server::AppState};
use axum::{
    extract::{FromRequestParts, Query},
    http::{Uri, request::Parts},
};
use serde::Deserialize;
use std::convert::Infallible;

/// Substitutes the home cluster when a request names none.
#[derive(Debug, Clone)]
pub struct ClusterResolver {
    home_cluster: String,
}

impl ClusterResolver {
    pub fn new(home_cluster: impl Into<String>) -> Self {
        Self {
            home_cluster: home_cluster.into(),
        }
    }

    pub fn resolve(&self, requested: Option<&str>) -> String {
        match requested {
            Some(cluster) if !cluster.is_empty() => cluster.to_string(),
            _ => self.home_cluster.clone(),
        }
    }
}

/// Splits a comma-separated namespace list, keeping request order.
/// Segments are kept as sent; only empty ones are dropped, so "" and "a,,b"
/// never yield an empty name.
pub fn parse_namespaces(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Query string as ordered pairs. Never rejects: an undecodable query is
/// treated as empty, and lookups return the first value for a key.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Self(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

/// Path variables of the namespace mutation routes. `cluster` is only
/// present on the cluster-scoped route.
#[derive(Debug, Clone, Deserialize)]
pub struct NamespacePath {
    pub namespace: String,
    #[serde(default)]
    pub cluster: Option<String>,
}

impl FromRequestParts<AppState> for AuditContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(AuditContext::from_request(
            &parts.method,
            &parts.uri,
            &parts.headers,
            &state.audit_user_header,
        ))
    }
}
