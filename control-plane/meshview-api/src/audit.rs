use axum::http::{HeaderMap, Method, Uri};
use tracing::info;

/// Who asked for a mutation, and through which route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditContext {
    pub user: Option<String>,
    pub method: String,
    pub path: String,
}

impl AuditContext {
    pub fn from_request(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        user_header: &str,
    ) -> Self {
        let user = headers
            .get(user_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Self {
            user,
            method: method.to_string(),
            path: uri.path().to_string(),
        }
    }
}

/// Receives audit records for successful mutations. Fire-and-forget: the
/// caller does not wait on persistence and cannot observe failures.
pub trait AuditSink: Send + Sync {
    fn audit(&self, ctx: &AuditContext, message: &str);
}

/// Writes audit records to the `audit` tracing target.
#[derive(Debug, Clone)]
pub struct TracingAuditSink {
    enabled: bool,
}

impl TracingAuditSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AuditSink for TracingAuditSink {
    fn audit(&self, ctx: &AuditContext, message: &str) {
        if !self.enabled {
            return;
        }
        let user = ctx.user.as_deref().unwrap_or("");
        info!(
            target: "audit",
            method = %ctx.method,
            path = %ctx.path,
            "AUDIT User [{}] Msg [{}]",
            user,
            message
        );
    }
}
