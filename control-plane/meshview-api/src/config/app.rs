use anyhow::Result;
use envconfig::Envconfig;
use std::path::PathBuf;
use tracing::warn;

/// Cluster name used when neither the request nor the environment names one.
pub const DEFAULT_HOME_CLUSTER: &str = "Kubernetes";

#[derive(Debug, Clone, Envconfig)]
pub struct AppConfig {
    // Server configuration
    #[envconfig(from = "SERVER_HOST", default = "0.0.0.0")]
    pub server_host: String,

    #[envconfig(from = "SERVER_PORT", default = "8080")]
    pub server_port: u16,

    // Multi-cluster configuration
    #[envconfig(from = "HOME_CLUSTER", default = "Kubernetes")]
    pub home_cluster: String,

    // Audit configuration
    #[envconfig(from = "AUDIT_LOG_ENABLED", default = "true")]
    pub audit_log_enabled: bool,

    #[envconfig(from = "AUDIT_USER_HEADER", default = "x-remote-user")]
    pub audit_user_header: String,

    // Backend configuration
    #[envconfig(from = "BACKEND_SEED_PATH")]
    pub backend_seed_path: Option<String>,

    // Observability configuration
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    #[envconfig(from = "LOG_FORMAT", default = "plain")]
    pub log_format: String,
}

impl AppConfig {
    /// Load configuration from environment variables only
    pub fn load_from_env() -> Result<Self> {
        Ok(Self::init_from_env()?)
    }

    pub fn server(&self) -> ServerConfig {
        ServerConfig {
            host: self.server_host.clone(),
            port: self.server_port,
        }
    }

    pub fn cluster(&self) -> ClusterConfig {
        let home = self.home_cluster.trim();
        let home_cluster = if home.is_empty() {
            warn!(
                "HOME_CLUSTER is empty, falling back to '{}'.",
                DEFAULT_HOME_CLUSTER
            );
            DEFAULT_HOME_CLUSTER.to_string()
        } else {
            home.to_string()
        };
        ClusterConfig { home_cluster }
    }

    pub fn audit(&self) -> AuditConfig {
        AuditConfig {
            enabled: self.audit_log_enabled,
            user_header: self.audit_user_header.to_ascii_lowercase(),
        }
    }

    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            seed_path: self
                .backend_seed_path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub home_cluster: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            home_cluster: DEFAULT_HOME_CLUSTER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub enabled: bool,
    pub user_header: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_header: "x-remote-user".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}
