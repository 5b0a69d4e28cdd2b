pub mod api;
pub mod audit;
pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod models;
pub mod server;
pub mod services;

pub use config::*;
pub use errors::*;
pub use models::*;
pub use server::{ApiServer, AppState};

pub use audit::{AuditContext, AuditSink, TracingAuditSink};
pub use backend::{MemoryBackend, NamespaceBackend, ValidationBackend};
pub use services::{NamespaceService, ValidationService};

pub use api::{ClusterResolver, create_middleware_stack};
pub use bootstrap::build_api_server_from_env;
