use std::sync::Arc;

use crate::config::Config;
use crate::profile::ProfileGenerator;
use crate::reference::{AuditSink, ReferenceDataProvider};
use crate::session::QueryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Employee directory (Redis-cached) and the scoring function.
    pub reference: Arc<dyn ReferenceDataProvider>,
    pub audit: Arc<dyn AuditSink>,
    pub profiles: Arc<dyn ProfileGenerator>,
    pub queries: Arc<dyn QueryStore>,
    pub config: Config,
}
