use std::sync::Arc;

use crate::analysis::job_analyzer::JobAnalyzer;
use crate::config::Config;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// In-memory sessions; nothing is persisted.
    pub sessions: SessionStore,
    /// Pluggable job analyzer. Default: KeywordJobAnalyzer. Chosen via JOB_ANALYZER env.
    pub analyzer: Arc<dyn JobAnalyzer>,
}
