use std::sync::Arc;

use crate::logbook::store::LogStore;
use crate::taxonomy::SkillTaxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub taxonomy: Arc<SkillTaxonomy>,
    /// Pluggable log store. Default: FileLogStore. Swap via LOG_BACKEND env.
    pub log_store: Arc<dyn LogStore>,
}
