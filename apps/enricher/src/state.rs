use std::sync::Arc;

use crate::config::Config;
use crate::enrichment::enricher::Enricher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the generation adapter behind `Arc<dyn TextGenerator>`.
    pub enricher: Arc<Enricher>,
    #[allow(dead_code)]
    pub config: Config,
}
