pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::enrichment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Enrichment API
        .route("/api/v1/enrich", post(handlers::handle_enrich))
        .route(
            "/api/v1/enrich/job-analysis",
            post(handlers::handle_job_analysis),
        )
        .with_state(state)
}
