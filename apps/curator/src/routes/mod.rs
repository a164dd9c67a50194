pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::curation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Validation screen
        .route("/api/v1/samples", get(handlers::handle_list_samples))
        .route(
            "/api/v1/samples/:index/critique",
            post(handlers::handle_critique_sample),
        )
        // Editing screen
        .route(
            "/api/v1/examples",
            get(handlers::handle_list_examples).post(handlers::handle_add_example),
        )
        .route(
            "/api/v1/examples/:id",
            get(handlers::handle_get_example)
                .put(handlers::handle_update_example)
                .delete(handlers::handle_delete_example),
        )
        .route(
            "/api/v1/examples/:id/validate",
            post(handlers::handle_validate_example),
        )
        .route("/api/v1/drafts", post(handlers::handle_draft_example))
        .route("/api/v1/export", get(handlers::handle_export))
        .with_state(state)
}
