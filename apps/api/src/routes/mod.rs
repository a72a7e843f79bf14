pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/resume",
            get(handlers::handle_get_resume).post(handlers::handle_create_resume),
        )
        .route(
            "/api/resume/experiences",
            post(handlers::handle_create_experience),
        )
        .route("/api/resume/skills", post(handlers::handle_create_skill))
        .route(
            "/api/resume/:id",
            get(handlers::handle_get_resume_by_id)
                .put(handlers::handle_update_resume)
                .delete(handlers::handle_delete_resume),
        )
        .with_state(state)
}
