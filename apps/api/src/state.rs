use crate::resume::service::ResumeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Aggregate service; owns the store (and through it, the connection pool).
    pub resume: ResumeService,
}
