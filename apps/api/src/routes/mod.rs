pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/employees", get(handlers::handle_list_employees))
        .route("/api/v1/job-levels", get(handlers::handle_job_levels))
        .route("/api/v1/matches", post(handlers::handle_generate))
        .route(
            "/api/v1/matches/:query_id",
            get(handlers::handle_get_dashboard),
        )
        .route(
            "/api/v1/matches/:query_id/candidates/:employee_id",
            get(handlers::handle_get_comparison),
        )
        .with_state(state)
}
