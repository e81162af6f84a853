//! Axum route handlers for the directory, Generate action, dashboard and comparison.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{
    fetch_directory, load_comparison, load_dashboard, run_generate, GenerateRequest, Notice,
};
use crate::matching::{CandidateComparison, Dashboard};
use crate::models::employee::EmployeeOption;
use crate::models::vacancy::{JobLevel, NewVacancy};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub query_id: Uuid,
    pub vacancy_id: Option<Uuid>,
    pub inputs: NewVacancy,
    pub profile: Option<String>,
    pub notices: Vec<Notice>,
    pub dashboard: Dashboard,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub query_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub vacancy_id: Option<Uuid>,
    pub inputs: NewVacancy,
    pub profile: Option<String>,
    pub dashboard: Dashboard,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/employees
///
/// Benchmark picker options, ordered by fullname.
pub async fn handle_list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeOption>>, AppError> {
    let directory = fetch_directory(&state).await?;
    Ok(Json(directory.iter().map(EmployeeOption::from).collect()))
}

/// GET /api/v1/job-levels
pub async fn handle_job_levels() -> Json<Vec<JobLevel>> {
    Json(JobLevel::ALL.to_vec())
}

/// POST /api/v1/matches
///
/// Scores talent against the selected benchmarks, registers the vacancy and
/// audit trail, drafts the job profile, and returns the dashboard.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let outcome = run_generate(&state, request).await?;
    let result = outcome.result;

    Ok(Json(GenerateResponse {
        query_id: result.query_id,
        vacancy_id: result.vacancy_id,
        inputs: result.inputs,
        profile: result.profile,
        notices: outcome.notices,
        dashboard: outcome.dashboard,
    }))
}

/// GET /api/v1/matches/:query_id
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(query_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, AppError> {
    let (result, dashboard) = load_dashboard(&state, query_id).await?;

    Ok(Json(DashboardResponse {
        query_id: result.query_id,
        generated_at: result.generated_at,
        vacancy_id: result.vacancy_id,
        inputs: result.inputs,
        profile: result.profile,
        dashboard,
    }))
}

/// GET /api/v1/matches/:query_id/candidates/:employee_id
pub async fn handle_get_comparison(
    State(state): State<AppState>,
    Path((query_id, employee_id)): Path<(Uuid, String)>,
) -> Result<Json<CandidateComparison>, AppError> {
    let comparison = load_comparison(&state, query_id, &employee_id).await?;
    Ok(Json(comparison))
}
