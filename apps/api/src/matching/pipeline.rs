//! The Generate action and the display refreshes that follow it.
//!
//! Flow: validate benchmarks → score + directory → derive dashboard →
//!       (vacancy insert → audit insert) ∥ profile generation → store result.
//!
//! Every external failure becomes a notice. Ranking needs both the scores and
//! the directory, and the audit insert needs the vacancy id and a ranked list;
//! all other steps run regardless.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::{call_external, CallPolicy};
use crate::llm_client::completion_budget;
use crate::matching::ranking::RankedCandidate;
use crate::matching::{build_dashboard, compare_candidate, CandidateComparison, Dashboard};
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::vacancy::{AuditRecord, JobLevel, NewVacancy};
use crate::session::LastQueryResult;
use crate::state::AppState;

pub const MAX_BENCHMARKS: usize = 3;

/// Request body for the Generate action.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub role_name: String,
    #[serde(default)]
    pub job_level: JobLevel,
    pub role_purpose: String,
    pub benchmark_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-visible outcome of one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub result: LastQueryResult,
    pub dashboard: Dashboard,
    pub notices: Vec<Notice>,
}

/// Trims ids, drops duplicates keeping first occurrence, and enforces 1..=3.
pub fn validate_benchmarks(benchmark_ids: &[String]) -> Result<Vec<String>, AppError> {
    let mut ids: Vec<String> = Vec::with_capacity(benchmark_ids.len());
    for raw in benchmark_ids {
        let id = raw.trim();
        if id.is_empty() {
            return Err(AppError::Validation(
                "Benchmark employee ids cannot be blank.".to_string(),
            ));
        }
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }

    if ids.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one benchmark employee.".to_string(),
        ));
    }
    if ids.len() > MAX_BENCHMARKS {
        return Err(AppError::Validation(format!(
            "Select up to {MAX_BENCHMARKS} benchmark employees (got {}).",
            ids.len()
        )));
    }

    Ok(ids)
}

/// Runs the Generate action end to end.
pub async fn run_generate(
    state: &AppState,
    request: GenerateRequest,
) -> Result<GenerateOutcome, AppError> {
    let benchmark_ids = validate_benchmarks(&request.benchmark_ids)?;
    let timeout = state.config.external_call_timeout;
    let mut notices = Vec::new();

    info!(
        "Generating matches for {} ({}) against {} benchmark(s)",
        request.role_name,
        request.job_level,
        benchmark_ids.len()
    );

    let scoring = CallPolicy::read("talent scoring", timeout);
    let (rows, directory) = tokio::join!(
        call_external(&scoring, || state.reference.score_talent(&benchmark_ids)),
        fetch_directory(state),
    );

    let rows = match rows {
        Ok(rows) if rows.is_empty() => {
            notices.push(Notice::warning("Query executed but returned no data."));
            Some(rows)
        }
        Ok(rows) => Some(rows),
        Err(e) => {
            warn!("Talent scoring failed: {e}");
            notices.push(Notice::error(format!("Failed to score talent: {e}")));
            None
        }
    };
    let directory = match directory {
        Ok(directory) => Some(directory),
        Err(e) => {
            warn!("Employee directory read failed: {e}");
            notices.push(Notice::error(format!("Failed to load employee directory: {e}")));
            None
        }
    };

    // Ranking needs both reads; the other steps do not.
    let dashboard = match (&rows, &directory) {
        (Some(rows), Some(directory)) => {
            if !rows.is_empty() {
                notices.push(Notice::success("Analysis complete."));
            }
            build_dashboard(rows, directory)
        }
        _ => build_dashboard(&[], &[]),
    };

    let inputs = NewVacancy {
        role_name: request.role_name,
        job_level: request.job_level,
        role_purpose: request.role_purpose,
        benchmark_ids,
    };

    let ((vacancy_id, audit_notices), (profile, profile_notice)) = tokio::join!(
        register_vacancy(state, &inputs, &dashboard.ranked),
        generate_profile(state, &inputs),
    );
    notices.extend(audit_notices);
    notices.extend(profile_notice);

    let scored = rows.is_some();
    let result = LastQueryResult {
        query_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        inputs,
        rows: rows.unwrap_or_default(),
        vacancy_id,
        profile,
    };

    // Without scoring rows there is nothing to re-derive later.
    if scored {
        let save = CallPolicy::write("query store", timeout);
        if let Err(e) = call_external(&save, || state.queries.save(&result)).await {
            warn!("Failed to store query {}: {e}", result.query_id);
            notices.push(Notice::warning(format!(
                "Results could not be saved for later viewing: {e}"
            )));
        }
    }

    Ok(GenerateOutcome {
        result,
        dashboard,
        notices,
    })
}

/// Re-derives the dashboard for a stored query.
pub async fn load_dashboard(
    state: &AppState,
    query_id: Uuid,
) -> Result<(LastQueryResult, Dashboard), AppError> {
    let result = load_result(state, query_id).await?;
    let directory = fetch_directory(state).await?;
    let dashboard = build_dashboard(&result.rows, &directory);
    Ok((result, dashboard))
}

/// Comparison for one ranked candidate of a stored query.
pub async fn load_comparison(
    state: &AppState,
    query_id: Uuid,
    employee_id: &str,
) -> Result<CandidateComparison, AppError> {
    let (result, dashboard) = load_dashboard(state, query_id).await?;

    if !dashboard
        .ranked
        .iter()
        .any(|candidate| candidate.employee_id == employee_id)
    {
        return Err(AppError::NotFound(format!(
            "Employee {employee_id} is not a ranked candidate of query {query_id}"
        )));
    }

    Ok(compare_candidate(&result.rows, employee_id))
}

pub async fn fetch_directory(state: &AppState) -> Result<Vec<EmployeeDirectoryEntry>, AppError> {
    let policy = CallPolicy::read("employee directory", state.config.external_call_timeout);
    call_external(&policy, || state.reference.list_employees()).await
}

async fn load_result(state: &AppState, query_id: Uuid) -> Result<LastQueryResult, AppError> {
    let policy = CallPolicy::read("query store", state.config.external_call_timeout);
    call_external(&policy, || state.queries.load(query_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Query {query_id} not found or expired")))
}

/// Vacancy insert, then the audit snapshot if the insert produced an id and
/// there is at least one ranked candidate.
async fn register_vacancy(
    state: &AppState,
    inputs: &NewVacancy,
    ranked: &[RankedCandidate],
) -> (Option<Uuid>, Vec<Notice>) {
    let timeout = state.config.external_call_timeout;
    let mut notices = Vec::new();

    let insert = CallPolicy::write("vacancy insert", timeout);
    let vacancy_id = match call_external(&insert, || state.audit.create_vacancy(inputs)).await {
        Ok(id) => {
            notices.push(Notice::success(format!("Vacancy registered (ID: {id})")));
            id
        }
        Err(e) => {
            warn!("Vacancy insert failed: {e}");
            notices.push(Notice::error(format!("Failed to insert vacancy: {e}")));
            return (None, notices);
        }
    };

    if ranked.is_empty() {
        return (Some(vacancy_id), notices);
    }

    let records: Vec<AuditRecord> = ranked
        .iter()
        .map(|c| AuditRecord::placeholder(&c.employee_id, c.final_match_rate))
        .collect();

    let audit = CallPolicy::write("audit insert", timeout);
    match call_external(&audit, || state.audit.record_audit(vacancy_id, &records)).await {
        Ok(()) => notices.push(Notice::success("Audit trail recorded.")),
        Err(e) => {
            warn!("Audit insert failed for vacancy {vacancy_id}: {e}");
            notices.push(Notice::error(format!("Failed to store audit trail: {e}")));
        }
    }

    (Some(vacancy_id), notices)
}

async fn generate_profile(state: &AppState, inputs: &NewVacancy) -> (Option<String>, Option<Notice>) {
    let budget = completion_budget(state.config.external_call_timeout);
    let policy = CallPolicy::write("job profile generation", budget);
    let call = call_external(&policy, || {
        state
            .profiles
            .generate_profile(&inputs.role_name, inputs.job_level, &inputs.role_purpose)
    })
    .await;

    match call {
        Ok(profile) => (Some(profile), None),
        Err(e) => {
            warn!("Job profile generation failed: {e}");
            (
                None,
                Some(Notice::warning(format!("Failed to generate AI profile: {e}"))),
            )
        }
    }
}
