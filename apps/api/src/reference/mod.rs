//! Seams to the external Postgres: the employee directory, the
//! `get_talent_matches` scoring function and the vacancy audit tables.
//!
//! `AppState` carries these as trait objects so the pipeline can be driven
//! by in-memory fakes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;
use crate::models::vacancy::{AuditRecord, NewVacancy};

pub mod cached;
pub mod postgres;

#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// All employees, ordered by fullname.
    async fn list_employees(&self) -> Result<Vec<EmployeeDirectoryEntry>, AppError>;

    /// Runs the scoring function for 1–3 benchmark ids. The caller validates the ids.
    async fn score_talent(&self, benchmark_ids: &[String]) -> Result<Vec<ScoredRow>, AppError>;
}

#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Inserts the vacancy and returns its generated id.
    async fn create_vacancy(&self, vacancy: &NewVacancy) -> Result<Uuid, AppError>;

    async fn record_audit(&self, vacancy_id: Uuid, records: &[AuditRecord])
        -> Result<(), AppError>;
}
