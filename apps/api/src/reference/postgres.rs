use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;
use crate::models::vacancy::{AuditRecord, NewVacancy};
use crate::reference::{AuditSink, ReferenceDataProvider};

/// Postgres-backed directory, scoring and audit store.
#[derive(Clone)]
pub struct PgTalentStore {
    pool: PgPool,
}

impl PgTalentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a small pool; each request issues at most a handful of queries.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ReferenceDataProvider for PgTalentStore {
    async fn list_employees(&self) -> Result<Vec<EmployeeDirectoryEntry>, AppError> {
        let employees = sqlx::query_as::<_, EmployeeDirectoryEntry>(
            "SELECT employee_id::text AS employee_id, fullname::text AS fullname \
             FROM employees ORDER BY fullname",
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Loaded {} employees from directory", employees.len());
        Ok(employees)
    }

    async fn score_talent(&self, benchmark_ids: &[String]) -> Result<Vec<ScoredRow>, AppError> {
        // Column casts pin the decoded types regardless of how the function declares them.
        let rows = sqlx::query_as::<_, ScoredRow>(
            r#"
            SELECT employee_id::text       AS employee_id,
                   role::text              AS role,
                   grade::text             AS grade,
                   directorate::text       AS directorate,
                   final_match_rate::float8 AS final_match_rate,
                   is_benchmark::bool      AS is_benchmark,
                   tgv_name::text          AS tgv_name,
                   tgv_match_rate::float8  AS tgv_match_rate
            FROM get_talent_matches($1::jsonb)
            "#,
        )
        .bind(Json(benchmark_ids))
        .fetch_all(&self.pool)
        .await?;

        info!(
            "Scoring returned {} rows for {} benchmark(s)",
            rows.len(),
            benchmark_ids.len()
        );
        Ok(rows)
    }
}

#[async_trait]
impl AuditSink for PgTalentStore {
    async fn create_vacancy(&self, vacancy: &NewVacancy) -> Result<Uuid, AppError> {
        let vacancy_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO job_vacancies (role_name, job_level, role_purpose, benchmark_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING vacancy_id
            "#,
        )
        .bind(&vacancy.role_name)
        .bind(vacancy.job_level.as_str())
        .bind(&vacancy.role_purpose)
        .bind(&vacancy.benchmark_ids)
        .fetch_one(&self.pool)
        .await?;

        info!("Registered vacancy {vacancy_id} ({})", vacancy.role_name);
        Ok(vacancy_id)
    }

    async fn record_audit(
        &self,
        vacancy_id: Uuid,
        records: &[AuditRecord],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO vacancy_audit
                    (vacancy_id, candidate_id, match_rate, gap_report, recommendations)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(vacancy_id)
            .bind(&record.candidate_id)
            .bind(record.match_rate)
            .bind(&record.gap_report)
            .bind(&record.recommendations)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "Recorded {} audit rows for vacancy {vacancy_id}",
            records.len()
        );
        Ok(())
    }
}
