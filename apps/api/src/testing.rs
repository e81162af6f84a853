//! In-memory fakes for the external collaborators, used by pipeline and route tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::matching::test_support::{directory, scored};
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;
use crate::models::vacancy::{AuditRecord, JobLevel, NewVacancy};
use crate::profile::ProfileGenerator;
use crate::reference::{AuditSink, ReferenceDataProvider};
use crate::session::{LastQueryResult, QueryStore};
use crate::state::AppState;

pub struct FakeReferenceData {
    pub directory: Vec<EmployeeDirectoryEntry>,
    pub rows: Vec<ScoredRow>,
    fail_scoring: bool,
    fail_directory: bool,
    score_calls: AtomicUsize,
}

impl FakeReferenceData {
    /// One benchmark (B1) and two candidates: E2 (88) ahead of E1 (64).
    pub fn sample() -> Self {
        Self {
            directory: directory(&[("B1", "Bench"), ("E1", "Alice"), ("E2", "Bob")]),
            rows: vec![
                scored("B1", 100.0, true, Some(("Competency", 80.0))),
                scored("B1", 100.0, true, Some(("Behavioral (Strengths)", 70.0))),
                scored("E1", 64.0, false, Some(("Competency", 60.0))),
                scored("E1", 64.0, false, Some(("Behavioral (Strengths)", 90.0))),
                scored("E2", 88.0, false, Some(("Competency", 85.0))),
                scored("E2", 88.0, false, Some(("Behavioral (Strengths)", 40.0))),
            ],
            fail_scoring: false,
            fail_directory: false,
            score_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_scoring() -> Self {
        Self {
            fail_scoring: true,
            ..Self::sample()
        }
    }

    pub fn failing_directory() -> Self {
        Self {
            fail_directory: true,
            ..Self::sample()
        }
    }

    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            ..Self::sample()
        }
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceDataProvider for FakeReferenceData {
    async fn list_employees(&self) -> Result<Vec<EmployeeDirectoryEntry>, AppError> {
        if self.fail_directory {
            return Err(AppError::Internal(anyhow::anyhow!("employees unavailable")));
        }
        Ok(self.directory.clone())
    }

    async fn score_talent(&self, _benchmark_ids: &[String]) -> Result<Vec<ScoredRow>, AppError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_scoring {
            return Err(AppError::Internal(anyhow::anyhow!("get_talent_matches failed")));
        }
        Ok(self.rows.clone())
    }
}

#[derive(Default)]
pub struct FakeAuditSink {
    fail_vacancy: bool,
    fail_audit: bool,
    vacancies: Mutex<Vec<NewVacancy>>,
    audits: Mutex<Vec<(Uuid, Vec<AuditRecord>)>>,
}

impl FakeAuditSink {
    pub fn failing_vacancy() -> Self {
        Self {
            fail_vacancy: true,
            ..Self::default()
        }
    }

    pub fn failing_audit() -> Self {
        Self {
            fail_audit: true,
            ..Self::default()
        }
    }

    pub fn vacancies(&self) -> Vec<NewVacancy> {
        self.vacancies.lock().unwrap().clone()
    }

    pub fn audits(&self) -> Vec<(Uuid, Vec<AuditRecord>)> {
        self.audits.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for FakeAuditSink {
    async fn create_vacancy(&self, vacancy: &NewVacancy) -> Result<Uuid, AppError> {
        if self.fail_vacancy {
            return Err(AppError::Internal(anyhow::anyhow!("job_vacancies unavailable")));
        }
        self.vacancies.lock().unwrap().push(vacancy.clone());
        Ok(Uuid::new_v4())
    }

    async fn record_audit(
        &self,
        vacancy_id: Uuid,
        records: &[AuditRecord],
    ) -> Result<(), AppError> {
        if self.fail_audit {
            return Err(AppError::Internal(anyhow::anyhow!("talent_match_audit unavailable")));
        }
        self.audits
            .lock()
            .unwrap()
            .push((vacancy_id, records.to_vec()));
        Ok(())
    }
}

pub struct FakeProfileGenerator {
    fail: bool,
}

impl FakeProfileGenerator {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ProfileGenerator for FakeProfileGenerator {
    async fn generate_profile(
        &self,
        role_name: &str,
        job_level: JobLevel,
        _role_purpose: &str,
    ) -> Result<String, AppError> {
        if self.fail {
            return Err(AppError::Llm("upstream unavailable".to_string()));
        }
        Ok(format!("## Job Requirements\n- {job_level} {role_name}"))
    }
}

#[derive(Default)]
pub struct MemoryQueryStore {
    results: Mutex<HashMap<Uuid, LastQueryResult>>,
}

impl MemoryQueryStore {
    pub fn get(&self, query_id: Uuid) -> Option<LastQueryResult> {
        self.results.lock().unwrap().get(&query_id).cloned()
    }
}

#[async_trait]
impl QueryStore for MemoryQueryStore {
    async fn save(&self, result: &LastQueryResult) -> Result<(), AppError> {
        self.results
            .lock()
            .unwrap()
            .insert(result.query_id, result.clone());
        Ok(())
    }

    async fn load(&self, query_id: Uuid) -> Result<Option<LastQueryResult>, AppError> {
        Ok(self.get(query_id))
    }
}

/// Handles to the fakes wired into a test `AppState`.
pub struct Fakes {
    pub reference: Arc<FakeReferenceData>,
    pub audit: Arc<FakeAuditSink>,
    pub queries: Arc<MemoryQueryStore>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/talent_match_test".to_string(),
        redis_url: "redis://localhost/".to_string(),
        llm_api_key: None,
        port: 0,
        rust_log: "debug".to_string(),
        external_call_timeout: Duration::from_secs(5),
        cache_ttl_secs: 60,
        query_ttl_secs: 60,
    }
}

pub fn test_state() -> (AppState, Fakes) {
    let fakes = Fakes {
        reference: Arc::new(FakeReferenceData::sample()),
        audit: Arc::new(FakeAuditSink::default()),
        queries: Arc::new(MemoryQueryStore::default()),
    };

    let state = AppState {
        reference: fakes.reference.clone(),
        audit: fakes.audit.clone(),
        profiles: Arc::new(FakeProfileGenerator::ok()),
        queries: fakes.queries.clone(),
        config: test_config(),
    };

    (state, fakes)
}
