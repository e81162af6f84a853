use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::RedisCache;
use crate::errors::AppError;
use crate::models::employee::EmployeeDirectoryEntry;
use crate::models::scoring::ScoredRow;
use crate::reference::ReferenceDataProvider;

/// Serves the employee directory from Redis, falling back to the inner provider.
///
/// Scoring is never cached; every Generate action hits the database.
pub struct CachedDirectory {
    inner: Arc<dyn ReferenceDataProvider>,
    cache: RedisCache,
}

impl CachedDirectory {
    pub fn new(inner: Arc<dyn ReferenceDataProvider>, cache: RedisCache) -> Self {
        Self { inner, cache }
    }

    fn directory_key() -> String {
        RedisCache::key(&["employees"])
    }
}

#[async_trait]
impl ReferenceDataProvider for CachedDirectory {
    async fn list_employees(&self) -> Result<Vec<EmployeeDirectoryEntry>, AppError> {
        let key = Self::directory_key();

        match self.cache.get_json::<Vec<EmployeeDirectoryEntry>>(&key).await {
            Ok(Some(employees)) => {
                debug!("Employee directory served from cache");
                return Ok(employees);
            }
            Ok(None) => debug!("Employee directory cache miss"),
            Err(e) => warn!("Employee directory cache read failed: {e}"),
        }

        let employees = self.inner.list_employees().await?;

        if let Err(e) = self.cache.put_json(&key, &employees).await {
            warn!("Employee directory cache write failed: {e}");
        }

        Ok(employees)
    }

    async fn score_talent(&self, benchmark_ids: &[String]) -> Result<Vec<ScoredRow>, AppError> {
        self.inner.score_talent(benchmark_ids).await
    }
}
