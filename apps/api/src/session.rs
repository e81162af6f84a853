//! The result of one Generate action, kept so later dashboard and comparison
//! requests re-derive from the same rows.
//!
//! Each Generate action writes a fresh `query_id`; nothing is ever updated in
//! place, so results derived from an older query can't go stale.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::RedisCache;
use crate::errors::AppError;
use crate::models::scoring::ScoredRow;
use crate::models::vacancy::NewVacancy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastQueryResult {
    pub query_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub inputs: NewVacancy,
    pub rows: Vec<ScoredRow>,
    pub vacancy_id: Option<Uuid>,
    pub profile: Option<String>,
}

#[async_trait]
pub trait QueryStore: Send + Sync {
    async fn save(&self, result: &LastQueryResult) -> Result<(), AppError>;

    async fn load(&self, query_id: Uuid) -> Result<Option<LastQueryResult>, AppError>;
}

/// Stores query results in Redis with the query TTL.
pub struct RedisQueryStore {
    cache: RedisCache,
}

impl RedisQueryStore {
    pub fn new(cache: RedisCache) -> Self {
        Self { cache }
    }

    fn query_key(query_id: Uuid) -> String {
        RedisCache::key(&["query", &query_id.to_string()])
    }
}

#[async_trait]
impl QueryStore for RedisQueryStore {
    async fn save(&self, result: &LastQueryResult) -> Result<(), AppError> {
        self.cache
            .put_json(&Self::query_key(result.query_id), result)
            .await
    }

    async fn load(&self, query_id: Uuid) -> Result<Option<LastQueryResult>, AppError> {
        self.cache.get_json(&Self::query_key(query_id)).await
    }
}
