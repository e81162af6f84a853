//! Redis JSON cache shared by the directory, profile and query stores.

use redis::Client as RedisClient;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

const KEY_PREFIX: &str = "talent-match";

#[derive(Clone)]
pub struct RedisCache {
    client: RedisClient,
    ttl_secs: u64,
}

impl RedisCache {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    /// Same connection, different expiry.
    pub fn with_ttl(&self, ttl_secs: u64) -> Self {
        Self {
            client: self.client.clone(),
            ttl_secs,
        }
    }

    pub fn key(parts: &[&str]) -> String {
        let mut key = KEY_PREFIX.to_string();
        for part in parts {
            key.push(':');
            key.push_str(part);
        }
        key
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async::<_, Option<String>>(&mut conn)
            .await?;

        match raw {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw).map_err(anyhow::Error::from)?,
            )),
            None => Ok(None),
        }
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).map_err(anyhow::Error::from)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(raw)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
