//! AI-drafted job profile for a vacancy. The text is opaque markdown; nothing
//! downstream parses it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::cache::RedisCache;
use crate::errors::AppError;
use crate::llm_client::prompts::HR_ASSISTANT_SYSTEM;
use crate::llm_client::{CompletionOptions, LlmClient};
use crate::models::vacancy::JobLevel;

pub mod prompts;

use prompts::{JOB_PROFILE_MAX_TOKENS, JOB_PROFILE_PROMPT_TEMPLATE, JOB_PROFILE_TEMPERATURE};

#[async_trait]
pub trait ProfileGenerator: Send + Sync {
    async fn generate_profile(
        &self,
        role_name: &str,
        job_level: JobLevel,
        role_purpose: &str,
    ) -> Result<String, AppError>;
}

/// Drafts profiles through the LLM client, memoised in Redis per
/// (role, level, purpose).
pub struct LlmProfileGenerator {
    llm: LlmClient,
    cache: Option<RedisCache>,
}

impl LlmProfileGenerator {
    pub fn new(llm: LlmClient, cache: Option<RedisCache>) -> Self {
        Self { llm, cache }
    }
}

#[async_trait]
impl ProfileGenerator for LlmProfileGenerator {
    async fn generate_profile(
        &self,
        role_name: &str,
        job_level: JobLevel,
        role_purpose: &str,
    ) -> Result<String, AppError> {
        let key = profile_cache_key(role_name, job_level, role_purpose);

        if let Some(cache) = &self.cache {
            match cache.get_json::<String>(&key).await {
                Ok(Some(profile)) => {
                    debug!("Job profile served from cache ({key})");
                    return Ok(profile);
                }
                Ok(None) => {}
                Err(e) => warn!("Job profile cache read failed: {e}"),
            }
        }

        let prompt = build_profile_prompt(role_name, job_level, role_purpose);
        let options = CompletionOptions {
            max_tokens: JOB_PROFILE_MAX_TOKENS,
            temperature: JOB_PROFILE_TEMPERATURE,
        };

        let profile = self
            .llm
            .complete(HR_ASSISTANT_SYSTEM, &prompt, options)
            .await
            .map_err(|e| AppError::Llm(format!("Job profile generation failed: {e}")))?;

        info!("Generated job profile for {role_name} ({job_level})");

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_json(&key, &profile).await {
                warn!("Job profile cache write failed: {e}");
            }
        }

        Ok(profile)
    }
}

pub fn build_profile_prompt(role_name: &str, job_level: JobLevel, role_purpose: &str) -> String {
    JOB_PROFILE_PROMPT_TEMPLATE
        .replace("{role_name}", role_name)
        .replace("{job_level}", job_level.as_str())
        .replace("{role_purpose}", role_purpose)
}

fn profile_cache_key(role_name: &str, job_level: JobLevel, role_purpose: &str) -> String {
    let mut hasher = DefaultHasher::new();
    (role_name, job_level.as_str(), role_purpose).hash(&mut hasher);
    RedisCache::key(&["profile", &format!("{:016x}", hasher.finish())])
}
