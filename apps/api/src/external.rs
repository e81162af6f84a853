//! Timeout and retry policy for calls to the database, Redis and the LLM.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::AppError;

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct CallPolicy {
    pub label: &'static str,
    pub timeout: Duration,
    pub attempts: u32,
}

impl CallPolicy {
    /// Idempotent call: one retry on a transient failure.
    pub fn read(label: &'static str, timeout: Duration) -> Self {
        Self {
            label,
            timeout,
            attempts: 2,
        }
    }

    /// Non-idempotent call: never repeated.
    pub fn write(label: &'static str, timeout: Duration) -> Self {
        Self {
            label,
            timeout,
            attempts: 1,
        }
    }
}

/// Runs `op` under `policy`, re-invoking it after a transient failure while
/// attempts remain. Each attempt is bounded by `policy.timeout`.
pub async fn call_external<T, F, Fut>(policy: &CallPolicy, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let error = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e,
            Err(_) => AppError::Timeout(policy.label.to_string()),
        };

        if attempt >= attempts || !error.is_transient() {
            return Err(error);
        }

        warn!(
            "{} attempt {attempt} failed ({error}), retrying after {}ms",
            policy.label,
            RETRY_BACKOFF.as_millis()
        );
        tokio::time::sleep(RETRY_BACKOFF).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_read_retries_once_on_transient_failure() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = CallPolicy::read("scoring", Duration::from_secs(5));

        let result = call_external(&policy, || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::Timeout("scoring".to_string()))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_gives_up_after_two_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = CallPolicy::read("scoring", Duration::from_secs(5));

        let result: Result<(), AppError> = call_external(&policy, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Timeout("scoring".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::Timeout(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_is_never_repeated() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = CallPolicy::write("vacancy insert", Duration::from_secs(5));

        let result: Result<(), AppError> = call_external(&policy, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Timeout("vacancy insert".to_string()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = CallPolicy::read("scoring", Duration::from_secs(5));

        let result: Result<(), AppError> = call_external(&policy, || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Validation("bad".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let policy = CallPolicy::write("profile", Duration::from_secs(1));

        let result: Result<(), AppError> = call_external(&policy, || async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Timeout(label)) if label == "profile"));
    }
}
