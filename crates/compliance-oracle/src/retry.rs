// Bounded retry around oracle calls
use crate::config::RetryPolicy;
use crate::error::OracleError;
use std::future::Future;
use tracing::warn;

/// Run `op` until it succeeds, fails permanently, or attempts run out
///
/// Only errors with [`OracleError::is_retryable`] are retried. The last
/// error is returned once the policy is exhausted.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, OracleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    call = label,
                    attempt,
                    max_attempts = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Oracle call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
