//! Async retry utilities with exponential backoff

use std::time::Duration;

/// Retry an async operation with exponential backoff.
///
/// Only errors accepted by `is_retryable` are retried; anything else is
/// returned immediately. Returns the value on success, or `Err((error, attempts))`.
pub async fn retry_with_backoff_async<F, Fut, T, E, P>(
    max_attempts: u32,
    base_delay_ms: u64,
    is_retryable: P,
    mut operation: F,
) -> Result<T, (E, u32)>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempts >= max_attempts || !is_retryable(&e) {
                    return Err((e, attempts));
                }
                let delay = Duration::from_millis(base_delay_ms * 2_u64.pow(attempts - 1));
                tracing::warn!(
                    error = %e,
                    attempt = attempts,
                    delay_ms = delay.as_millis(),
                    "Retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_success_on_first_try() {
        let result =
            retry_with_backoff_async(3, 1, |_: &&str| true, || async { Ok::<_, &str>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_success_after_retry() {
        let attempts = AtomicU32::new(0);
        let result = retry_with_backoff_async(
            3,
            1,
            |_: &&str| true,
            || async {
                if attempts.fetch_add(1, Ordering::SeqCst) < 1 {
                    Err("transient error")
                } else {
                    Ok("done")
                }
            },
        )
        .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_after_max_retries() {
        let result = retry_with_backoff_async(
            3,
            1,
            |_: &&str| true,
            || async { Err::<(), _>("persistent error") },
        )
        .await;
        let (error, attempts) = result.unwrap_err();
        assert_eq!(error, "persistent error");
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff_async(
            5,
            1,
            |e: &&str| *e != "bad request",
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("bad request")
            },
        )
        .await;
        assert_eq!(result, Err(("bad request", 1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
