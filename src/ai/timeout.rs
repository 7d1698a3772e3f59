//! Bounded Provider Calls
//!
//! Every provider call is wrapped in a timeout and retried at most once, and
//! only when the failure is classified as retryable.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::complete_bounded;
//!
//! let response = complete_bounded(&provider, &prompt, Duration::from_secs(120)).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::provider::{LlmProvider, LlmResponse};
use crate::constants::retry::{MAX_ATTEMPTS, MAX_DELAY_MS};
use crate::types::{DocError, ErrorClassifier, Result};

/// Execute an async operation with a timeout
///
/// Returns a timeout error if the operation doesn't complete within the specified duration.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(DocError::timeout(operation_name, timeout)),
    }
}

/// Call the provider under `timeout`, retrying once on a retryable failure
pub async fn complete_bounded(
    provider: &(dyn LlmProvider + Send + Sync),
    prompt: &str,
    timeout: Duration,
) -> Result<LlmResponse> {
    let mut attempt: u8 = 1;
    loop {
        let result = with_timeout(timeout, provider.complete(prompt), "text generation").await;

        let err = match result {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        let classified = ErrorClassifier::classify_doc_error(&err, provider.name());
        if attempt >= MAX_ATTEMPTS || !classified.is_retryable() {
            return Err(DocError::Generation(classified));
        }

        let delay = classified
            .recommended_delay()
            .min(Duration::from_millis(MAX_DELAY_MS));
        warn!(
            "Generation attempt {} failed ({}), retrying in {:?}",
            attempt, classified.category, delay
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::testing::{FnProvider, ScriptedProvider};
    use crate::types::{ErrorCategory, LlmError};

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, DocError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, DocError>(42)
            },
            "slow operation",
        )
        .await;
        assert!(matches!(result.unwrap_err(), DocError::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_failure_is_retried_once() {
        let provider = ScriptedProvider::new(vec![
            Err(LlmError::new(ErrorCategory::Transient, "overloaded").into()),
            Ok("Done.".to_string()),
        ]);
        let response = complete_bounded(&provider, "p", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(response.content, "Done.");
    }

    #[tokio::test]
    async fn test_auth_failure_is_not_retried() {
        let provider = FnProvider::new(|_: &str| {
            Err(DocError::from(LlmError::new(
                ErrorCategory::Auth,
                "invalid api key",
            )))
        });
        let err = complete_bounded(&provider, "p", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(provider.calls(), 1);
        assert!(matches!(err, DocError::Generation(e) if e.category == ErrorCategory::Auth));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_two_attempts() {
        let provider =
            FnProvider::new(|_: &str| Err(DocError::LlmApi("connection reset".to_string())));
        let err = complete_bounded(&provider, "p", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(provider.calls(), 2);
        assert!(err.is_generation());
    }
}
