use crate::error::SearchError;
use log::warn;
use std::future::Future;

/// Runs `operation` once per credential, in list order, until one attempt
/// succeeds. Quota and rate-limit failures advance to the next credential;
/// any other failure ends the rotation immediately. The credential list is
/// never mutated, only walked.
pub async fn execute_with_rotation<T, F, Fut>(
    credentials: &[String],
    mut operation: F,
) -> Result<T, SearchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    if credentials.is_empty() {
        return Err(SearchError::NoCredentials);
    }

    for (index, key) in credentials.iter().enumerate() {
        match operation(key.clone()).await {
            Ok(result) => return Ok(result),
            Err(err) if err.is_retryable() => {
                warn!(
                    "credential #{} of {} unavailable: {err}",
                    index + 1,
                    credentials.len()
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(SearchError::CredentialsExhausted(credentials.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn first_success_stops_the_rotation() {
        let tried = RefCell::new(Vec::new());
        let result = execute_with_rotation(&keys(&["a", "b", "c"]), |key| {
            tried.borrow_mut().push(key.clone());
            async move { Ok::<_, SearchError>(key) }
        })
        .await;

        assert_eq!(result.unwrap(), "a");
        assert_eq!(*tried.borrow(), keys(&["a"]));
    }

    #[tokio::test]
    async fn quota_failures_advance_to_the_next_credential() {
        let tried = RefCell::new(Vec::new());
        let result = execute_with_rotation(&keys(&["a", "b", "c"]), |key| {
            tried.borrow_mut().push(key.clone());
            async move {
                if key == "c" {
                    Ok(key)
                } else {
                    Err(SearchError::QuotaExceeded("quotaExceeded".into()))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "c");
        assert_eq!(*tried.borrow(), keys(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn exhausting_every_credential_reports_the_count() {
        let tried = RefCell::new(0usize);
        let result: Result<(), _> = execute_with_rotation(&keys(&["a", "b", "c"]), |_| {
            *tried.borrow_mut() += 1;
            async { Err(SearchError::RateLimited("slow down".into())) }
        })
        .await;

        assert!(matches!(result, Err(SearchError::CredentialsExhausted(3))));
        assert_eq!(*tried.borrow(), 3);
    }

    #[tokio::test]
    async fn fatal_failures_are_not_retried_across_credentials() {
        let tried = RefCell::new(0usize);
        let result: Result<(), _> = execute_with_rotation(&keys(&["a", "b"]), |_| {
            *tried.borrow_mut() += 1;
            async { Err(SearchError::Upstream("invalid query".into())) }
        })
        .await;

        assert!(matches!(result, Err(SearchError::Upstream(_))));
        assert_eq!(*tried.borrow(), 1);
    }

    #[tokio::test]
    async fn empty_credential_list_fails_without_invoking_the_operation() {
        let tried = RefCell::new(0usize);
        let result: Result<(), _> = execute_with_rotation(&[], |_| {
            *tried.borrow_mut() += 1;
            async { Ok(()) }
        })
        .await;

        assert!(matches!(result, Err(SearchError::NoCredentials)));
        assert_eq!(*tried.borrow(), 0);
    }
}
