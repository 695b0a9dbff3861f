//! Upstream record sources and the retry policy wrapped around them.

pub mod inspire;
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::record::Record;

pub use inspire::InspireClient;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
    #[error("{what}: giving up after {attempts} attempts")]
    Exhausted {
        what: &'static str,
        attempts: u32,
        source: Box<FetchError>,
    },
}

pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Somewhere records (and their serialized BibTeX) can be fetched from.
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &str;

    /// Records matching `query`, most recent first.
    fn fetch_records<'a>(&'a self, query: &'a str) -> FetchFuture<'a, Vec<Record>>;

    /// The same search, serialized as one BibTeX blob.
    fn fetch_bibtex<'a>(&'a self, query: &'a str) -> FetchFuture<'a, String>;
}

/// Exponential backoff: after failed attempt `k` (0-based) wait
/// `base_delay * 2^k`. No wait follows the last attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Run `op` until it succeeds or `policy.max_attempts` is used up.
///
/// The final failure is wrapped in [`FetchError::Exhausted`].
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    what: &'static str,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempt += 1;
                tracing::warn!(what, attempt, error = %e, "fetch attempt failed");
                if attempt >= max_attempts {
                    return Err(FetchError::Exhausted {
                        what,
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                tokio::time::sleep(policy.delay_after(attempt - 1)).await;
            }
        }
    }
}

/// `source.fetch_records` under `policy`.
pub async fn fetch_records_with_retry(
    source: &dyn RecordSource,
    query: &str,
    policy: &RetryPolicy,
) -> Result<Vec<Record>, FetchError> {
    fetch_with_retry(policy, "records", || source.fetch_records(query)).await
}

/// `source.fetch_bibtex` under `policy`.
pub async fn fetch_bibtex_with_retry(
    source: &dyn RecordSource,
    query: &str,
    policy: &RetryPolicy,
) -> Result<String, FetchError> {
    fetch_with_retry(policy, "bibtex", || source.fetch_bibtex(query)).await
}
