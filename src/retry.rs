//! Retry policy for transient libraries.io failures.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use crate::catalog::HttpVerb;
use crate::error::{LibrariesError, Result};

/// Statuses retried by default.
pub const DEFAULT_STATUS_FORCELIST: [u16; 4] = [500, 502, 503, 504];
/// Verbs whose requests are re-sent after a retryable status or a timeout.
///
/// POST is not idempotent: a POST that reached the server is never re-sent,
/// so its 5xx surfaces on the first attempt. Connection failures are still
/// retried for every verb.
pub const STATUS_RETRY_VERBS: [HttpVerb; 3] = [HttpVerb::Get, HttpVerb::Put, HttpVerb::Delete];
/// Retries after the first attempt, by default.
pub const DEFAULT_TOTAL: u32 = 3;
/// Default backoff factor, in seconds.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.2;

const BACKOFF_MAX: Duration = Duration::from_secs(120);

/// How often and how patiently to retry a request.
///
/// Retries happen on connection errors for every verb. Timeouts and any
/// status in `status_forcelist` are retried only for [`STATUS_RETRY_VERBS`].
/// The n-th retry waits `backoff_factor * 2^(n-1)`
/// seconds, capped at two minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub total: u32,
    /// Base delay in seconds.
    pub backoff_factor: f64,
    /// Statuses worth retrying.
    pub status_forcelist: BTreeSet<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            status_forcelist: DEFAULT_STATUS_FORCELIST.into_iter().collect(),
        }
    }
}

enum Verdict {
    Done,
    Retry(Option<u16>),
}

impl RetryPolicy {
    /// Build a policy; an empty status list falls back to the defaults.
    #[must_use]
    pub fn new(
        total: u32,
        backoff_factor: f64,
        status_forcelist: impl IntoIterator<Item = u16>,
    ) -> Self {
        let mut statuses: BTreeSet<u16> = status_forcelist.into_iter().collect();
        if statuses.is_empty() {
            statuses = DEFAULT_STATUS_FORCELIST.into_iter().collect();
        }
        Self {
            total,
            backoff_factor: backoff_factor.max(0.0),
            status_forcelist: statuses,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn never() -> Self {
        Self {
            total: 0,
            ..Self::default()
        }
    }

    /// Whether `status` should be retried.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Whether a request with `verb` may be re-sent once it reached the server.
    pub fn retries_after_response(verb: HttpVerb) -> bool {
        STATUS_RETRY_VERBS.contains(&verb)
    }

    /// Delay before the given retry (1-indexed).
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exp = 2f64.powi(retry.saturating_sub(1).min(30) as i32);
        let secs = self.backoff_factor * exp;
        Duration::try_from_secs_f64(secs)
            .unwrap_or(BACKOFF_MAX)
            .min(BACKOFF_MAX)
    }

    /// Run `send` until it succeeds, fails permanently or the budget runs out.
    ///
    /// Non-retryable statuses are handed back unchanged for the caller to
    /// interpret.
    pub(crate) async fn send<F, Fut>(
        &self,
        label: &str,
        verb: HttpVerb,
        mut send: F,
    ) -> Result<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = reqwest::Result<reqwest::Response>>,
    {
        let resend = Self::retries_after_response(verb);
        let mut retries = 0u32;
        loop {
            let attempt = send().await;
            let verdict = match &attempt {
                Ok(resp) if resend && self.is_retryable_status(resp.status().as_u16()) => {
                    Verdict::Retry(Some(resp.status().as_u16()))
                }
                Err(err) if err.is_connect() => Verdict::Retry(None),
                Err(err) if resend && err.is_timeout() => Verdict::Retry(None),
                _ => Verdict::Done,
            };

            let last_status = match verdict {
                Verdict::Done => return attempt.map_err(LibrariesError::HttpError),
                Verdict::Retry(status) => status,
            };

            if retries >= self.total {
                return Err(LibrariesError::RetriesExhausted {
                    attempts: retries + 1,
                    last_status,
                });
            }

            retries += 1;
            let delay = self.backoff(retries);
            tracing::warn!(
                "{} request failed (status {:?}, retry {}/{}), retrying in {:.1}s",
                label,
                last_status,
                retries,
                self.total,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.total, 3);
        for status in [500, 502, 503, 504] {
            assert!(policy.is_retryable_status(status));
        }
        assert!(!policy.is_retryable_status(404));
        assert!(!policy.is_retryable_status(429));
    }

    #[test]
    fn test_empty_forcelist_uses_defaults() {
        let policy = RetryPolicy::new(5, 0.5, []);
        assert_eq!(policy.status_forcelist, RetryPolicy::default().status_forcelist);

        let policy = RetryPolicy::new(1, 0.5, [429]);
        assert!(policy.is_retryable_status(429));
        assert!(!policy.is_retryable_status(500));
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let policy = RetryPolicy::new(3, 0.2, []);
        assert_eq!(policy.backoff(0), Duration::ZERO);
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
        assert_eq!(policy.backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::new(40, 10.0, []);
        assert_eq!(policy.backoff(30), Duration::from_secs(120));
    }

    #[test]
    fn test_post_is_not_resent_after_response() {
        assert!(!RetryPolicy::retries_after_response(HttpVerb::Post));
        for verb in [HttpVerb::Get, HttpVerb::Put, HttpVerb::Delete] {
            assert!(RetryPolicy::retries_after_response(verb));
        }
    }

    #[test]
    fn test_never_policy_has_no_retries() {
        assert_eq!(RetryPolicy::never().total, 0);
    }
}
