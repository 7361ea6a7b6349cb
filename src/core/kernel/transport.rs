use crate::core::errors::ExchangeError;
use crate::core::kernel::rest::RestClient;
use crate::core::types::Params;
use serde_json::Value;
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;
use tracing::{error, instrument, warn};

/// Bounded retry policy for GET requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; only transient transport failures are retried
    pub max_retries: u32,
    /// Fixed wait between attempts
    pub backoff: Duration,
    /// Upper bound on the whole attempt sequence, including backoff
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(500),
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// GET/POST dispatch over a [`RestClient`]
///
/// GET retries transient transport failures according to the [`RetryPolicy`];
/// POST is sent once and any failure is returned as-is.
#[derive(Debug)]
pub struct Transport<R: RestClient> {
    rest: R,
    policy: RetryPolicy,
}

impl<R: RestClient> Transport<R> {
    pub fn new(rest: R, policy: RetryPolicy) -> Self {
        Self { rest, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn rest(&self) -> &R {
        &self.rest
    }

    #[instrument(skip(self, params), fields(url = %url))]
    pub async fn get(&self, url: &str, params: &Params) -> Result<Value, ExchangeError> {
        match self.policy.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.get_with_retry(url, params))
                .await
                .map_err(|_| {
                    ExchangeError::Timeout(format!("GET {} exceeded {:?}", url, deadline))
                })?,
            None => self.get_with_retry(url, params).await,
        }
    }

    #[instrument(skip(self, params), fields(url = %url))]
    pub async fn post(&self, url: &str, params: &Params) -> Result<Value, ExchangeError> {
        self.rest.post(url, params).await
    }

    async fn get_with_retry(&self, url: &str, params: &Params) -> Result<Value, ExchangeError> {
        let strategy = FixedInterval::new(self.policy.backoff).take(self.policy.max_retries as usize);
        let mut attempts: u32 = 0;

        let result = RetryIf::start(
            strategy,
            || {
                attempts += 1;
                self.rest.get(url, params)
            },
            |e: &ExchangeError| {
                let retry = e.is_transient();
                if retry {
                    warn!(error = %e, backoff_ms = %self.policy.backoff.as_millis(), "Transient transport failure, retrying");
                }
                retry
            },
        )
        .await;

        match result {
            Err(ExchangeError::TransientTransport { message, .. }) => {
                error!(attempts, "Transient transport failure, retries exhausted");
                Err(ExchangeError::TransientTransport { attempts, message })
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails GET with a transient error for the first `failures` calls
    struct FlakyRest {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyRest {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RestClient for FlakyRest {
        async fn get(&self, _url: &str, _params: &Params) -> Result<Value, ExchangeError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                return Err(ExchangeError::TransientTransport {
                    attempts: 1,
                    message: "tls handshake eof".to_string(),
                });
            }
            Ok(json!({"date": "1", "ticker": {}}))
        }

        async fn post(&self, _url: &str, _params: &Params) -> Result<Value, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ExchangeError::TransientTransport {
                attempts: 1,
                message: "tls handshake eof".to_string(),
            })
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(max_retries)
            .with_backoff(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_get_retries_once_then_succeeds() {
        let transport = Transport::new(FlakyRest::new(1), fast_policy(1));
        let value = transport.get("https://x/ticker.do", &Params::new()).await.unwrap();

        assert_eq!(value, json!({"date": "1", "ticker": {}}));
        assert_eq!(transport.rest().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_retry_is_bounded() {
        let transport = Transport::new(FlakyRest::new(u32::MAX), fast_policy(2));
        let err = transport.get("https://x/ticker.do", &Params::new()).await.unwrap_err();

        match err {
            ExchangeError::TransientTransport { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.rest().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_post_is_never_retried() {
        let transport = Transport::new(FlakyRest::new(u32::MAX), fast_policy(5));
        let result = transport.post("https://x/trade.do", &Params::new()).await;

        assert!(result.is_err());
        assert_eq!(transport.rest().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deadline_caps_retry_sequence() {
        let policy = RetryPolicy::default()
            .with_max_retries(1000)
            .with_backoff(Duration::from_millis(20))
            .with_deadline(Duration::from_millis(50));
        let transport = Transport::new(FlakyRest::new(u32::MAX), policy);

        let err = transport.get("https://x/ticker.do", &Params::new()).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Timeout(_)));
    }

    #[test]
    fn test_default_policy_matches_single_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.backoff, Duration::from_millis(500));
        assert!(policy.deadline.is_none());
    }
}
