use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig, RetryPolicy};
use crate::exchanges::okex::connector::OkexConnector;
use std::time::Duration;

/// Builder for creating OKEx connectors
///
/// ```rust,no_run
/// use okex_rest::exchanges::okex::OkexBuilder;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let okex = OkexBuilder::new()
///     .with_rest_timeout(10)
///     .with_max_retries(2)
///     .with_deadline(Duration::from_secs(5))
///     .build()?;
///
/// let depth = okex.spot.depth("ltc_btc", 20).await?;
/// println!("{}", depth);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OkexBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    retry_policy: RetryPolicy,
}

impl Default for OkexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OkexBuilder {
    /// Read-only builder with default settings
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            rest_timeout: 30,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping any base URL already configured
    pub fn with_credentials(mut self, api_key: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(api_key, secret_key);
        self.config.base_url = base_url;
        self
    }

    /// Set base URL (domain) for every endpoint
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    /// Retries after the first GET attempt on transient TLS failures
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.retry_policy.max_retries = retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_policy.backoff = backoff;
        self
    }

    /// Cap on a GET including all of its retries
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.retry_policy.deadline = Some(deadline);
        self
    }

    pub fn build(self) -> Result<OkexConnector<ReqwestRest>, ExchangeError> {
        if let Some(base_url) = &self.config.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(ExchangeError::InvalidParameters(format!(
                    "Base URL must be absolute: {}",
                    base_url
                )));
            }
        }

        let rest_config =
            RestClientConfig::new("okex".to_string()).with_timeout(self.rest_timeout);
        let rest = RestClientBuilder::new(rest_config).build()?;

        Ok(OkexConnector::new(rest, &self.config, self.retry_policy))
    }
}

/// Build a connector from configuration with default transport settings
pub fn build_connector(config: ExchangeConfig) -> Result<OkexConnector<ReqwestRest>, ExchangeError> {
    OkexBuilder::new().with_config(config).build()
}
