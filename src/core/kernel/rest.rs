use crate::core::errors::ExchangeError;
use crate::core::types::Params;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{instrument, trace};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// REST client trait for making HTTP requests
///
/// Each call is exactly one network attempt against an absolute URL. Retry
/// policy is layered on top by [`crate::core::kernel::Transport`].
#[async_trait]
pub trait RestClient: Send + Sync {
    /// GET with `params` URL-encoded into the query string
    async fn get(&self, url: &str, params: &Params) -> Result<Value, ExchangeError>;

    /// POST with `params` form-encoded into the body
    async fn post(&self, url: &str, params: &Params) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(exchange_name: String) -> Self {
        Self {
            exchange_name,
            timeout_seconds: 30,
            user_agent: "okex-rest/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::RequestFailure(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestRest {
    pub fn new(exchange_name: String) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(exchange_name)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Decode the body as JSON regardless of HTTP status
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ExchangeError::RequestFailure(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", response_text);

        serde_json::from_str(&response_text).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "HTTP {} returned a non-JSON body: {}",
                status, e
            ))
        })
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, params), fields(exchange = %self.config.exchange_name, url = %url, param_count = params.len()))]
    async fn get(&self, url: &str, params: &Params) -> Result<Value, ExchangeError> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .query(&params.to_pairs())
            .send()
            .await?;

        self.handle_response(response).await
    }

    #[instrument(skip(self, params), fields(exchange = %self.config.exchange_name, url = %url, param_count = params.len()))]
    async fn post(&self, url: &str, params: &Params) -> Result<Value, ExchangeError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&params.to_pairs())
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_client_builds_with_custom_config() {
        let config = RestClientConfig::new("okex".to_string())
            .with_timeout(5)
            .with_user_agent("test-agent".to_string());
        let rest = RestClientBuilder::new(config).build().unwrap();

        assert_eq!(rest.config().timeout_seconds, 5);
        assert_eq!(rest.config().user_agent, "test-agent");
        assert_eq!(rest.config().exchange_name, "okex");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_request_error() {
        let rest = RestClientBuilder::new(RestClientConfig::new("okex".to_string()).with_timeout(2))
            .build()
            .unwrap();

        let result = rest.post("http://127.0.0.1:9/api/v1/userinfo.do", &Params::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_refused_connection_is_not_transient() {
        let rest = ReqwestRest::new("okex".to_string()).unwrap();

        let result = rest.get("http://127.0.0.1:9/tls/ticker.do", &Params::new()).await;
        assert!(matches!(result, Err(ExchangeError::RequestFailure(_))));
    }

    /// Answers a single request with `status_line` and `body`, returns the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_post_non_json_body_is_deserialization_error() {
        let base = serve_once("502 Bad Gateway", "<html>oops</html>").await;
        let rest = ReqwestRest::new("okex".to_string()).unwrap();

        let result = rest.post(&format!("{}/api/v1/userinfo.do", base), &Params::new()).await;

        match result {
            Err(ExchangeError::DeserializationError(message)) => assert!(message.contains("502")),
            other => panic!("expected DeserializationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_null_body_is_ok_null() {
        let base = serve_once("200 OK", "null").await;
        let rest = ReqwestRest::new("okex".to_string()).unwrap();

        let result = rest.post(&format!("{}/api/v1/userinfo.do", base), &Params::new()).await;
        assert_eq!(result.unwrap(), Value::Null);
    }
}
