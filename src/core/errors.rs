use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Api_key and secret_key are required for authenticated endpoints")]
    MissingCredentials,

    #[error("Transient transport failure after {attempts} attempt(s): {message}")]
    TransientTransport { attempts: u32, message: String },

    #[error("Request failed: {0}")]
    RequestFailure(String),

    #[error("Failed to deserialize response: {0}")]
    DeserializationError(String),

    #[error("Failed to serialize parameters: {0}")]
    SerializationError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Whether the request may be re-sent unchanged
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransientTransport { .. })
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if err.is_connect() && caused_by_tls(&err) {
            return Self::TransientTransport {
                attempts: 1,
                message: err.to_string(),
            };
        }
        Self::RequestFailure(err.to_string())
    }
}

/// TLS failure below the top-level error, whose message carries the request URL.
fn caused_by_tls(err: &dyn std::error::Error) -> bool {
    err.source().is_some_and(is_tls_failure)
}

/// Walks the source chain looking for a TLS handshake failure.
fn is_tls_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string().to_ascii_lowercase();
        if text.contains("tls") || text.contains("ssl") || text.contains("handshake") {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapped(&'static str, Option<Box<Wrapped>>);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1
                .as_deref()
                .map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_tls_failure_found_in_source_chain() {
        let err = Wrapped(
            "error trying to connect",
            Some(Box::new(Wrapped("SSL routines: handshake failure", None))),
        );
        assert!(is_tls_failure(&err));
    }

    #[test]
    fn test_plain_connect_failure_is_not_tls() {
        let err = Wrapped(
            "error trying to connect",
            Some(Box::new(Wrapped("connection refused", None))),
        );
        assert!(!is_tls_failure(&err));
    }

    #[test]
    fn test_url_in_top_level_message_is_ignored() {
        let err = Wrapped(
            "error sending request for url (http://ssl-proxy.local/tls/handshake.do)",
            Some(Box::new(Wrapped("tcp connect error: connection refused", None))),
        );
        assert!(!caused_by_tls(&err));

        let err = Wrapped(
            "error sending request for url (http://127.0.0.1/ticker.do)",
            Some(Box::new(Wrapped("tls handshake eof", None))),
        );
        assert!(caused_by_tls(&err));
    }

    #[test]
    fn test_only_transport_failures_are_transient() {
        let transient = ExchangeError::TransientTransport {
            attempts: 1,
            message: "handshake".to_string(),
        };
        assert!(transient.is_transient());
        assert!(!ExchangeError::MissingCredentials.is_transient());
        assert!(!ExchangeError::RequestFailure("boom".to_string()).is_transient());
    }
}
