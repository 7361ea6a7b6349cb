use crate::core::errors::ExchangeError;
use crate::core::kernel::{RestClient, Signer, Transport};
use crate::core::types::Params;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Composes OKEx request parameters and dispatches them over a shared transport
///
/// Public market data goes out as plain GET. Authenticated calls get
/// `api_key` injected and `sign` appended before being POSTed; without a
/// signer they fail before any network I/O.
pub struct OkexRest<R: RestClient> {
    transport: Arc<Transport<R>>,
    signer: Option<Arc<dyn Signer>>,
}

impl<R: RestClient> Clone for OkexRest<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            signer: self.signer.clone(),
        }
    }
}

impl<R: RestClient> std::fmt::Debug for OkexRest<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkexRest")
            .field("policy", self.transport.policy())
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: RestClient> OkexRest<R> {
    pub fn new(transport: Arc<Transport<R>>, signer: Option<Arc<dyn Signer>>) -> Self {
        Self { transport, signer }
    }

    pub fn can_sign(&self) -> bool {
        self.signer.is_some()
    }

    pub fn transport(&self) -> &Transport<R> {
        &self.transport
    }

    /// Inject `api_key` and append `sign`
    pub fn signed_params(&self, mut params: Params) -> Result<Params, ExchangeError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ExchangeError::MissingCredentials)?;

        params.insert("api_key", signer.api_key());
        let signature = signer.sign(&params)?;
        params.insert("sign", signature);
        Ok(params)
    }

    #[instrument(skip(self, params), fields(exchange = "okex", url = %url))]
    pub async fn public_get(&self, url: &str, params: Params) -> Result<Value, ExchangeError> {
        self.transport.get(url, &params).await
    }

    #[instrument(skip(self, params), fields(exchange = "okex", url = %url))]
    pub async fn signed_post(&self, url: &str, params: Params) -> Result<Value, ExchangeError> {
        let params = self.signed_params(params)?;
        self.transport.post(url, &params).await
    }
}
