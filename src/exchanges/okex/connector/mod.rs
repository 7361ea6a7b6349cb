use crate::core::config::ExchangeConfig;
use crate::core::kernel::{RestClient, RetryPolicy, Signer, Transport};
use crate::exchanges::okex::endpoints::{EndpointRegistry, DEFAULT_DOMAIN};
use crate::exchanges::okex::rest::OkexRest;
use crate::exchanges::okex::signer::Md5Signer;
use std::sync::Arc;

pub mod future;
pub mod spot;

pub use future::FutureApi;
pub use spot::SpotApi;

/// OKEx connector grouping the spot and futures clients
///
/// Both clients share one transport and one credential.
#[derive(Debug)]
pub struct OkexConnector<R: RestClient> {
    pub spot: SpotApi<R>,
    pub future: FutureApi<R>,
}

impl<R: RestClient> OkexConnector<R> {
    pub fn new(rest: R, config: &ExchangeConfig, policy: RetryPolicy) -> Self {
        let signer: Option<Arc<dyn Signer>> = config.has_credentials().then(|| {
            Arc::new(Md5Signer::new(
                config.api_key().to_string(),
                config.secret_key().to_string(),
            )) as Arc<dyn Signer>
        });

        Self::with_signer(rest, config.base_url.as_deref(), policy, signer)
    }

    /// Build with an explicit signer, bypassing `ExchangeConfig`
    pub fn with_signer(
        rest: R,
        domain: Option<&str>,
        policy: RetryPolicy,
        signer: Option<Arc<dyn Signer>>,
    ) -> Self {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);
        let rest = OkexRest::new(Arc::new(Transport::new(rest, policy)), signer);

        Self {
            spot: SpotApi::new(rest.clone(), Arc::new(EndpointRegistry::new(domain))),
            future: FutureApi::new(rest, Arc::new(EndpointRegistry::new(domain))),
        }
    }

    pub fn can_sign(&self) -> bool {
        self.spot.can_sign()
    }
}
