use crate::core::errors::ExchangeError;
use crate::core::types::Params;

/// Signer trait for request authentication
///
/// Credentials travel as ordinary request parameters: the signer exposes the
/// public `api_key` to be injected into the parameter set and computes the
/// `sign` value over that set. The secret never leaves the implementation.
pub trait Signer: Send + Sync {
    /// Public API key injected as the `api_key` parameter
    fn api_key(&self) -> &str;

    /// Compute the signature for a parameter set
    ///
    /// Any `sign` entry already present in `params` must be ignored.
    fn sign(&self, params: &Params) -> Result<String, ExchangeError>;
}
