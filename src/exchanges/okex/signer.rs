use crate::core::errors::ExchangeError;
use crate::core::kernel::Signer;
use crate::core::types::Params;
use md5::{Digest, Md5};

/// MD5 request signer for OKEx v1
///
/// The signature is the uppercase hex MD5 of the form-encoded parameter set
/// with `secret_key` added, all keys sorted together.
pub struct Md5Signer {
    api_key: String,
    secret_key: String,
}

impl Md5Signer {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key,
        }
    }
}

impl Signer for Md5Signer {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn sign(&self, params: &Params) -> Result<String, ExchangeError> {
        sign(params, &self.secret_key)
    }
}

/// Compute the OKEx signature of `params` with `secret_key`
pub fn sign(params: &Params, secret_key: &str) -> Result<String, ExchangeError> {
    let mut canonical = params.clone();
    canonical.remove("sign");
    canonical.insert("secret_key", secret_key);

    let payload = canonical.encode()?;
    Ok(hex::encode_upper(Md5::digest(payload.as_bytes())))
}

/// Sign `params` with `api_key` injected; the caller's set is left untouched
pub fn sign_with_api_key(
    params: &Params,
    api_key: &str,
    secret_key: &str,
) -> Result<String, ExchangeError> {
    let mut with_key = params.clone();
    with_key.insert("api_key", api_key);
    sign(&with_key, secret_key)
}

/// `{api_key, sign}` for authenticated calls without business parameters
pub fn build_api_sign(api_key: &str, secret_key: &str) -> Result<Params, ExchangeError> {
    let params = Params::new().with("api_key", api_key);
    build_param_with_sign(params, secret_key)
}

/// Append `sign` to `params`
pub fn build_param_with_sign(mut params: Params, secret_key: &str) -> Result<Params, ExchangeError> {
    let signature = sign(&params, secret_key)?;
    params.insert("sign", signature);
    Ok(params)
}
