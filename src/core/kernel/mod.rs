//! Transport layer shared by the spot and futures clients
//!
//! - `RestClient`: one HTTP attempt per call (`ReqwestRest` in production)
//! - `Transport`: GET with bounded retry on transient TLS failures, POST without retry
//! - `Signer`: parameter-level request signing
//!
//! ```rust,no_run
//! use okex_rest::core::kernel::{ReqwestRest, RetryPolicy, Transport};
//! use okex_rest::core::types::Params;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Transport::new(ReqwestRest::new("okex".to_string())?, RetryPolicy::default());
//! let params = Params::new().with("symbol", "ltc_btc");
//! let ticker = transport.get("https://www.okex.com/api/v1/ticker.do", &params).await?;
//! println!("{}", ticker);
//! # Ok(())
//! # }
//! ```
pub mod rest;
pub mod signer;
pub mod transport;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::Signer;
pub use transport::{RetryPolicy, Transport};
