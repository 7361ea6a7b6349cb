pub mod endpoints;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, OkexBuilder};
pub use connector::{FutureApi, OkexConnector, SpotApi};
pub use endpoints::{Endpoint, EndpointRegistry, FutureEndpoint, SpotEndpoint, DEFAULT_DOMAIN};
pub use rest::OkexRest;
pub use signer::{build_api_sign, build_param_with_sign, sign, sign_with_api_key, Md5Signer};
pub use types::{ContractType, ExplosiveQuery, FutureOrder, FutureOrderQuery, SpotOrder, WithdrawRequest};
