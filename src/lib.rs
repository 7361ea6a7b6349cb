pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    types::{remote_failure, ParamValue, Params, RemoteFailure},
};
pub use exchanges::okex::{build_connector, OkexBuilder, OkexConnector};
