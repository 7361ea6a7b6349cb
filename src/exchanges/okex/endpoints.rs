use crate::core::errors::ExchangeError;
use std::collections::HashMap;
use std::hash::Hash;

pub const DEFAULT_DOMAIN: &str = "https://www.okex.com";

/// A named REST operation with a path relative to the exchange domain
pub trait Endpoint: Copy + Eq + Hash + Send + Sync + 'static {
    /// Every endpoint of this family, in declaration order
    const ALL: &'static [Self];

    /// Logical operation name, e.g. `ticker`
    fn name(self) -> &'static str;

    /// Relative path, e.g. `/api/v1/ticker.do`
    fn path(self) -> &'static str;
}

macro_rules! endpoints {
    ($(#[$meta:meta])* $enum_name:ident { $($variant:ident => ($name:literal, $path:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $($variant),+
        }

        impl Endpoint for $enum_name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            fn path(self) -> &'static str {
                match self {
                    $(Self::$variant => $path),+
                }
            }
        }
    };
}

endpoints!(
    /// Spot (coin-to-coin) endpoints
    SpotEndpoint {
        Ticker => ("ticker", "/api/v1/ticker.do"),
        Depth => ("depth", "/api/v1/depth.do"),
        Trades => ("trades", "/api/v1/trades.do"),
        Kline => ("kline", "/api/v1/kline.do"),
        UserInfo => ("userinfo", "/api/v1/userinfo.do"),
        Trade => ("trade", "/api/v1/trade.do"),
        BatchTrade => ("batch_trade", "/api/v1/batch_trade.do"),
        CancelOrder => ("cancel_order", "/api/v1/cancel_order.do"),
        OrderInfo => ("order_info", "/api/v1/order_info.do"),
        OrdersInfo => ("orders_info", "/api/v1/orders_info.do"),
        OrderHistory => ("order_history", "/api/v1/order_history.do"),
        Withdraw => ("withdraw", "/api/v1/withdraw.do"),
        CancelWithdraw => ("cancel_withdraw", "/api/v1/cancel_withdraw.do"),
        WithdrawInfo => ("withdraw_info", "/api/v1/withdraw_info.do"),
        AccountRecords => ("account_records", "/api/v1/account_records.do"),
    }
);

endpoints!(
    /// Futures contract endpoints
    FutureEndpoint {
        Ticker => ("ticker", "/api/v1/future_ticker.do"),
        Depth => ("depth", "/api/v1/future_depth.do"),
        Trades => ("trades", "/api/v1/future_trades.do"),
        Index => ("index", "/api/v1/future_index.do"),
        ExchangeRate => ("exchange_rate", "/api/v1/exchange_rate.do"),
        EstimatedPrice => ("estimated_price", "/api/v1/future_estimated_price.do"),
        Kline => ("kline", "/api/v1/future_kline.do"),
        HoldAmount => ("hold_amount", "/api/v1/future_hold_amount.do"),
        PriceLimit => ("price_limit", "/api/v1/future_price_limit.do"),
        UserInfo => ("userinfo", "/api/v1/future_userinfo.do"),
        Position => ("position", "/api/v1/future_position.do"),
        Trade => ("trade", "/api/v1/future_trade.do"),
        TradesHistory => ("trades_history", "/api/v1/future_trades_history.do"),
        BatchTrade => ("batch_trade", "/api/v1/future_batch_trade.do"),
        Cancel => ("cancel", "/api/v1/future_cancel.do"),
        OrderInfo => ("order_info", "/api/v1/future_order_info.do"),
        OrdersInfo => ("orders_info", "/api/v1/future_orders_info.do"),
        UserInfo4Fix => ("userinfo_4fix", "/api/v1/future_userinfo_4fix.do"),
        Position4Fix => ("position_4fix", "/api/v1/future_position_4fix.do"),
        Explosive => ("explosive", "/api/v1/future_explosive.do"),
        Devolve => ("devolve", "/api/v1/future_devolve.do"),
    }
);

/// Absolute URLs for one endpoint family, resolved once against a domain
#[derive(Debug, Clone)]
pub struct EndpointRegistry<E: Endpoint> {
    domain: String,
    urls: HashMap<E, String>,
}

impl<E: Endpoint> EndpointRegistry<E> {
    pub fn new(domain: &str) -> Self {
        let domain = domain.trim_end_matches('/').to_string();
        let urls = E::ALL
            .iter()
            .map(|&endpoint| (endpoint, format!("{}{}", domain, endpoint.path())))
            .collect();

        Self { domain, urls }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn url(&self, endpoint: E) -> &str {
        // Every variant is inserted by `new`
        self.urls.get(&endpoint).map_or("", String::as_str)
    }

    /// Resolve an endpoint by its logical name
    pub fn lookup(&self, name: &str) -> Result<(E, &str), ExchangeError> {
        E::ALL
            .iter()
            .find(|endpoint| endpoint.name() == name)
            .map(|&endpoint| (endpoint, self.url(endpoint)))
            .ok_or_else(|| ExchangeError::InvalidParameters(format!("Unknown endpoint: {}", name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (E, &str)> + '_ {
        E::ALL.iter().map(move |&endpoint| (endpoint, self.url(endpoint)))
    }
}

impl<E: Endpoint> Default for EndpointRegistry<E> {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_urls_are_absolute() {
        let registry = EndpointRegistry::<SpotEndpoint>::default();
        assert_eq!(
            registry.url(SpotEndpoint::Ticker),
            "https://www.okex.com/api/v1/ticker.do"
        );
        assert_eq!(
            registry.url(SpotEndpoint::AccountRecords),
            "https://www.okex.com/api/v1/account_records.do"
        );
        assert_eq!(registry.iter().count(), 15);
    }

    #[test]
    fn test_future_urls_are_absolute() {
        let registry = EndpointRegistry::<FutureEndpoint>::default();
        assert_eq!(
            registry.url(FutureEndpoint::ExchangeRate),
            "https://www.okex.com/api/v1/exchange_rate.do"
        );
        assert_eq!(
            registry.url(FutureEndpoint::Position4Fix),
            "https://www.okex.com/api/v1/future_position_4fix.do"
        );
        assert_eq!(registry.iter().count(), 21);
    }

    #[test]
    fn test_custom_domain_trailing_slash() {
        let registry = EndpointRegistry::<FutureEndpoint>::new("https://www.okex.me/");
        assert_eq!(registry.domain(), "https://www.okex.me");
        assert_eq!(
            registry.url(FutureEndpoint::Devolve),
            "https://www.okex.me/api/v1/future_devolve.do"
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let registry = EndpointRegistry::<SpotEndpoint>::default();
        let (endpoint, url) = registry.lookup("batch_trade").unwrap();
        assert_eq!(endpoint, SpotEndpoint::BatchTrade);
        assert_eq!(url, "https://www.okex.com/api/v1/batch_trade.do");

        assert!(registry.lookup("userinfom").is_err());
    }

    #[test]
    fn test_every_url_is_unique() {
        let registry = EndpointRegistry::<FutureEndpoint>::default();
        let urls: std::collections::HashSet<&str> = registry.iter().map(|(_, url)| url).collect();
        assert_eq!(urls.len(), FutureEndpoint::ALL.len());
    }
}
