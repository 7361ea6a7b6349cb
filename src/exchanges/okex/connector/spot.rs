use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Params;
use crate::exchanges::okex::endpoints::{EndpointRegistry, SpotEndpoint};
use crate::exchanges::okex::rest::OkexRest;
use crate::exchanges::okex::types::{SpotOrder, WithdrawRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Spot (coin-to-coin) market client
///
/// Market data methods are public GETs; everything else is a signed POST and
/// returns `ExchangeError::MissingCredentials` on a read-only client.
pub struct SpotApi<R: RestClient> {
    rest: OkexRest<R>,
    endpoints: Arc<EndpointRegistry<SpotEndpoint>>,
}

impl<R: RestClient> std::fmt::Debug for SpotApi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotApi")
            .field("domain", &self.endpoints.domain())
            .field("rest", &self.rest)
            .finish()
    }
}

impl<R: RestClient> SpotApi<R> {
    pub fn new(rest: OkexRest<R>, endpoints: Arc<EndpointRegistry<SpotEndpoint>>) -> Self {
        Self { rest, endpoints }
    }

    pub fn endpoints(&self) -> &EndpointRegistry<SpotEndpoint> {
        &self.endpoints
    }

    pub fn rest(&self) -> &OkexRest<R> {
        &self.rest
    }

    /// Whether authenticated methods can be called
    pub fn can_sign(&self) -> bool {
        self.rest.can_sign()
    }

    async fn get(&self, endpoint: SpotEndpoint, params: Params) -> Result<Value, ExchangeError> {
        self.rest.public_get(self.endpoints.url(endpoint), params).await
    }

    async fn post(&self, endpoint: SpotEndpoint, params: Params) -> Result<Value, ExchangeError> {
        self.rest.signed_post(self.endpoints.url(endpoint), params).await
    }

    // Market data

    /// Latest ticker for a pair such as `ltc_btc`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn ticker(&self, symbol: &str) -> Result<Value, ExchangeError> {
        self.get(SpotEndpoint::Ticker, Params::new().with("symbol", symbol))
            .await
    }

    /// Order book, `size` in 1..=200
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn depth(&self, symbol: &str, size: u32) -> Result<Value, ExchangeError> {
        let params = Params::new().with("symbol", symbol).with("size", size);
        self.get(SpotEndpoint::Depth, params).await
    }

    /// Recent 600 trades, optionally only those after `since`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn trades(&self, symbol: &str, since: Option<u64>) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with_optional("since", since);
        self.get(SpotEndpoint::Trades, params).await
    }

    /// Candles; `kline_type` is e.g. `1min`, `15min`, `1hour`, `1day`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn kline(
        &self,
        symbol: &str,
        kline_type: &str,
        size: Option<u32>,
        since: Option<u64>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("type", kline_type)
            .with_optional("size", size)
            .with_optional("since", since);
        self.get(SpotEndpoint::Kline, params).await
    }

    // Trading

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn userinfo(&self) -> Result<Value, ExchangeError> {
        self.post(SpotEndpoint::UserInfo, Params::new()).await
    }

    #[instrument(skip(self), fields(exchange = "okex", symbol = %order.symbol))]
    pub async fn trade(&self, order: &SpotOrder) -> Result<Value, ExchangeError> {
        self.post(SpotEndpoint::Trade, order.to_params()).await
    }

    /// Up to five orders; `orders_data` is the JSON-like list the exchange expects
    #[instrument(skip(self, orders_data), fields(exchange = "okex"))]
    pub async fn batch_trade(
        &self,
        symbol: &str,
        orders_data: &str,
        order_type: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("orders_data", orders_data)
            .with_optional("type", order_type);
        self.post(SpotEndpoint::BatchTrade, params).await
    }

    /// `order_id` may hold up to three comma-separated ids
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn cancel_order(&self, symbol: &str, order_id: &str) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("order_id", order_id);
        self.post(SpotEndpoint::CancelOrder, params).await
    }

    /// `order_id = -1` returns all unfilled orders
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn order_info(&self, symbol: &str, order_id: i64) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("order_id", order_id);
        self.post(SpotEndpoint::OrderInfo, params).await
    }

    /// `query_type`: 0 unfilled, 1 filled
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn orders_info(
        &self,
        symbol: &str,
        order_id: &str,
        query_type: u8,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("order_id", order_id)
            .with("type", query_type);
        self.post(SpotEndpoint::OrdersInfo, params).await
    }

    /// Orders from the last two days
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn order_history(
        &self,
        symbol: &str,
        status: u8,
        current_page: u32,
        page_length: u32,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("status", status)
            .with("current_page", current_page)
            .with("page_length", page_length);
        self.post(SpotEndpoint::OrderHistory, params).await
    }

    #[instrument(skip(self, request), fields(exchange = "okex", symbol = %request.symbol))]
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<Value, ExchangeError> {
        self.post(SpotEndpoint::Withdraw, request.to_params()).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn cancel_withdraw(
        &self,
        symbol: &str,
        withdraw_id: &str,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("withdraw_id", withdraw_id);
        self.post(SpotEndpoint::CancelWithdraw, params).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn withdraw_info(
        &self,
        symbol: &str,
        withdraw_id: &str,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("withdraw_id", withdraw_id);
        self.post(SpotEndpoint::WithdrawInfo, params).await
    }

    /// Deposit (`record_type = 0`) or withdrawal (`1`) history for a coin such as `btc`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn account_records(
        &self,
        symbol: &str,
        record_type: u8,
        current_page: u32,
        page_length: u32,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("type", record_type)
            .with("current_page", current_page)
            .with("page_length", page_length);
        self.post(SpotEndpoint::AccountRecords, params).await
    }
}
