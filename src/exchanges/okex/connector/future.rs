use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Params;
use crate::exchanges::okex::endpoints::{EndpointRegistry, FutureEndpoint};
use crate::exchanges::okex::rest::OkexRest;
use crate::exchanges::okex::types::{ContractType, ExplosiveQuery, FutureOrder, FutureOrderQuery};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Futures contract client
pub struct FutureApi<R: RestClient> {
    rest: OkexRest<R>,
    endpoints: Arc<EndpointRegistry<FutureEndpoint>>,
}

impl<R: RestClient> std::fmt::Debug for FutureApi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FutureApi")
            .field("domain", &self.endpoints.domain())
            .field("rest", &self.rest)
            .finish()
    }
}

impl<R: RestClient> FutureApi<R> {
    pub fn new(rest: OkexRest<R>, endpoints: Arc<EndpointRegistry<FutureEndpoint>>) -> Self {
        Self { rest, endpoints }
    }

    pub fn endpoints(&self) -> &EndpointRegistry<FutureEndpoint> {
        &self.endpoints
    }

    pub fn rest(&self) -> &OkexRest<R> {
        &self.rest
    }

    /// Whether authenticated methods can be called
    pub fn can_sign(&self) -> bool {
        self.rest.can_sign()
    }

    async fn get(&self, endpoint: FutureEndpoint, params: Params) -> Result<Value, ExchangeError> {
        self.rest.public_get(self.endpoints.url(endpoint), params).await
    }

    async fn post(&self, endpoint: FutureEndpoint, params: Params) -> Result<Value, ExchangeError> {
        self.rest.signed_post(self.endpoints.url(endpoint), params).await
    }

    fn contract_params(symbol: &str, contract_type: ContractType) -> Params {
        Params::new()
            .with("symbol", symbol)
            .with("contract_type", contract_type)
    }

    // Market data

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn ticker(
        &self,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::Ticker, Self::contract_params(symbol, contract_type))
            .await
    }

    /// Order book; `merge = 1` merges depth, `None` sends `0`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn depth(
        &self,
        symbol: &str,
        contract_type: ContractType,
        size: u32,
        merge: Option<u8>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::contract_params(symbol, contract_type)
            .with("size", size)
            .with("merge", merge.unwrap_or(0));
        self.get(FutureEndpoint::Depth, params).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn trades(
        &self,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::Trades, Self::contract_params(symbol, contract_type))
            .await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn index(&self, symbol: &str) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::Index, Params::new().with("symbol", symbol))
            .await
    }

    /// USD/CNY rate
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn exchange_rate(&self) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::ExchangeRate, Params::new()).await
    }

    /// Estimated delivery price
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn estimated_price(&self, symbol: &str) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::EstimatedPrice, Params::new().with("symbol", symbol))
            .await
    }

    /// Candles; unset `size` and `since` are sent as `0`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn kline(
        &self,
        symbol: &str,
        kline_type: &str,
        contract_type: ContractType,
        size: Option<u32>,
        since: Option<u64>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::contract_params(symbol, contract_type)
            .with("type", kline_type)
            .with("size", size.unwrap_or(0))
            .with("since", since.unwrap_or(0));
        self.get(FutureEndpoint::Kline, params).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn hold_amount(
        &self,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::HoldAmount, Self::contract_params(symbol, contract_type))
            .await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn price_limit(
        &self,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        self.get(FutureEndpoint::PriceLimit, Self::contract_params(symbol, contract_type))
            .await
    }

    // Trading (cross margin unless noted)

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn userinfo(&self) -> Result<Value, ExchangeError> {
        self.post(FutureEndpoint::UserInfo, Params::new()).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn position(
        &self,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        self.post(FutureEndpoint::Position, Self::contract_params(symbol, contract_type))
            .await
    }

    #[instrument(skip(self), fields(exchange = "okex", symbol = %order.symbol))]
    pub async fn trade(&self, order: &FutureOrder) -> Result<Value, ExchangeError> {
        self.post(FutureEndpoint::Trade, order.to_params()).await
    }

    /// Public trade history (not account specific); `date` is `yyyy-MM-dd`
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn trades_history(
        &self,
        symbol: &str,
        date: &str,
        since: u64,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("date", date)
            .with("since", since);
        self.post(FutureEndpoint::TradesHistory, params).await
    }

    #[instrument(skip(self, orders_data), fields(exchange = "okex"))]
    pub async fn batch_trade(
        &self,
        symbol: &str,
        contract_type: ContractType,
        orders_data: &str,
        lever_rate: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::contract_params(symbol, contract_type)
            .with("orders_data", orders_data)
            .with_optional("lever_rate", lever_rate);
        self.post(FutureEndpoint::BatchTrade, params).await
    }

    /// `order_id` may hold up to three comma-separated ids
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn cancel(
        &self,
        order_id: &str,
        symbol: &str,
        contract_type: ContractType,
    ) -> Result<Value, ExchangeError> {
        let params = Self::contract_params(symbol, contract_type).with("order_id", order_id);
        self.post(FutureEndpoint::Cancel, params).await
    }

    #[instrument(skip(self), fields(exchange = "okex", symbol = %query.symbol))]
    pub async fn order_info(&self, query: &FutureOrderQuery) -> Result<Value, ExchangeError> {
        self.post(FutureEndpoint::OrderInfo, query.to_params()).await
    }

    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn orders_info(
        &self,
        symbol: &str,
        contract_type: ContractType,
        order_id: &str,
    ) -> Result<Value, ExchangeError> {
        let params = Self::contract_params(symbol, contract_type).with("order_id", order_id);
        self.post(FutureEndpoint::OrdersInfo, params).await
    }

    /// Isolated margin account
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn userinfo_4fix(&self) -> Result<Value, ExchangeError> {
        self.post(FutureEndpoint::UserInfo4Fix, Params::new()).await
    }

    /// Isolated margin positions; `position_type = 1` returns all leverage levels
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn position_4fix(
        &self,
        symbol: &str,
        contract_type: ContractType,
        position_type: Option<u8>,
    ) -> Result<Value, ExchangeError> {
        let params =
            Self::contract_params(symbol, contract_type).with_optional("type", position_type);
        self.post(FutureEndpoint::Position4Fix, params).await
    }

    /// Liquidation orders
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn explosive(
        &self,
        symbol: &str,
        contract_type: ContractType,
        query: &ExplosiveQuery,
    ) -> Result<Value, ExchangeError> {
        let params = query.apply(Self::contract_params(symbol, contract_type));
        self.post(FutureEndpoint::Explosive, params).await
    }

    /// Transfer between spot and futures accounts; `transfer_type`: 1 spot to futures, 2 back
    #[instrument(skip(self), fields(exchange = "okex"))]
    pub async fn devolve(
        &self,
        symbol: &str,
        transfer_type: u8,
        amount: Decimal,
    ) -> Result<Value, ExchangeError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("type", transfer_type)
            .with("amount", amount);
        self.post(FutureEndpoint::Devolve, params).await
    }
}
