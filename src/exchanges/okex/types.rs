use crate::core::types::{ParamValue, Params};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Futures contract period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    ThisWeek,
    NextWeek,
    Quarter,
}

impl ContractType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisWeek => "this_week",
            Self::NextWeek => "next_week",
            Self::Quarter => "quarter",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContractType> for ParamValue {
    fn from(value: ContractType) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

/// Spot order: limit (`buy`/`sell`) or market (`buy_market`/`sell_market`).
///
/// Market sells omit `price`, market buys omit `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotOrder {
    pub symbol: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub price: Option<Decimal>,
    pub amount: Option<Decimal>,
}

impl SpotOrder {
    pub fn limit(symbol: &str, order_type: &str, price: Decimal, amount: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            order_type: order_type.to_string(),
            price: Some(price),
            amount: Some(amount),
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("type", &self.order_type)
            .with_optional("price", self.price)
            .with_optional("amount", self.amount)
    }
}

/// Coin withdrawal request
///
/// `trade_pwd` only leaves the struct as a request parameter; `Debug` and
/// `Serialize` redact it.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawRequest {
    pub symbol: String,
    /// Network fee; `0` when withdrawing to another OK site
    pub chargefee: Decimal,
    pub trade_pwd: Secret<String>,
    pub withdraw_address: String,
    pub withdraw_amount: Decimal,
    /// `okcn`, `okcom`, `okex` or `address`
    pub target: String,
}

impl Serialize for WithdrawRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("WithdrawRequest", 6)?;
        state.serialize_field("symbol", &self.symbol)?;
        state.serialize_field("chargefee", &self.chargefee)?;
        state.serialize_field("trade_pwd", "[REDACTED]")?;
        state.serialize_field("withdraw_address", &self.withdraw_address)?;
        state.serialize_field("withdraw_amount", &self.withdraw_amount)?;
        state.serialize_field("target", &self.target)?;
        state.end()
    }
}

impl WithdrawRequest {
    pub fn new(
        symbol: &str,
        chargefee: Decimal,
        trade_pwd: String,
        withdraw_address: &str,
        withdraw_amount: Decimal,
        target: &str,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            chargefee,
            trade_pwd: Secret::new(trade_pwd),
            withdraw_address: withdraw_address.to_string(),
            withdraw_amount,
            target: target.to_string(),
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("chargefee", self.chargefee)
            .with("trade_pwd", self.trade_pwd.expose_secret())
            .with("withdraw_address", &self.withdraw_address)
            .with("withdraw_amount", self.withdraw_amount)
            .with("target", &self.target)
    }
}

/// Futures order
///
/// `order_type`: 1 open long, 2 open short, 3 close long, 4 close short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureOrder {
    pub symbol: String,
    pub contract_type: ContractType,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub order_type: u8,
    /// `1` to trade at the counterparty price, ignoring `price`
    pub match_price: Option<u8>,
    pub lever_rate: Option<u32>,
}

impl FutureOrder {
    pub fn new(
        symbol: &str,
        contract_type: ContractType,
        price: Decimal,
        amount: Decimal,
        order_type: u8,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            contract_type,
            price,
            amount,
            order_type,
            match_price: None,
            lever_rate: None,
        }
    }

    pub fn with_match_price(mut self, match_price: u8) -> Self {
        self.match_price = Some(match_price);
        self
    }

    pub fn with_lever_rate(mut self, lever_rate: u32) -> Self {
        self.lever_rate = Some(lever_rate);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("contract_type", self.contract_type)
            .with("price", self.price)
            .with("amount", self.amount)
            .with("type", self.order_type)
            .with_optional("match_price", self.match_price)
            .with_optional("lever_rate", self.lever_rate)
    }
}

/// Futures order lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureOrderQuery {
    pub symbol: String,
    pub contract_type: ContractType,
    /// 1 unfilled, 2 filled
    pub status: u8,
    /// `-1` selects all orders with `status`
    pub order_id: i64,
    pub current_page: Option<u32>,
    pub page_length: Option<u32>,
}

impl FutureOrderQuery {
    pub fn by_status(symbol: &str, contract_type: ContractType, status: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            contract_type,
            status,
            order_id: -1,
            current_page: None,
            page_length: None,
        }
    }

    pub fn with_order_id(mut self, order_id: i64) -> Self {
        self.order_id = order_id;
        self
    }

    pub fn with_page(mut self, current_page: u32, page_length: u32) -> Self {
        self.current_page = Some(current_page);
        self.page_length = Some(page_length);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", &self.symbol)
            .with("contract_type", self.contract_type)
            .with("status", self.status)
            .with("order_id", self.order_id)
            .with_optional("current_page", self.current_page)
            .with_optional("page_length", self.page_length)
    }
}

/// Optional filters for liquidation orders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosiveQuery {
    pub status: Option<u8>,
    pub current_page: Option<u32>,
    /// Takes precedence over `current_page` on the remote side
    pub page_number: Option<u32>,
    pub page_length: Option<u32>,
}

impl ExplosiveQuery {
    pub(crate) fn apply(&self, params: Params) -> Params {
        params
            .with_optional("status", self.status)
            .with_optional("current_page", self.current_page)
            .with_optional("page_number", self.page_number)
            .with_optional("page_length", self.page_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_order_omits_zero_lever_rate() {
        let order = FutureOrder::new(
            "btc_usd",
            ContractType::ThisWeek,
            Decimal::new(6500, 0),
            Decimal::ONE,
            1,
        )
        .with_lever_rate(0)
        .with_match_price(0);

        let params = order.to_params();
        assert!(!params.contains_key("lever_rate"));
        assert!(!params.contains_key("match_price"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_future_order_keeps_lever_rate() {
        let order = FutureOrder::new(
            "btc_usd",
            ContractType::Quarter,
            Decimal::new(6500, 0),
            Decimal::ONE,
            2,
        )
        .with_lever_rate(10);

        let params = order.to_params();
        assert_eq!(params.get("lever_rate"), Some(&ParamValue::Int(10)));
        assert_eq!(params.get("contract_type").map(ToString::to_string).as_deref(), Some("quarter"));
    }

    #[test]
    fn test_spot_market_sell_has_no_price() {
        let order = SpotOrder {
            symbol: "ltc_btc".to_string(),
            order_type: "sell_market".to_string(),
            price: None,
            amount: Some(Decimal::new(15, 1)),
        };

        let params = order.to_params();
        assert!(!params.contains_key("price"));
        assert_eq!(params.get("amount").map(ToString::to_string).as_deref(), Some("1.5"));
    }

    #[test]
    fn test_withdraw_password_is_redacted() {
        let request = WithdrawRequest::new(
            "btc_usd",
            Decimal::new(2, 3),
            "hunter2".to_string(),
            "1Addr",
            Decimal::ONE,
            "address",
        );

        assert!(!format!("{:?}", request).contains("hunter2"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["trade_pwd"], "[REDACTED]");
        assert_eq!(json["withdraw_address"], "1Addr");

        let params = request.to_params();
        assert_eq!(params.get("trade_pwd").map(ToString::to_string).as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_order_query_defaults_to_all_orders() {
        let params = FutureOrderQuery::by_status("btc_usd", ContractType::NextWeek, 1).to_params();
        assert_eq!(params.get("order_id"), Some(&ParamValue::Int(-1)));
        assert!(!params.contains_key("current_page"));
    }

    #[test]
    fn test_explosive_query_only_sends_set_filters() {
        let query = ExplosiveQuery {
            status: Some(2),
            page_length: Some(50),
            ..ExplosiveQuery::default()
        };

        let params = query.apply(Params::new());
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["page_length", "status"]);
    }
}
