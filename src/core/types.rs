use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A scalar request parameter value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    UInt(u64),
    Decimal(Decimal),
    Str(String),
}

impl ParamValue {
    /// `false` for zero numbers and empty strings.
    ///
    /// Optional parameters are only sent when truthy, so an explicit `0`
    /// behaves the same as leaving the field unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(v) => *v != 0,
            Self::UInt(v) => *v != 0,
            Self::Decimal(v) => !v.is_zero(),
            Self::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

macro_rules! impl_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, u8, u16, u32);

/// Request parameters kept in canonical (byte-wise ascending key) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a required parameter, replacing any previous value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert an optional parameter; `None` and falsy values are dropped
    pub fn insert_optional<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value.map(Into::into).filter(ParamValue::is_truthy) {
            self.0.insert(key.into(), value);
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_optional<V: Into<ParamValue>>(
        mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.insert_optional(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Key/value pairs in canonical order, values rendered as strings
    pub fn to_pairs(&self) -> Vec<(&str, String)> {
        self.iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    /// Form-encode as `key=value&...` in canonical order
    pub fn encode(&self) -> Result<String, ExchangeError> {
        serde_urlencoded::to_string(self.to_pairs())
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A business-level failure reported in an otherwise successful response body
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFailure {
    pub error_code: Option<i64>,
    pub body: Value,
}

/// Inspect a response for `{"result": false, "error_code": ...}`.
///
/// Responses are handed back to callers unchanged; this is only a helper for
/// callers that want to branch on remote failures.
pub fn remote_failure(value: &Value) -> Option<RemoteFailure> {
    let object = value.as_object()?;
    let error_code = object.get("error_code").and_then(Value::as_i64);
    let failed = match object.get("result") {
        Some(Value::Bool(result)) => !result,
        _ => error_code.is_some(),
    };

    failed.then(|| RemoteFailure {
        error_code,
        body: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_params_iterate_in_sorted_order() {
        let params = Params::new()
            .with("symbol", "btc_usd")
            .with("amount", 1)
            .with("type", "buy")
            .with("api_key", "k");

        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["amount", "api_key", "symbol", "type"]);
    }

    #[test]
    fn test_optional_zero_and_empty_are_omitted() {
        let params = Params::new()
            .with_optional("lever_rate", Some(0))
            .with_optional("price", Some(""))
            .with_optional("amount", Some(Decimal::ZERO))
            .with_optional("since", None::<u64>);

        assert!(params.is_empty());
    }

    #[test]
    fn test_optional_truthy_values_are_kept() {
        let params = Params::new()
            .with_optional("lever_rate", Some(10))
            .with_optional("price", Some(Decimal::from_str("3.5").unwrap()))
            .with_optional("type", Some("buy"));

        assert_eq!(params.get("lever_rate"), Some(&ParamValue::Int(10)));
        assert_eq!(params.get("price").map(ToString::to_string).as_deref(), Some("3.5"));
        assert_eq!(params.get("type"), Some(&ParamValue::Str("buy".to_string())));
    }

    #[test]
    fn test_encode_percent_encodes_values() {
        let params = Params::new()
            .with("orders_data", "[{price:3,amount:5}]")
            .with("withdraw_address", "a b&c");

        assert_eq!(
            params.encode().unwrap(),
            "orders_data=%5B%7Bprice%3A3%2Camount%3A5%7D%5D&withdraw_address=a+b%26c"
        );
    }

    #[test]
    fn test_encode_uses_form_urlencoded_safe_set() {
        // '*' stays literal and '~' is escaped; the signed string depends on it
        let params = Params::new().with("memo", "a*b~c-d_e.f");
        assert_eq!(params.encode().unwrap(), "memo=a*b%7Ec-d_e.f");
    }

    #[test]
    fn test_remote_failure_detected() {
        let failure = remote_failure(&json!({"result": false, "error_code": 10005})).unwrap();
        assert_eq!(failure.error_code, Some(10005));

        let failure = remote_failure(&json!({"error_code": 20001})).unwrap();
        assert_eq!(failure.error_code, Some(20001));
    }

    #[test]
    fn test_remote_success_is_not_failure() {
        assert!(remote_failure(&json!({"result": true, "order_id": 1})).is_none());
        assert!(remote_failure(&json!([[1, 2, 3]])).is_none());
        assert!(remote_failure(&Value::Null).is_none());
    }
}
