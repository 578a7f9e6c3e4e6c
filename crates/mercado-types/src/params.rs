//! Form parameters for signed requests
//!
//! The Trade API takes a URL form-encoded body. Values are stringified with
//! fixed rules so the bytes that are signed are always the bytes that are sent:
//!
//! - booleans as lowercase `true` / `false`
//! - integers in base 10
//! - decimals normalized, without trailing zeros (`50.00` becomes `50`)
//! - text as-is (percent-encoding happens during form encoding)

use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::enums::{Coin, CoinPair, MessageLevel};
use crate::error::InvalidArgument;

/// Parameter names the client injects into every request
pub const RESERVED_PARAMS: [&str; 2] = ["tapi_method", "tapi_nonce"];

/// A single form parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Decimal(Decimal),
    Bool(bool),
}

impl ParamValue {
    /// Convert a JSON value into a form value
    ///
    /// Only strings, numbers and booleans can be form encoded; anything else
    /// is rejected.
    pub fn from_json(name: &str, value: &Value) -> Result<Self, InvalidArgument> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(Self::Unsigned(u))
                } else if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else {
                    Decimal::from_str(&n.to_string())
                        .or_else(|_| Decimal::from_scientific(&n.to_string()))
                        .map(Self::Decimal)
                        .map_err(|e| {
                            InvalidArgument::new(name, format!("number {} not representable: {}", n, e))
                        })
                }
            }
            Value::Null => Err(InvalidArgument::new(name, "null cannot be form encoded")),
            Value::Array(_) => Err(InvalidArgument::new(name, "arrays cannot be form encoded")),
            Value::Object(_) => Err(InvalidArgument::new(name, "objects cannot be form encoded")),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Unsigned(u) => write!(f, "{}", u),
            Self::Decimal(d) => write!(f, "{}", d.normalize()),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<CoinPair> for ParamValue {
    fn from(value: CoinPair) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl From<Coin> for ParamValue {
    fn from(value: Coin) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl From<MessageLevel> for ParamValue {
    fn from(value: MessageLevel) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

/// Ordered list of form parameters
///
/// Insertion order is kept all the way to the encoded body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormParams {
    pairs: Vec<(String, ParamValue)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter, replacing the value if the key is already present
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Append a parameter only when a value is present
    pub fn push_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build parameters from a JSON object, validating every value
    pub fn from_json_map(map: &serde_json::Map<String, Value>) -> Result<Self, InvalidArgument> {
        let mut params = Self::new();
        for (key, value) in map {
            params.push(key.clone(), ParamValue::from_json(key, value)?);
        }
        Ok(params)
    }

    /// Fail if the caller tried to set a parameter the client injects itself
    pub fn ensure_no_reserved(&self) -> Result<(), InvalidArgument> {
        match RESERVED_PARAMS.iter().find(|name| self.contains(name)) {
            Some(name) => Err(InvalidArgument::new(
                *name,
                "set by the client on every request",
            )),
            None => Ok(()),
        }
    }

    /// URL form-encode in insertion order
    pub fn encode(&self) -> Result<String, InvalidArgument> {
        let pairs: Vec<(&str, String)> = self
            .pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect();

        serde_urlencoded::to_string(&pairs).map_err(|e| InvalidArgument::new("params", e.to_string()))
    }
}

/// Parse a numeric identifier (order id, withdrawal id) from text
pub fn parse_identifier(parameter: &str, raw: &str) -> Result<u64, InvalidArgument> {
    raw.trim().parse::<u64>().map_err(|_| {
        InvalidArgument::new(parameter, format!("`{}` is not a non-negative integer", raw))
    })
}
