//! CoinPair, Coin, OrderSide, and MessageLevel enums
//!
//! Every categorical argument the Trade API accepts is a closed enum here.
//! Parsing from text goes through [`FromStr`], which rejects unknown values
//! with [`InvalidArgument`] so bad input never reaches the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidArgument;

/// Traded asset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinPair {
    /// Real / Bitcoin
    #[serde(rename = "BRLBTC")]
    BrlBtc,
    /// Real / Litecoin
    #[serde(rename = "BRLLTC")]
    BrlLtc,
}

impl CoinPair {
    /// All supported pairs
    pub const ALL: [CoinPair; 2] = [Self::BrlBtc, Self::BrlLtc];

    /// Returns the pair name as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrlBtc => "BRLBTC",
            Self::BrlLtc => "BRLLTC",
        }
    }

    /// The digital coin traded against Real
    pub fn base(&self) -> Coin {
        match self {
            Self::BrlBtc => Coin::Btc,
            Self::BrlLtc => Coin::Ltc,
        }
    }
}

/// Currency that can be withdrawn or transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coin {
    /// Brazilian Real (bank withdrawal)
    Brl,
    /// Bitcoin
    Btc,
    /// Litecoin
    Ltc,
}

impl Coin {
    /// All supported coins
    pub const ALL: [Coin; 3] = [Self::Brl, Self::Btc, Self::Ltc];

    /// Returns the coin symbol as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brl => "BRL",
            Self::Btc => "BTC",
            Self::Ltc => "LTC",
        }
    }

    /// Returns true for digital coins (withdrawn to an address, not a bank account)
    pub fn is_digital(&self) -> bool {
        !matches!(self, Self::Brl)
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy (bid) order
    Buy,
    /// Sell (ask) order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API method names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Wire method that places an order on this side
    pub fn place_method(&self) -> &'static str {
        match self {
            Self::Buy => "place_buy_order",
            Self::Sell => "place_sell_order",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Severity filter for system messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl MessageLevel {
    /// Returns the level as used in API messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ty, $param:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = InvalidArgument;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let candidate = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str().eq_ignore_ascii_case(candidate))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = [$($variant),+].iter().map(|v: &$ty| v.as_str()).collect();
                        InvalidArgument::new(
                            $param,
                            format!("`{}` is not one of {}", s, allowed.join(", ")),
                        )
                    })
            }
        }
    };
}

impl_text_enum!(CoinPair, "coin_pair", [CoinPair::BrlBtc, CoinPair::BrlLtc]);
impl_text_enum!(Coin, "coin", [Coin::Brl, Coin::Btc, Coin::Ltc]);
impl_text_enum!(OrderSide, "order_type", [OrderSide::Buy, OrderSide::Sell]);
impl_text_enum!(
    MessageLevel,
    "level",
    [MessageLevel::Info, MessageLevel::Warning, MessageLevel::Error]
);
