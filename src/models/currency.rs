use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ServiceError;

/// Currencies supported by the pricing engine.
///
/// USD is the base currency and PHP the quote currency; the shared exchange
/// rate is expressed as PHP per USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Php,
}

impl Currency {
    /// The other supported currency, used by the display-currency toggle.
    pub fn other(self) -> Currency {
        match self {
            Currency::Usd => Currency::Php,
            Currency::Php => Currency::Usd,
        }
    }

    /// Parse a currency code coming off the wire. An absent code means USD;
    /// an unknown code is rejected rather than silently treated as USD.
    pub fn from_wire(code: Option<&str>) -> Result<Currency, ServiceError> {
        match code {
            None => Ok(Currency::Usd),
            Some(raw) => raw.parse().map_err(|_| ServiceError::UnsupportedCurrency {
                code: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
            Currency::Php => write!(f, "PHP"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "PHP" => Ok(Currency::Php),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

/// Convert an amount between the supported currencies at the given rate.
///
/// Pure function of its inputs. Same-currency conversion returns the amount
/// unchanged so no rounding drift is introduced. `rate` is PHP per USD and
/// is validated positive where it enters the system (configuration load and
/// rate-cache commit), never here.
pub fn convert(amount: Decimal, from: Currency, to: Currency, rate: Decimal) -> Decimal {
    match (from, to) {
        (Currency::Usd, Currency::Usd) | (Currency::Php, Currency::Php) => amount,
        (Currency::Usd, Currency::Php) => amount * rate,
        (Currency::Php, Currency::Usd) => amount / rate,
    }
}
