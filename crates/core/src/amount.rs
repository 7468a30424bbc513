use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount '{0}': {1}")]
    Invalid(String, String),
    #[error("Negative amount: {0}")]
    Negative(Decimal),
}

/// A non-negative fee amount. Serialized as a JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    pub fn zero() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn from_decimal(decimal: Decimal) -> Result<Self, AmountError> {
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(AmountError::Negative(decimal));
        }
        Ok(Amount(decimal))
    }

    /// Parse a plain numeric token such as `450` or `12.50`.
    pub fn parse(token: &str) -> Result<Self, AmountError> {
        let decimal = Decimal::from_str(token.trim())
            .map_err(|e| AmountError::Invalid(token.to_string(), e.to_string()))?;
        Self::from_decimal(decimal)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}
