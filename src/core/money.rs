use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::FinvoiceError;

/// Currency used when an amount carries no currency attribute.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// An exact decimal amount in an ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    /// Create from an amount and a three-letter currency code.
    pub fn new(amount: Decimal, currency: &str) -> Result<Self, FinvoiceError> {
        Ok(Self {
            amount,
            currency: normalize_currency(currency)?,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Parse an amount as written in a Finvoice document.
///
/// A comma is accepted as the decimal separator (`"1234,56"` is 1234.56).
/// `currency` is the `AmountCurrencyIdentifier` attribute; when it is
/// absent the amount is in [`DEFAULT_CURRENCY`].
pub fn parse_money(raw_amount: &str, currency: Option<&str>) -> Result<Money, FinvoiceError> {
    let normalized = raw_amount.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized)
        .map_err(|_| FinvoiceError::InvalidAmount(raw_amount.to_string()))?;
    Money::new(amount, currency.unwrap_or(DEFAULT_CURRENCY))
}

fn normalize_currency(code: &str) -> Result<String, FinvoiceError> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FinvoiceError::InvalidCurrency(code.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn comma_is_decimal_separator() {
        let m = parse_money("1234,56", None).unwrap();
        assert_eq!(m.amount(), dec!(1234.56));
        assert_eq!(m.currency(), "EUR");
    }

    #[test]
    fn explicit_currency() {
        let m = parse_money("1234.56", Some("USD")).unwrap();
        assert_eq!(m.amount(), dec!(1234.56));
        assert_eq!(m.currency(), "USD");
    }

    #[test]
    fn currency_is_upper_cased() {
        assert_eq!(parse_money("1", Some(" sek ")).unwrap().currency(), "SEK");
    }

    #[test]
    fn rejects_garbage_amount() {
        assert_eq!(
            parse_money("abc", None),
            Err(FinvoiceError::InvalidAmount("abc".into()))
        );
        assert!(matches!(
            parse_money("1.234,56", None),
            Err(FinvoiceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_bad_currency() {
        for code in ["", "  ", "EU", "EURO", "E1R"] {
            assert!(
                matches!(parse_money("1", Some(code)), Err(FinvoiceError::InvalidCurrency(_))),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(parse_money("10,5", None).unwrap().to_string(), "10.5 EUR");
    }
}
