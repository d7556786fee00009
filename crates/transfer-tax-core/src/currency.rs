use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TransferTaxError;
use crate::types::{Currency, Money};
use crate::TransferTaxResult;

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a monetary value with its currency symbol and thousands separators,
/// in whole currency units. `format_money_with` offers a decimal mode.
pub fn format_money(amount: Money, currency: &Currency) -> String {
    format_money_with(amount, currency, 0)
}

pub fn format_money_with(amount: Money, currency: &Currency, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded);

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{sign}{}{grouped}.{frac}", currency.symbol()),
        None => format!("{sign}{}{grouped}", currency.symbol()),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// One caller-supplied exchange rate: how many THB one unit of the currency
/// buys. Rates are data the caller resolves; the engine never fetches them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: Currency,
    pub thb_per_unit: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    pub rates: Vec<CurrencyRate>,
}

impl RateTable {
    fn thb_per_unit(&self, currency: &Currency) -> Option<Decimal> {
        if *currency == Currency::THB {
            return Some(Decimal::ONE);
        }
        self.rates
            .iter()
            .find(|r| r.currency == *currency)
            .map(|r| r.thb_per_unit)
    }
}

/// Convert between currencies, pivoting through THB.
pub fn convert(
    table: &RateTable,
    amount: Money,
    from: &Currency,
    to: &Currency,
) -> TransferTaxResult<Money> {
    let from_rate =
        table
            .thb_per_unit(from)
            .ok_or_else(|| TransferTaxError::UnknownExchangeRate {
                currency: format!("{from:?}"),
            })?;
    let to_rate = table
        .thb_per_unit(to)
        .ok_or_else(|| TransferTaxError::UnknownExchangeRate {
            currency: format!("{to:?}"),
        })?;

    if to_rate.is_zero() {
        return Err(TransferTaxError::InvalidInput {
            field: "rates".into(),
            reason: format!("Zero exchange rate for {to:?}"),
        });
    }

    Ok(amount * from_rate / to_rate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_unit_formatting() {
        assert_eq!(format_money(dec!(626_700), &Currency::THB), "฿626,700");
        assert_eq!(format_money(dec!(450), &Currency::THB), "฿450");
        assert_eq!(format_money(dec!(1_000), &Currency::THB), "฿1,000");
        assert_eq!(format_money(dec!(0), &Currency::THB), "฿0");
    }

    #[test]
    fn rounding_to_whole_units() {
        assert_eq!(format_money(dec!(999.5), &Currency::THB), "฿1,000");
        assert_eq!(format_money(dec!(999.4), &Currency::THB), "฿999");
    }

    #[test]
    fn decimal_mode() {
        assert_eq!(
            format_money_with(dec!(1234.567), &Currency::USD, 2),
            "$1,234.57"
        );
        assert_eq!(format_money_with(dec!(5), &Currency::EUR, 2), "€5.00");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_money(dec!(-89_550), &Currency::THB), "-฿89,550");
    }

    #[test]
    fn large_groups() {
        assert_eq!(
            format_money(dec!(1_234_567_890), &Currency::THB),
            "฿1,234,567,890"
        );
    }

    fn table() -> RateTable {
        RateTable {
            rates: vec![
                CurrencyRate {
                    currency: Currency::USD,
                    thb_per_unit: dec!(36),
                },
                CurrencyRate {
                    currency: Currency::EUR,
                    thb_per_unit: dec!(39.6),
                },
            ],
        }
    }

    #[test]
    fn thb_to_foreign() {
        let result = convert(&table(), dec!(3_600_000), &Currency::THB, &Currency::USD).unwrap();
        assert_eq!(result, dec!(100_000));
    }

    #[test]
    fn foreign_to_foreign_pivots_through_thb() {
        // 100 EUR -> 3,960 THB -> 110 USD
        let result = convert(&table(), dec!(100), &Currency::EUR, &Currency::USD).unwrap();
        assert_eq!(result, dec!(110));
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let err = convert(&table(), dec!(1), &Currency::JPY, &Currency::THB).unwrap_err();
        assert!(matches!(err, TransferTaxError::UnknownExchangeRate { .. }));
    }

    #[test]
    fn thb_needs_no_rate_entry() {
        let empty = RateTable::default();
        let result = convert(&empty, dec!(500), &Currency::THB, &Currency::THB).unwrap();
        assert_eq!(result, dec!(500));
    }
}
