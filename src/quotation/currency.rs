//! Currency formatting with explicit separators.

use rust_decimal::{Decimal, RoundingStrategy};

/// How an amount is written: symbol prefix, thousands and decimal separators.
/// Amounts are always rounded half away from zero to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

/// Brazilian Real: `R$ 1.234,50`.
pub const BRL: CurrencyFormat = CurrencyFormat {
    symbol: "R$ ",
    thousands_separator: '.',
    decimal_separator: ',',
};

impl CurrencyFormat {
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let digits = format!("{:.2}", rounded.abs());
        let (units, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        format!(
            "{}{}{}{}{}",
            self.symbol, sign, grouped, self.decimal_separator, cents
        )
    }
}

/// Format an amount as Brazilian Real.
pub fn format_currency(amount: Decimal) -> String {
    BRL.format(amount)
}
