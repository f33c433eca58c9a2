//! Display formatting for amounts and dates (es-CO conventions)

use presupuestos_client::parse_iso_date;
use presupuestos_config::{CurrencyConfig, SymbolPosition};
use presupuestos_utils::format_number;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a money amount per the currency settings, e.g. `$ 1.500.000,00`
pub fn format_amount(amount: Decimal, currency: &CurrencyConfig) -> String {
    let rounded = amount.round_dp_with_strategy(currency.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", currency.decimal_places as usize, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut number = format_number(int_part, &currency.thousands_separator);
    if !frac_part.is_empty() {
        number.push_str(&currency.decimal_separator);
        number.push_str(frac_part);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{} {}", sign, currency.symbol, number),
        SymbolPosition::After => format!("{}{} {}", sign, number, currency.symbol),
    }
}

/// Format an ISO date as `d/m/YYYY`; unparseable input is returned as is
pub fn format_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Some(date) => date.format("%-d/%-m/%Y").to_string(),
        None => raw.to_string(),
    }
}
