//! Presentation helpers for money and dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Balance, MonthKey};

/// Locale-aware formatting preferences for monetary values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSettings {
    pub currency: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl FormatSettings {
    /// Separators for a BCP 47 tag such as `en-US` or `de-DE`.
    pub fn for_locale(locale: &str, currency: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            currency: currency.to_ascii_uppercase(),
            decimal_separator,
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "PHP" => "₱".into(),
        "AUD" => "A$".into(),
        "CAD" => "CA$".into(),
        _ => format!("{code} "),
    }
}

/// Groups the whole part and appends two fraction digits.
pub fn format_minor(settings: &FormatSettings, minor: i64) -> String {
    let magnitude = minor.unsigned_abs();
    let whole = group_digits(&(magnitude / 100).to_string(), settings.grouping_separator);
    format!("{}{}{:02}", whole, settings.decimal_separator, magnitude % 100)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders e.g. `$1,234.50`.
pub fn format_currency(amount: Amount, settings: &FormatSettings) -> String {
    format!(
        "{}{}",
        symbol_for(&settings.currency),
        format_minor(settings, amount.minor())
    )
}

/// Renders a signed value, e.g. `-$800.00`.
pub fn format_balance(balance: Balance, settings: &FormatSettings) -> String {
    let body = format_currency(balance.magnitude(), settings);
    if balance.is_negative() {
        format!("-{body}")
    } else {
        body
    }
}

/// Renders e.g. `Jan 15, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        month_label(date.month()),
        date.day(),
        date.year()
    )
}

/// Renders e.g. `Jan 2024`.
pub fn format_month(month: MonthKey) -> String {
    format!("{} {}", month_label(month.month()), month.year())
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
