//! Currency formatting for PKR display values.
//!
//! All monetary display values are rendered as `"₨ " + grouped 2dp`.
//! Non-finite amounts (NaN, infinities) are coerced to 0 before formatting;
//! stored data can contain garbage and the UI must never propagate it.

/// ISO currency code reported in export summaries.
pub const CURRENCY_CODE: &str = "PKR";

/// Display symbol for the Pakistani Rupee.
pub const CURRENCY_SYMBOL: &str = "₨";

/// Formats an amount as a PKR display string, e.g. `"₨ 4,500,000.00"`.
///
/// Non-finite input is coerced to 0, so this never panics and never renders
/// `NaN`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL} {}", format_amount(amount))
}

/// Formats an amount without the currency symbol, e.g. `"4,500,000.00"`.
///
/// Rounds to two decimal places and groups the integer part in thousands.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let safe_amount = if amount.is_finite() { amount } else { 0.0 };

    let rounded = format!("{:.2}", safe_amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    // Avoid "-0.00" when a tiny negative rounds away
    let sign = if safe_amount < 0.0 && rounded != "0.00" {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped}.{frac_part}")
}
