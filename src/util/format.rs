//! Number formatting utilities.

/// Format a cost with two decimals and a trailing currency symbol.
#[must_use]
pub fn format_cost(value: f64, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

/// Format a cost difference, always signed.
#[must_use]
pub fn format_signed_cost(value: f64, currency: &str) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.2} {currency}")
}

/// Format a per-word rate with three decimals.
#[must_use]
pub fn format_rate(value: f64) -> String {
    format!("{value:.3}")
}

/// Format a percentage with one decimal, signed when positive.
#[must_use]
pub fn format_signed_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

/// Format a whole word count with space-separated thousands.
#[must_use]
pub fn format_words(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Format a model parameter: rates keep three decimals, amounts none.
#[must_use]
pub fn format_param(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format_rate(value)
    }
}
