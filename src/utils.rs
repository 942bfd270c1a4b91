use chrono::NaiveDate;

/// Rounds to two decimal places. Used only on the way out to the user;
/// stored values stay unrounded.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders a date for table output, with `-` standing in for a row whose
/// date never parsed.
pub(crate) fn fmt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

/// Renders a number for human-facing table output: thousands separators and
/// a fixed two decimal places, e.g. `1,234.50`.
pub(crate) fn fmt_num(value: f64) -> String {
    format_num::format_num!(",.2", value)
}
