use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Amounts are always shown in Ghanaian cedi with grouped thousands;
/// there is no currency conversion anywhere.
pub fn cedi(amount: Decimal) -> String {
    let normalized = amount.round_dp(2).normalize();
    let rendered = if normalized.fract().is_zero() {
        normalized.trunc().to_string()
    } else {
        format!("{:.2}", normalized)
    };
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(frac) => format!("GH₵{sign}{grouped}.{frac}"),
        None => format!("GH₵{sign}{grouped}"),
    }
}

pub fn long_datetime(instant: DateTime<Utc>) -> String {
    instant.format("%A, %B %e, %Y %H:%M UTC").to_string()
}

pub fn short_datetime(instant: DateTime<Utc>) -> String {
    instant.format("%a, %b %e %Y %H:%M").to_string()
}

pub fn date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
