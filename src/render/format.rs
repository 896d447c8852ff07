use chrono::{DateTime, Utc};

/// Compact a count with K/M suffixes, one decimal place
pub fn format_count(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }

    let thousands = format!("{:.1}", n as f64 / 1_000.0);
    // 999_950 and up round to "1000.0", which belongs to the M range
    if n >= 1_000_000 || thousands == "1000.0" {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else {
        format!("{thousands}K")
    }
}

/// Absolute calendar date, e.g. "Jan 5, 2020"
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Relative date for recent timestamps, absolute otherwise.
///
/// Same-day and future timestamps, and anything a year or older, fall
/// back to [`format_date`].
pub fn format_relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - ts).num_days();

    match days {
        1 => "yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural(days / 7, "week"),
        30..=364 => plural(days / 30, "month"),
        _ => format_date(ts),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
