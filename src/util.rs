use crate::error::{CardError, Result};
use crate::model::DateSpan;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Resolve `--since`/`--until` into a concrete span. The default span is
/// the trailing 365 days ending today.
pub fn resolve_span(
    since: Option<&str>,
    until: Option<&str>,
    today: NaiveDate,
) -> Result<DateSpan> {
    let until = match until {
        Some(u) => parse_date_arg(u, today)?,
        None => today,
    };
    let since = match since {
        Some(s) => parse_date_arg(s, today)?,
        None => until.checked_sub_days(Days::new(364)).unwrap_or(until),
    };

    if since > until {
        return Err(CardError::InvalidDate(format!(
            "Invalid range: since ({}) is after until ({})",
            since, until
        )));
    }

    Ok(DateSpan { since, until })
}

pub fn parse_date_arg(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    // Relative duration (e.g., "90d", "2 weeks"), counted back from today
    if let Ok(duration) = humantime::parse_duration(input) {
        let days = duration.as_secs() / 86_400;
        return today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| CardError::InvalidDate(format!("Duration overflow for '{input}'")));
    }

    Err(CardError::InvalidDate(format!(
        "Invalid date '{input}': expected RFC3339, YYYY-MM-DD, or a duration"
    )))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_day_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) if s == e => format_day(s),
        (Some(s), Some(e)) => format!("{} - {}", format_day(s), format_day(e)),
        (Some(s), None) => format!("Since {}", format_day(s)),
        _ => "-".to_string(),
    }
}
