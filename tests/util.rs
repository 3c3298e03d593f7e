use chrono::NaiveDate;
use ghcard::model::DateSpan;
use ghcard::util::{parse_date_arg, resolve_span};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn parses_plain_dates_and_rfc3339() {
    let today = day("2024-06-01");
    assert_eq!(parse_date_arg("2024-03-05", today).unwrap(), day("2024-03-05"));
    assert_eq!(
        parse_date_arg("2024-03-05T12:30:00Z", today).unwrap(),
        day("2024-03-05")
    );
}

#[test]
fn parses_relative_durations() {
    let today = day("2024-06-01");
    assert_eq!(parse_date_arg("90d", today).unwrap(), day("2024-03-03"));
    assert_eq!(parse_date_arg("30days", today).unwrap(), day("2024-05-02"));
}

#[test]
fn rejects_garbage_dates() {
    assert!(parse_date_arg("not-a-date", day("2024-06-01")).is_err());
}

#[test]
fn default_span_is_trailing_year() {
    let today = day("2024-06-01");
    let span = resolve_span(None, None, today).unwrap();
    assert_eq!(span.until, today);
    assert_eq!(span.days(), 365);
}

#[test]
fn inverted_span_is_rejected() {
    let today = day("2024-06-01");
    assert!(resolve_span(Some("2024-05-01"), Some("2024-04-01"), today).is_err());
}

#[test]
fn windows_cover_long_spans_without_gaps() {
    let span = DateSpan {
        since: day("2021-01-01"),
        until: day("2023-03-10"),
    };
    let windows = span.windows();

    assert_eq!(windows.first().unwrap().0, span.since);
    assert_eq!(windows.last().unwrap().1, span.until);
    for pair in windows.windows(2) {
        assert_eq!(pair[0].1.succ_opt().unwrap(), pair[1].0);
    }
    for (start, end) in &windows {
        assert!(start <= end);
        assert!((*end - *start).num_days() <= 364);
    }

    let covered: i64 = windows
        .iter()
        .map(|(start, end)| (*end - *start).num_days() + 1)
        .sum();
    assert_eq!(covered, span.days());
}

#[test]
fn single_day_span_is_one_window() {
    let span = DateSpan {
        since: day("2024-02-02"),
        until: day("2024-02-02"),
    };
    assert_eq!(span.windows(), vec![(day("2024-02-02"), day("2024-02-02"))]);
}
