use chrono::NaiveDate;
use ghcard::model::{ContributionMetrics, DailyRecord};
use ghcard::streak::compute_metrics;
use pretty_assertions::assert_eq;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rec(s: &str, count: u32) -> DailyRecord {
    DailyRecord { date: day(s), count }
}

#[test]
fn empty_input_yields_zero_metrics() {
    let metrics = compute_metrics(&[], day("2024-01-05"));
    assert_eq!(metrics, ContributionMetrics::default());
}

#[test]
fn all_future_input_yields_zero_metrics() {
    let records = vec![rec("2024-02-01", 3), rec("2024-02-02", 1)];
    let metrics = compute_metrics(&records, day("2024-01-05"));
    assert_eq!(metrics, ContributionMetrics::default());
}

#[test]
fn simple_consecutive_streak() {
    // 2024-01-01 is a Monday, 2024-01-05 a Friday
    let records: Vec<DailyRecord> = (1..=5).map(|d| rec(&format!("2024-01-0{d}"), 1)).collect();
    let metrics = compute_metrics(&records, day("2024-01-05"));

    assert_eq!(metrics.total_contributions, 5);
    assert_eq!(metrics.current_streak, 5);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-01")));
    assert_eq!(metrics.longest_streak, 5);
    assert_eq!(metrics.longest_streak_start, Some(day("2024-01-01")));
    assert_eq!(metrics.longest_streak_end, Some(day("2024-01-05")));
}

#[test]
fn weekday_gap_resets_streak() {
    // Monday contribution, Tuesday missing entirely, Wednesday contribution
    let records = vec![rec("2024-01-01", 1), rec("2024-01-03", 1)];
    let metrics = compute_metrics(&records, day("2024-01-03"));

    assert_eq!(metrics.current_streak, 1);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-03")));
    assert_eq!(metrics.longest_streak, 1);
    assert_eq!(metrics.total_contributions, 2);
}

#[test]
fn weekday_zero_record_resets_streak() {
    let records = vec![rec("2024-01-01", 1), rec("2024-01-02", 0), rec("2024-01-03", 1)];
    let metrics = compute_metrics(&records, day("2024-01-03"));

    assert_eq!(metrics.current_streak, 1);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-03")));
    assert_eq!(metrics.longest_streak, 1);
}

#[test]
fn weekend_pause_keeps_streak_alive() {
    // Friday 01-05, zero-count weekend records, Monday 01-08
    let records = vec![
        rec("2024-01-05", 1),
        rec("2024-01-06", 0),
        rec("2024-01-07", 0),
        rec("2024-01-08", 1),
    ];
    let metrics = compute_metrics(&records, day("2024-01-08"));

    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-05")));
    assert_eq!(metrics.longest_streak, 2);
}

#[test]
fn missing_weekend_records_still_bridge() {
    // Same scenario but the calendar omits the weekend days entirely
    let records = vec![rec("2024-01-05", 1), rec("2024-01-08", 1)];
    let metrics = compute_metrics(&records, day("2024-01-08"));

    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-05")));
}

#[test]
fn weekend_zero_days_do_not_grow_streak() {
    let records = vec![rec("2024-01-05", 1), rec("2024-01-06", 0), rec("2024-01-07", 0)];
    let metrics = compute_metrics(&records, day("2024-01-07"));

    assert_eq!(metrics.current_streak, 1);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-05")));
}

#[test]
fn weekend_contributions_extend_streak() {
    let records = vec![
        rec("2024-01-05", 1),
        rec("2024-01-06", 2),
        rec("2024-01-07", 0),
        rec("2024-01-08", 1),
    ];
    let metrics = compute_metrics(&records, day("2024-01-08"));

    assert_eq!(metrics.current_streak, 3);
    assert_eq!(metrics.current_streak_start, Some(day("2024-01-05")));
    assert_eq!(metrics.total_contributions, 4);
}

#[test]
fn trailing_weekday_zero_clears_current_but_not_longest() {
    let records = vec![
        rec("2024-01-01", 1),
        rec("2024-01-02", 1),
        rec("2024-01-03", 0),
    ];
    let metrics = compute_metrics(&records, day("2024-01-03"));

    assert_eq!(metrics.current_streak, 0);
    assert_eq!(metrics.current_streak_start, None);
    assert_eq!(metrics.longest_streak, 2);
    assert_eq!(metrics.longest_streak_start, Some(day("2024-01-01")));
    assert_eq!(metrics.longest_streak_end, Some(day("2024-01-02")));
}

#[test]
fn longest_streak_survives_later_short_streak() {
    // Five-day run, then a gap over Monday 01-08, then a two-day tail
    let mut records: Vec<DailyRecord> =
        (1..=5).map(|d| rec(&format!("2024-01-0{d}"), 1)).collect();
    records.push(rec("2024-01-09", 1));
    records.push(rec("2024-01-10", 1));
    let metrics = compute_metrics(&records, day("2024-01-10"));

    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.longest_streak, 5);
    assert_eq!(metrics.longest_streak_start, Some(day("2024-01-01")));
    assert_eq!(metrics.longest_streak_end, Some(day("2024-01-05")));
    assert!(metrics.longest_streak >= metrics.current_streak);
}

#[test]
fn future_dates_are_excluded() {
    let records = vec![rec("2024-01-01", 1), rec("2024-01-02", 1), rec("2024-01-10", 5)];
    let metrics = compute_metrics(&records, day("2024-01-02"));

    assert_eq!(metrics.total_contributions, 2);
    assert_eq!(metrics.current_streak, 2);
}

#[test]
fn total_is_independent_of_streak_logic() {
    let records = vec![rec("2024-01-01", 3), rec("2024-01-03", 2)];
    let metrics = compute_metrics(&records, day("2024-01-03"));

    assert_eq!(metrics.total_contributions, 5);
    assert_eq!(metrics.current_streak, 1);
}

#[test]
fn result_is_independent_of_input_order() {
    let records = vec![
        rec("2024-01-01", 1),
        rec("2024-01-02", 2),
        rec("2024-01-03", 0),
        rec("2024-01-04", 1),
        rec("2024-01-05", 1),
        rec("2024-01-08", 3),
    ];
    let expected = compute_metrics(&records, day("2024-01-08"));

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(compute_metrics(&reversed, day("2024-01-08")), expected);

    let mut rotated = records.clone();
    rotated.rotate_left(3);
    assert_eq!(compute_metrics(&rotated, day("2024-01-08")), expected);

    let mut interleaved: Vec<DailyRecord> = records.iter().step_by(2).copied().collect();
    interleaved.extend(records.iter().skip(1).step_by(2).copied());
    assert_eq!(compute_metrics(&interleaved, day("2024-01-08")), expected);
}

#[test]
fn duplicate_dates_keep_last_record() {
    let records = vec![rec("2024-01-01", 2), rec("2024-01-01", 5)];
    let metrics = compute_metrics(&records, day("2024-01-01"));

    assert_eq!(metrics.total_contributions, 5);
    assert_eq!(metrics.current_streak, 1);
}

#[test]
fn caller_input_is_not_mutated() {
    let records = vec![rec("2024-01-03", 1), rec("2024-01-01", 1)];
    let before = records.clone();
    let _ = compute_metrics(&records, day("2024-01-03"));
    assert_eq!(records, before);
}
