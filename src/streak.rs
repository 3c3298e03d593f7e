use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::github::{fetch_daily_records, GitHubClient};
use crate::model::{ContributionMetrics, DailyRecord, DateSpan, StreakOutput, SCHEMA_VERSION};
use crate::util::{format_day, format_day_range, is_weekend, resolve_span};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use console::style;
use std::collections::BTreeMap;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let client = GitHubClient::new(&common.api_url, &common.user, common.resolve_token()?)
        .context("Failed to create GitHub client")?;

    let today = Utc::now().date_naive();
    let span = resolve_span(common.since.as_deref(), common.until.as_deref(), today)
        .context("Failed to resolve date range")?;

    let mut cache = if common.no_cache {
        None
    } else {
        Some(Cache::new(common.cache.as_deref()).context("Failed to initialize cache")?)
    };

    // Keep progress bars out of JSON/NDJSON runs
    let records = fetch_daily_records(&client, cache.as_mut(), &span, today, !json && !ndjson)?;
    let metrics = compute_metrics(&records, today);

    if json {
        output_json(&metrics, &common, &span, today)?;
    } else if ndjson {
        output_ndjson(&records)?;
    } else {
        output_summary(&metrics, &span)?;
    }

    Ok(())
}

/// Aggregate a sparse daily contribution calendar into totals and streaks.
///
/// Records after `as_of` are ignored. Input order is irrelevant: records
/// are keyed by date before scanning, and a duplicate date keeps the last
/// record seen. A weekend day with zero contributions pauses an active
/// streak; a weekday with zero contributions breaks it. A contribution
/// extends the streak when every calendar day since the previous counted
/// one is a weekend day, so a Friday-to-Monday gap stays continuous.
pub fn compute_metrics(records: &[DailyRecord], as_of: NaiveDate) -> ContributionMetrics {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        if record.date > as_of {
            continue;
        }
        by_date.insert(record.date, record.count);
    }

    let mut total: u64 = 0;
    let mut current: u32 = 0;
    let mut current_start: Option<NaiveDate> = None;
    let mut longest: u32 = 0;
    let mut longest_start: Option<NaiveDate> = None;
    let mut longest_end: Option<NaiveDate> = None;
    let mut last_counted: Option<NaiveDate> = None;

    for (&date, &count) in &by_date {
        total += u64::from(count);

        if count > 0 {
            let contiguous = last_counted.map_or(true, |prev| only_weekends_between(prev, date));
            if contiguous {
                current += 1;
                if current == 1 {
                    current_start = Some(date);
                }
            } else {
                current = 1;
                current_start = Some(date);
            }
            last_counted = Some(date);

            if current > longest {
                longest = current;
                longest_start = current_start;
                longest_end = Some(date);
            }
        } else if !is_weekend(date) {
            current = 0;
            current_start = None;
            last_counted = None;
        }
        // weekend with zero contributions: streak pauses, state untouched
    }

    ContributionMetrics {
        total_contributions: total,
        current_streak: current,
        current_streak_start: current_start,
        longest_streak: longest,
        longest_streak_start: longest_start,
        longest_streak_end: longest_end,
    }
}

/// True when every day strictly between `prev` and `next` is a Saturday
/// or Sunday. Adjacent days are vacuously contiguous. The gap can hold at
/// most two weekend days, so this terminates after a handful of steps.
fn only_weekends_between(prev: NaiveDate, next: NaiveDate) -> bool {
    let mut day = prev;
    loop {
        day = match day.succ_opt() {
            Some(d) => d,
            None => return false,
        };
        if day >= next {
            return true;
        }
        if !is_weekend(day) {
            return false;
        }
    }
}

fn output_json(
    metrics: &ContributionMetrics,
    common: &CommonArgs,
    span: &DateSpan,
    as_of: NaiveDate,
) -> anyhow::Result<()> {
    let output = StreakOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        login: common.user.clone(),
        as_of,
        since: span.since,
        until: span.until,
        metrics: metrics.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(records: &[DailyRecord]) -> anyhow::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn output_summary(metrics: &ContributionMetrics, span: &DateSpan) -> anyhow::Result<()> {
    println!("{}", style("Contribution Summary").bold());
    println!("{}", "─".repeat(50));
    println!(
        "Span: {} to {}",
        style(format_day(span.since)).dim(),
        style(format_day(span.until)).dim()
    );
    println!(
        "Total contributions: {}",
        style(metrics.total_contributions).cyan()
    );
    println!(
        "Current streak: {} days ({})",
        style(metrics.current_streak).green(),
        format_day_range(metrics.current_streak_start, None)
    );
    println!(
        "Longest streak: {} days ({})",
        style(metrics.longest_streak).yellow(),
        format_day_range(metrics.longest_streak_start, metrics.longest_streak_end)
    );

    Ok(())
}
