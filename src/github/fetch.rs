use crate::cache::Cache;
use crate::github::GitHubClient;
use crate::model::{DailyRecord, DateSpan};
use anyhow::Context;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

/// Assemble daily contribution records for the whole span, window by
/// window. Closed windows (fully before `as_of`) are served from the
/// cache when every day is present, and written back after a fetch;
/// the trailing window is always fetched fresh.
pub fn fetch_daily_records(
    client: &GitHubClient,
    mut cache: Option<&mut Cache>,
    span: &DateSpan,
    as_of: NaiveDate,
    progress: bool,
) -> anyhow::Result<Vec<DailyRecord>> {
    let windows = span.windows();

    let pb = if progress && windows.len() > 1 {
        ProgressBar::new(windows.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut records = Vec::new();
    for (start, end) in windows {
        pb.set_message(format!("{start}..{end}"));
        let closed = end < as_of;

        if closed {
            if let Some(cache) = cache.as_deref_mut() {
                let cached = cache
                    .get_days(client.login(), start, end)
                    .context("Failed to read cached contribution days")?;
                if cached.len() as i64 == (end - start).num_days() + 1 {
                    records.extend(cached);
                    pb.inc(1);
                    continue;
                }
            }
        }

        let fetched = client
            .fetch_contribution_days(start, end)
            .context("Failed to fetch contribution calendar")?;

        if closed {
            if let Some(cache) = cache.as_deref_mut() {
                cache
                    .store_days(client.login(), &fetched)
                    .context("Failed to store contribution days in cache")?;
            }
        }

        records.extend(fetched);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(records)
}
