use crate::cache::Cache;
use crate::cli::CommonArgs;
use crate::github::{fetch_daily_records, GitHubClient};
use crate::languages::rank_languages;
use crate::streak::compute_metrics;
use crate::svg;
use crate::util::resolve_span;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::path::PathBuf;

pub fn exec(
    common: CommonArgs,
    output: PathBuf,
    threshold: f64,
    top: usize,
) -> anyhow::Result<()> {
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

    let records = fetch_daily_records(&client, cache.as_mut(), &span, today, true)?;
    let metrics = compute_metrics(&records, today);

    let maps = client
        .fetch_language_maps(true)
        .context("Failed to fetch repository languages")?;
    let shares = rank_languages(&maps, threshold, top);

    let card = svg::render_card(&metrics, &shares);
    std::fs::write(&output, card)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} ({} contributions, {}-day streak)",
        style("Card written to").bold(),
        output.display(),
        metrics.total_contributions,
        metrics.current_streak
    );
    Ok(())
}
