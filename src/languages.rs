use crate::cli::CommonArgs;
use crate::github::GitHubClient;
use crate::model::{LanguageByteMap, LanguageShare, LanguagesOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashMap;

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    threshold: f64,
    top: usize,
) -> anyhow::Result<()> {
    let client = GitHubClient::new(&common.api_url, &common.user, common.resolve_token()?)
        .context("Failed to create GitHub client")?;

    let maps = client
        .fetch_language_maps(!json && !ndjson)
        .context("Failed to fetch repository languages")?;

    let shares = rank_languages(&maps, threshold, top);

    if json {
        output_json(&shares, &common, threshold)?;
    } else if ndjson {
        output_ndjson(&shares)?;
    } else {
        output_table(&shares)?;
    }

    Ok(())
}

/// Merge per-repository byte maps, drop any language holding at least
/// `exclusion_threshold` percent of the grand total, recompute shares over
/// the surviving total, and keep the top `top_n` by descending share.
/// Ties keep first-seen insertion order (the sort is stable).
pub fn rank_languages(
    maps: &[LanguageByteMap],
    exclusion_threshold: f64,
    top_n: usize,
) -> Vec<LanguageShare> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for map in maps {
        for (language, bytes) in map {
            totals
                .entry(language.as_str())
                .and_modify(|sum| *sum += bytes)
                .or_insert_with(|| {
                    order.push(language.as_str());
                    *bytes
                });
        }
    }

    let grand_total: u64 = totals.values().sum();
    if grand_total == 0 {
        return Vec::new();
    }

    let kept: Vec<(&str, u64)> = order
        .into_iter()
        .map(|language| (language, totals[language]))
        .filter(|(_, bytes)| (*bytes as f64 / grand_total as f64) * 100.0 < exclusion_threshold)
        .collect();

    let kept_total: u64 = kept.iter().map(|(_, bytes)| *bytes).sum();
    if kept_total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = kept
        .into_iter()
        .map(|(language, bytes)| LanguageShare {
            language: language.to_string(),
            percent: (bytes as f64 / kept_total as f64) * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shares.truncate(top_n);
    shares
}

fn output_json(
    shares: &[LanguageShare],
    common: &CommonArgs,
    threshold: f64,
) -> anyhow::Result<()> {
    let output = LanguagesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        login: common.user.clone(),
        exclusion_threshold: threshold,
        languages: shares.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(shares: &[LanguageShare]) -> anyhow::Result<()> {
    for share in shares {
        println!("{}", serde_json::to_string(share)?);
    }
    Ok(())
}

fn output_table(shares: &[LanguageShare]) -> anyhow::Result<()> {
    if shares.is_empty() {
        println!("No languages to display");
        return Ok(());
    }

    println!(
        "{:<24} {:>8}",
        style("Language").bold(),
        style("Share").bold()
    );
    println!("{}", "─".repeat(34));

    for share in shares {
        let bar_len = (share.percent / 100.0 * 20.0).round() as usize;
        println!(
            "{:<24} {:>7.2}% {}",
            share.language,
            share.percent,
            style("█".repeat(bar_len)).green()
        );
    }

    Ok(())
}
