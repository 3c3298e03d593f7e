use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One calendar day of contribution activity, treated as UTC midnight.
/// At most one record per date survives aggregation (last one wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionMetrics {
    pub total_contributions: u64,
    pub current_streak: u32,
    pub current_streak_start: Option<NaiveDate>,
    pub longest_streak: u32,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
}

/// Per-repository language byte counts as ordered pairs. Order is
/// preserved so ranking ties keep first-seen insertion order.
pub type LanguageByteMap = Vec<(String, u64)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub login: String,
    pub as_of: NaiveDate,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub metrics: ContributionMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub login: String,
    pub exclusion_threshold: f64,
    pub languages: Vec<LanguageShare>,
}

/// A resolved, inclusive span of calendar days.
#[derive(Debug, Clone, Copy)]
pub struct DateSpan {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateSpan {
    pub fn days(&self) -> i64 {
        (self.until - self.since).num_days() + 1
    }

    /// Split the span into windows of at most one year, oldest first.
    /// The contribution calendar endpoint caps a single query at a year,
    /// so longer spans are fetched window by window and concatenated.
    pub fn windows(&self) -> Vec<(NaiveDate, NaiveDate)> {
        let mut windows = Vec::new();
        let mut start = self.since;
        while start <= self.until {
            let end = start
                .checked_add_days(Days::new(364))
                .map_or(self.until, |d| d.min(self.until));
            windows.push((start, end));
            start = match end.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => break,
            };
        }
        windows
    }
}
