use crate::error::CardError;
use crate::model::DailyRecord;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarData {
    pub user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<ContributionDay>,
}

/// One day as returned by the API. Count is signed here so a malformed
/// payload is caught during conversion instead of corrupting streaks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: String,
    pub contribution_count: i64,
}

impl TryFrom<ContributionDay> for DailyRecord {
    type Error = CardError;

    fn try_from(day: ContributionDay) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").map_err(|e| {
            CardError::InvalidRecord {
                date: day.date.clone(),
                reason: e.to_string(),
            }
        })?;
        let count = u32::try_from(day.contribution_count).map_err(|_| CardError::InvalidRecord {
            date: day.date.clone(),
            reason: format!("negative contribution count {}", day.contribution_count),
        })?;
        Ok(DailyRecord { date, count })
    }
}

#[derive(Debug, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub languages_url: String,
}

/// Byte counts per language for one repository. BTreeMap keeps the
/// per-repo ordering deterministic.
pub type RepoLanguages = BTreeMap<String, u64>;
