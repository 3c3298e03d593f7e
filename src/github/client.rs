use crate::error::{CardError, Result};
use crate::model::{DailyRecord, LanguageByteMap};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

use super::types::{CalendarData, GraphQlResponse, RepoLanguages, RepoSummary};

const CONTRIBUTIONS_QUERY: &str = "
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
";

/// Retry policy for transient API failures: HTTP 429 and 5xx responses
/// and network errors, with exponential backoff capped at `max_backoff`
/// seconds. A Retry-After header takes precedence over the computed wait.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub max_backoff: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            max_backoff: 60.0,
        }
    }
}

impl RetryConfig {
    fn backoff_time(&self, attempt: u32, retry_after: Option<u64>) -> f64 {
        if let Some(after) = retry_after {
            return (after as f64).min(self.max_backoff);
        }
        self.backoff_factor.powi(attempt as i32).min(self.max_backoff)
    }
}

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
    login: String,
    retry: RetryConfig,
}

impl GitHubClient {
    pub fn new(api_url: &str, login: &str, token: String) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("ghcard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            login: login.to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Fetch the contribution calendar for one window (at most a year) and
    /// flatten it into per-day records clamped to the window bounds. The
    /// API pads the calendar to whole weeks, so edge days outside the
    /// requested range are dropped here.
    pub fn fetch_contribution_days(
        &self,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        tracing::debug!(login = %self.login, %since, %until, "fetching contribution window");

        let variables = json!({
            "login": self.login,
            "from": format!("{}T00:00:00Z", since.format("%Y-%m-%d")),
            "to": format!("{}T23:59:59Z", until.format("%Y-%m-%d")),
        });
        let data: CalendarData = self.graphql(CONTRIBUTIONS_QUERY, variables)?;

        let user = data
            .user
            .ok_or_else(|| CardError::Api(format!("GitHub user '{}' not found", self.login)))?;

        let mut records = Vec::new();
        for week in user.contributions_collection.contribution_calendar.weeks {
            for day in week.contribution_days {
                let record = DailyRecord::try_from(day)?;
                if record.date >= since && record.date <= until {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    /// Fetch language byte maps for every repository of the account.
    /// A repository whose language listing fails is skipped with a
    /// warning rather than failing the whole run.
    pub fn fetch_language_maps(&self, progress: bool) -> Result<Vec<LanguageByteMap>> {
        let repos = self.fetch_repositories()?;

        let pb = if progress {
            ProgressBar::new(repos.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut maps = Vec::new();
        for repo in &repos {
            pb.set_message(repo.name.clone());
            match self.get_json::<RepoLanguages>(&repo.languages_url) {
                Ok(languages) => maps.push(languages.into_iter().collect()),
                Err(err) => {
                    tracing::warn!(repo = %repo.name, error = %err, "skipping repository languages");
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(maps)
    }

    fn fetch_repositories(&self) -> Result<Vec<RepoSummary>> {
        let mut repos = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!(
                "{}/users/{}/repos?page={}&per_page=100",
                self.api_url, self.login, page
            );
            let batch: Vec<RepoSummary> = self.get_json(&url)?;
            if batch.is_empty() {
                break;
            }
            repos.extend(batch);
            page += 1;
        }
        tracing::debug!(login = %self.login, count = repos.len(), "fetched repository list");
        Ok(repos)
    }

    fn graphql<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let body = json!({ "query": query, "variables": variables });
        let response = self.execute_with_retry(|| {
            self.http
                .post(format!("{}/graphql", self.api_url))
                .bearer_auth(&self.token)
                .json(&body)
                .send()
        })?;

        let envelope: GraphQlResponse<T> = response.json()?;
        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(CardError::Api(messages.join("; ")));
        }
        envelope
            .data
            .ok_or_else(|| CardError::Api("GraphQL response carried no data".to_string()))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.execute_with_retry(|| {
            self.http
                .get(url)
                .bearer_auth(&self.token)
                .header(ACCEPT, "application/vnd.github+json")
                .send()
        })?;
        Ok(response.json()?)
    }

    fn execute_with_retry(
        &self,
        send: impl Fn() -> reqwest::Result<Response>,
    ) -> Result<Response> {
        let mut attempt = 0u32;
        loop {
            match send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    if !retryable || attempt >= self.retry.max_retries {
                        return Err(Self::api_error(response));
                    }

                    let retry_after = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok());
                    let wait = self.retry.backoff_time(attempt, retry_after);
                    tracing::warn!(%status, attempt, wait, "retrying GitHub request");
                    std::thread::sleep(Duration::from_secs_f64(wait));
                }
                Err(err) => {
                    if attempt >= self.retry.max_retries {
                        return Err(err.into());
                    }
                    let wait = self.retry.backoff_time(attempt, None);
                    tracing::warn!(error = %err, attempt, wait, "retrying GitHub request");
                    std::thread::sleep(Duration::from_secs_f64(wait));
                }
            }
            attempt += 1;
        }
    }

    fn api_error(response: Response) -> CardError {
        let status = response.status();
        let body: serde_json::Value = response.json().unwrap_or_else(|_| json!({}));
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        if message.is_empty() {
            CardError::Api(format!("HTTP {status}"))
        } else {
            CardError::Api(format!("HTTP {status}: {message}"))
        }
    }
}
