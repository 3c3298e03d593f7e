pub mod client;
pub mod fetch;
pub mod types;

pub use client::{GitHubClient, RetryConfig};
pub use fetch::fetch_daily_records;
