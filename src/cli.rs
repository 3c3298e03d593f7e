use crate::error::CardError;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghcard")]
#[command(about = "GitHub contribution streak and language stats card generator")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "GitHub login to fetch stats for")]
    pub user: String,

    #[arg(long, help = "GitHub API token (falls back to GITHUB_TOKEN)")]
    pub token: Option<String>,

    #[arg(
        long,
        default_value = "https://api.github.com",
        help = "GitHub API base URL"
    )]
    pub api_url: String,

    #[arg(long, help = "Path to cache directory")]
    pub cache: Option<PathBuf>,

    #[arg(long, help = "Bypass the contribution cache", default_value_t = false)]
    pub no_cache: bool,

    #[arg(long, help = "Start of the span (RFC3339, YYYY-MM-DD, or a duration like '90d')")]
    pub since: Option<String>,

    #[arg(long, help = "End of the span (RFC3339, YYYY-MM-DD, or a duration like '90d')")]
    pub until: Option<String>,
}

impl CommonArgs {
    /// Resolve the API token once, at startup; nothing downstream reads
    /// the environment.
    pub fn resolve_token(&self) -> crate::error::Result<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| {
                CardError::Config(
                    "No GitHub token: pass --token or set GITHUB_TOKEN".to_string(),
                )
            })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    Streak {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output day records as NDJSON")]
        ndjson: bool,
    },
    Languages {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(
            long,
            default_value_t = 90.0,
            help = "Exclude languages holding at least this percent of all bytes"
        )]
        threshold: f64,

        #[arg(long, default_value_t = 5, help = "Number of languages to keep")]
        top: usize,
    },
    Card {
        #[arg(long, default_value = "stats_board.svg", help = "Output SVG path")]
        output: PathBuf,

        #[arg(
            long,
            default_value_t = 90.0,
            help = "Exclude languages holding at least this percent of all bytes"
        )]
        threshold: f64,

        #[arg(long, default_value_t = 5, help = "Number of languages to keep")]
        top: usize,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Streak { json, ndjson } => crate::streak::exec(self.common, json, ndjson),
            Commands::Languages {
                json,
                ndjson,
                threshold,
                top,
            } => crate::languages::exec(self.common, json, ndjson, threshold, top),
            Commands::Card {
                output,
                threshold,
                top,
            } => crate::card::exec(self.common, output, threshold, top),
        }
    }
}
