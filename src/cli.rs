use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::{apply_filter, FilterCriterion};
use crate::model::{CommitSummary, Dataset, LineRecord};
use crate::{aggregate, loader, output, stats};

#[derive(Parser)]
#[command(name = "loclens")]
#[command(about = "Commit history explorer for per-line LOC exports")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the per-line export")]
    pub input: PathBuf,

    #[arg(long, help = "Base repository URL for commit deep links")]
    pub repo_url: Option<String>,

    #[arg(long, help = "Only include commits up to this time (RFC3339, YYYY-MM-DDTHH:MM, or YYYY-MM-DD)")]
    pub until: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print summary statistics and the language breakdown
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// List aggregated commit summaries in chronological order
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Explore the history interactively in the terminal
    #[command(alias = "tui", alias = "ui")]
    View,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let data = load_dataset(&self.common)?;
        let filtered = filtered_commits(&data, self.common.until.as_deref())?;
        let until = self.common.until.as_deref();

        match self.command {
            Commands::Stats { json } => {
                let stats = stats::summarize(filtered.iter().copied());
                let records: Vec<&LineRecord> =
                    filtered.iter().flat_map(|c| c.lines()).collect();
                let languages = stats::language_shares(records.into_iter());
                if json {
                    output::stats_json(&stats, languages, &data.source, until)?;
                } else {
                    output::stats_summary(&stats, &languages, until);
                }
            }
            Commands::Commits { json, ndjson } => {
                let commits: Vec<CommitSummary> = filtered.into_iter().cloned().collect();
                if json {
                    output::commits_json(&commits, &data.source, until)?;
                } else if ndjson {
                    output::commits_ndjson(&commits)?;
                } else {
                    output::commits_summary(&commits);
                }
            }
            Commands::View => {
                crate::tui::run(data).context("Terminal UI failed")?;
            }
        }
        Ok(())
    }
}

/// Load, parse, and aggregate the export. Aggregation sorts by datetime
/// before the time scale is built, and any failure aborts the pipeline
/// instead of rendering against partial data.
fn load_dataset(common: &CommonArgs) -> Result<Dataset> {
    let records = loader::load_records(&common.input)
        .with_context(|| format!("Failed to load export from {}", common.input.display()))?;
    let total_records = records.len();
    let commits = aggregate::aggregate(records, common.repo_url.as_deref().unwrap_or(""));
    Ok(Dataset::new(
        common.input.display().to_string(),
        total_records,
        commits,
    ))
}

fn filtered_commits<'a>(data: &'a Dataset, until: Option<&str>) -> Result<Vec<&'a CommitSummary>> {
    let criterion = match until {
        Some(raw) => FilterCriterion::Cutoff(parse_cutoff(raw)?),
        None => FilterCriterion::All,
    };
    let indices = apply_filter(&data.commits, data.scale.as_ref(), &criterion);
    Ok(indices.into_iter().map(|i| &data.commits[i]).collect())
}

/// Accepts RFC3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), or a bare
/// date, which includes the whole day.
fn parse_cutoff(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    let utc = FixedOffset::east_opt(0).context("UTC offset")?;
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            if let Some(dt) = utc.from_local_datetime(&naive).single() {
                return Ok(dt);
            }
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(end_of_day) = date.and_hms_opt(23, 59, 59) {
            if let Some(dt) = utc.from_local_datetime(&end_of_day).single() {
                return Ok(dt);
            }
        }
    }
    anyhow::bail!("Unrecognized --until value '{value}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_accepts_the_supported_shapes() {
        assert!(parse_cutoff("2024-01-01T23:59:00+00:00").is_ok());
        assert!(parse_cutoff("2024-01-01T23:59").is_ok());
        assert!(parse_cutoff("2024-01-01").is_ok());
        assert!(parse_cutoff("yesterday").is_err());
    }

    #[test]
    fn bare_date_cutoff_covers_the_whole_day() {
        let dt = parse_cutoff("2024-01-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T23:59:59+00:00");
    }
}
