use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::scale::TimeScale;

pub const SCHEMA_VERSION: u32 = 1;

/// One row of the per-line export: a single line in a single file as of a
/// single commit. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub commit: String,
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregated view of all line records sharing a commit identifier.
///
/// Scalar fields come from the first input-order record of the group. The
/// constituent records are owned by the summary but deliberately kept out of
/// serialization and the public field set; they are reachable only through
/// [`CommitSummary::lines`].
#[derive(Debug, Clone, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub(crate) lines: Vec<LineRecord>,
}

impl CommitSummary {
    /// The full ordered set of line records that make up this commit.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }
}

/// Continuous 0-24 hour-of-day position for a timestamp.
pub fn hour_frac(datetime: &DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

/// Summary metrics over an arbitrary subset of commits and their records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub commit_count: usize,
    pub file_count: usize,
    pub total_lines: usize,
    pub max_depth: Option<u32>,
    pub longest_line: Option<u32>,
    pub max_file_lines: Option<u32>,
    pub avg_depth: f64,
    pub top_day: Option<String>,
}

/// Per-language share of a record subset, with the proportion preformatted.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageShare {
    pub kind: String,
    pub lines: usize,
    pub share: String,
}

/// Everything derived from one load of the export, built once at startup.
/// Downstream view state filters against it but never mutates it.
pub struct Dataset {
    pub source: String,
    pub total_records: usize,
    pub commits: Vec<CommitSummary>,
    pub scale: Option<TimeScale>,
}

impl Dataset {
    pub fn new(source: String, total_records: usize, commits: Vec<CommitSummary>) -> Self {
        let scale = TimeScale::from_commits(&commits);
        Self {
            source,
            total_records,
            commits,
            scale,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<chrono::Utc>,
    pub source: String,
    pub until: Option<String>,
    pub stats: Stats,
    pub languages: Vec<LanguageShare>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<chrono::Utc>,
    pub source: String,
    pub until: Option<String>,
    pub commits: Vec<CommitSummary>,
}
