use std::collections::{HashMap, HashSet};

use chrono::Datelike;

use crate::model::{CommitSummary, LanguageShare, LineRecord, Stats};
use crate::util::format_share;

/// Compute summary metrics over a subset of commits and their flattened
/// line records. Pure function of its inputs; callers re-run it whenever the
/// active subset changes.
pub fn summarize<'a, I>(commits: I) -> Stats
where
    I: IntoIterator<Item = &'a CommitSummary>,
{
    let commits: Vec<&CommitSummary> = commits.into_iter().collect();
    let records: Vec<&LineRecord> = commits.iter().flat_map(|c| c.lines()).collect();

    let files: HashSet<&str> = records.iter().map(|r| r.file.as_str()).collect();

    // File size, not edit volume: each file contributes its largest seen line
    // position, and the maximum of those wins.
    let mut file_max_line: HashMap<&str, u32> = HashMap::new();
    for r in &records {
        let entry = file_max_line.entry(r.file.as_str()).or_insert(0);
        *entry = (*entry).max(r.line);
    }

    let avg_depth = if records.is_empty() {
        0.0
    } else {
        let mean = records.iter().map(|r| r.depth as f64).sum::<f64>() / records.len() as f64;
        (mean * 100.0).round() / 100.0
    };

    Stats {
        commit_count: commits.len(),
        file_count: files.len(),
        total_lines: records.len(),
        max_depth: records.iter().map(|r| r.depth).max(),
        longest_line: records.iter().map(|r| r.length).max(),
        max_file_lines: file_max_line.values().copied().max(),
        avg_depth,
        top_day: top_day(&records),
    }
}

/// The calendar weekday with the most changed lines, ties broken by the
/// first-encountered weekday in record order. `None` when there is no data.
fn top_day(records: &[&LineRecord]) -> Option<String> {
    let mut order: Vec<chrono::Weekday> = Vec::new();
    let mut counts: HashMap<chrono::Weekday, usize> = HashMap::new();
    for r in records {
        let day = r.datetime.weekday();
        if !counts.contains_key(&day) {
            order.push(day);
        }
        *counts.entry(day).or_insert(0) += 1;
    }

    let mut best: Option<(chrono::Weekday, usize)> = None;
    for day in order {
        let count = counts[&day];
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((day, count));
        }
    }
    best.map(|(day, _)| weekday_name(day).to_string())
}

fn weekday_name(day: chrono::Weekday) -> &'static str {
    match day {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

/// Count records per language/file-type label, in first-encounter order.
pub fn language_breakdown<'a, I>(records: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a LineRecord>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for r in records {
        match index.get(&r.kind) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(r.kind.clone(), counts.len());
                counts.push((r.kind.clone(), 1));
            }
        }
    }
    counts
}

/// Breakdown with preformatted proportions, for serialized output.
pub fn language_shares<'a, I>(records: I) -> Vec<LanguageShare>
where
    I: IntoIterator<Item = &'a LineRecord>,
{
    let counts = language_breakdown(records);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .into_iter()
        .map(|(kind, lines)| LanguageShare {
            kind,
            lines,
            share: format_share(lines, total),
        })
        .collect()
}
