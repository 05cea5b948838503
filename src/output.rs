use chrono::Utc;
use console::style;

use crate::model::{CommitSummary, CommitsOutput, LanguageShare, Stats, StatsOutput, SCHEMA_VERSION};
use crate::util::truncate;

pub fn stats_json(
    stats: &Stats,
    languages: Vec<LanguageShare>,
    source: &str,
    until: Option<&str>,
) -> anyhow::Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        until: until.map(str::to_string),
        stats: stats.clone(),
        languages,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn stats_summary(stats: &Stats, languages: &[LanguageShare], until: Option<&str>) {
    if let Some(until) = until {
        println!("Filtering commits until {until}");
    }

    println!("{}", style("Codebase Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Commits:      {}", style(stats.commit_count).cyan());
    println!("Files:        {}", style(stats.file_count).cyan());
    println!("Total LOC:    {}", style(stats.total_lines).cyan());
    println!("Max depth:    {}", style(opt(stats.max_depth)).green());
    println!("Longest line: {}", style(opt(stats.longest_line)).green());
    println!("Max lines:    {}", style(opt(stats.max_file_lines)).green());
    println!("Avg depth:    {}", style(format!("{:.2}", stats.avg_depth)).green());
    println!(
        "Top day:      {}",
        style(stats.top_day.as_deref().unwrap_or("N/A")).yellow()
    );

    if !languages.is_empty() {
        println!("\n{}", style("Language Breakdown").bold());
        println!("{}", "─".repeat(50));
        for share in languages {
            println!(
                "{:<12} {:>6} lines ({})",
                style(&share.kind).magenta(),
                share.lines,
                share.share
            );
        }
    }
}

fn opt(v: Option<u32>) -> String {
    v.map_or_else(|| "N/A".to_string(), |n| n.to_string())
}

pub fn commits_json(
    commits: &[CommitSummary],
    source: &str,
    until: Option<&str>,
) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        until: until.map(str::to_string),
        commits: commits.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn commits_ndjson(commits: &[CommitSummary]) -> anyhow::Result<()> {
    for commit in commits {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

pub fn commits_summary(commits: &[CommitSummary]) {
    if commits.is_empty() {
        println!("No commits to display");
        return;
    }

    println!("{}", style("Commit History").bold());
    println!("{}", "─".repeat(72));
    for commit in commits {
        println!(
            "{} {} {:>5} lines  {}",
            style(truncate(&commit.id, 8)).cyan(),
            commit.datetime.format("%Y-%m-%d %H:%M"),
            commit.total_lines,
            style(&commit.author).magenta(),
        );
    }

    let first = &commits[0];
    let last = &commits[commits.len() - 1];
    println!(
        "\n{} commits, {} to {}",
        commits.len(),
        style(first.datetime.format("%Y-%m-%d")).dim(),
        style(last.datetime.format("%Y-%m-%d")).dim()
    );
}
