use std::collections::HashMap;

use crate::model::{hour_frac, CommitSummary, LineRecord};

/// Group line records by commit identifier into commit summaries.
///
/// Grouping preserves encounter order, so the representative scalar fields
/// (author, date, time, timezone, datetime) always come from the first
/// input-order record of each commit. The result is sorted ascending by
/// `datetime`; the sort is stable, so ties keep group-encounter order.
///
/// Records are moved into their summaries: each record ends up owned by
/// exactly one commit.
pub fn aggregate(records: Vec<LineRecord>, repo_url: &str) -> Vec<CommitSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineRecord>> = Vec::new();

    for record in records {
        match index.get(&record.commit) {
            Some(&i) => groups[i].push(record),
            None => {
                index.insert(record.commit.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    let mut commits: Vec<CommitSummary> = groups
        .into_iter()
        .map(|lines| {
            let first = &lines[0];
            CommitSummary {
                id: first.commit.clone(),
                url: commit_url(repo_url, &first.commit),
                author: first.author.clone(),
                date: first.date,
                time: first.time.clone(),
                timezone: first.timezone.clone(),
                datetime: first.datetime,
                hour_frac: hour_frac(&first.datetime),
                total_lines: lines.len(),
                lines,
            }
        })
        .collect();

    commits.sort_by_key(|c| c.datetime);
    commits
}

/// Deep link for a commit: base URL + `/commit/` + the raw identifier.
/// The identifier passes through verbatim.
fn commit_url(repo_url: &str, id: &str) -> String {
    let base = repo_url.trim_end_matches('/');
    format!("{base}/commit/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_records;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "commit,file,line,depth,length,type,author,date,time,timezone,datetime";

    fn records(rows: &[&str]) -> Vec<LineRecord> {
        let input = format!("{HEADER}\n{}\n", rows.join("\n"));
        parse_records(&input).unwrap()
    }

    fn sample() -> Vec<LineRecord> {
        records(&[
            "a,x.js,1,1,10,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
            "a,y.css,1,1,5,css,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
            "b,x.js,2,2,20,js,grace,2024-01-02,14:30,+00:00,2024-01-02T14:30",
        ])
    }

    #[test]
    fn totals_partition_the_records() {
        let commits = aggregate(sample(), "https://example.org/repo");
        assert_eq!(commits.len(), 2);
        let total: usize = commits.iter().map(|c| c.total_lines).sum();
        assert_eq!(total, 3);
        for c in &commits {
            assert_eq!(c.total_lines, c.lines().len());
        }
    }

    #[test]
    fn representative_fields_come_from_first_record() {
        let commits = aggregate(sample(), "");
        let a = commits.iter().find(|c| c.id == "a").unwrap();
        assert_eq!(a.author, "ada");
        assert_eq!(a.time, "10:00");
        assert_eq!(a.hour_frac, 10.0);
        let b = commits.iter().find(|c| c.id == "b").unwrap();
        assert_eq!(b.hour_frac, 14.5);
        assert_eq!(b.total_lines, 1);
    }

    #[test]
    fn sorted_ascending_for_any_input_order() {
        let mut rows = sample();
        rows.reverse();
        let commits = aggregate(rows, "");
        assert!(commits.windows(2).all(|w| w[0].datetime <= w[1].datetime));
        assert_eq!(commits[0].id, "a");
        assert_eq!(commits[1].id, "b");
    }

    #[test]
    fn interleaved_rows_land_in_one_group() {
        let commits = aggregate(
            records(&[
                "a,x.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
                "b,x.js,2,0,1,js,ada,2024-01-01,11:00,+00:00,2024-01-01T11:00",
                "a,y.js,3,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
            ]),
            "",
        );
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].total_lines, 2);
    }

    #[test]
    fn datetime_ties_keep_encounter_order() {
        let commits = aggregate(
            records(&[
                "z,x.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
                "a,y.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
            ]),
            "",
        );
        assert_eq!(commits[0].id, "z");
        assert_eq!(commits[1].id, "a");
    }

    #[test]
    fn url_concatenates_base_and_raw_id() {
        let commits = aggregate(sample(), "https://example.org/repo/");
        assert_eq!(
            commits.iter().find(|c| c.id == "a").unwrap().url,
            "https://example.org/repo/commit/a"
        );
    }

    #[test]
    fn empty_input_yields_no_commits() {
        assert!(aggregate(Vec::new(), "").is_empty());
    }

    #[test]
    fn serialization_excludes_constituent_records() {
        let commits = aggregate(sample(), "");
        let json = serde_json::to_value(&commits[0]).unwrap();
        assert!(json.get("lines").is_none());
        assert!(json.get("total_lines").is_some());
    }
}
