use chrono::{DateTime, FixedOffset};

use crate::model::CommitSummary;
use crate::scale::TimeScale;

/// What the current interaction is asking for. Every input device (slider,
/// narrative scroll, brush, CLI `--until`) translates its event into one of
/// these; [`apply_filter`] is the single recomputation path they all share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterCriterion {
    /// No filter: every commit is included.
    All,
    /// Maximum-time filter: commits with `datetime <= cutoff` are included.
    Cutoff(DateTime<FixedOffset>),
    /// Rectangular region in projected chart space.
    Brush(BrushRegion),
}

/// Brush rectangle in chart coordinates: x in progress units (0-100 across
/// the full commit time domain), y in hour-of-day units (0-24). Corners may
/// arrive in any order; the inclusion test is boundary-inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRegion {
    pub fn new(anchor: (f64, f64), corner: (f64, f64)) -> Self {
        Self {
            x0: anchor.0,
            y0: anchor.1,
            x1: corner.0,
            y1: corner.1,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, x1) = (self.x0.min(self.x1), self.x0.max(self.x1));
        let (y0, y1) = (self.y0.min(self.y1), self.y0.max(self.y1));
        x0 <= x && x <= x1 && y0 <= y && y <= y1
    }
}

/// Indices of the commits a criterion includes, in commit-sorted order.
///
/// Deterministic and pure: the same commits, scale, and criterion always
/// produce the same result. A brush with no time scale (nothing loaded yet)
/// selects nothing rather than failing.
pub fn apply_filter(
    commits: &[CommitSummary],
    scale: Option<&TimeScale>,
    criterion: &FilterCriterion,
) -> Vec<usize> {
    match criterion {
        FilterCriterion::All => (0..commits.len()).collect(),
        FilterCriterion::Cutoff(cutoff) => commits
            .iter()
            .enumerate()
            .filter(|(_, c)| c.datetime <= *cutoff)
            .map(|(i, _)| i)
            .collect(),
        FilterCriterion::Brush(region) => {
            let Some(scale) = scale else {
                return Vec::new();
            };
            commits
                .iter()
                .enumerate()
                .filter(|(_, c)| region.contains(scale.forward(c.datetime), c.hour_frac))
                .map(|(i, _)| i)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::loader::parse_records;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "commit,file,line,depth,length,type,author,date,time,timezone,datetime";

    fn commits() -> Vec<CommitSummary> {
        let input = format!(
            "{HEADER}\n\
             a,x.js,1,1,10,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00\n\
             a,y.css,1,1,5,css,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00\n\
             b,x.js,2,2,20,js,grace,2024-01-02,14:30,+00:00,2024-01-02T14:30\n"
        );
        aggregate(parse_records(&input).unwrap(), "")
    }

    fn cutoff(s: &str) -> FilterCriterion {
        FilterCriterion::Cutoff(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn cutoff_at_max_includes_all() {
        let commits = commits();
        let scale = TimeScale::from_commits(&commits);
        let max = commits.last().unwrap().datetime;
        let included = apply_filter(&commits, scale.as_ref(), &FilterCriterion::Cutoff(max));
        assert_eq!(included, vec![0, 1]);
    }

    #[test]
    fn cutoff_below_min_includes_none() {
        let commits = commits();
        let included = apply_filter(&commits, None, &cutoff("2023-12-31T00:00:00+00:00"));
        assert!(included.is_empty());
    }

    #[test]
    fn midnight_cutoff_keeps_first_commit_only() {
        let commits = commits();
        let included = apply_filter(&commits, None, &cutoff("2024-01-01T23:59:00+00:00"));
        assert_eq!(included, vec![0]);
        let subset = crate::stats::summarize(included.iter().map(|&i| &commits[i]));
        assert_eq!(subset.commit_count, 1);
        assert_eq!(subset.file_count, 2);
        assert_eq!(subset.total_lines, 2);
    }

    #[test]
    fn brush_is_boundary_inclusive() {
        let commits = commits();
        let scale = TimeScale::from_commits(&commits).unwrap();
        // commit "a" projects to exactly (0, 10.0)
        let region = BrushRegion::new((0.0, 10.0), (0.0, 10.0));
        let included = apply_filter(&commits, Some(&scale), &FilterCriterion::Brush(region));
        assert_eq!(included, vec![0]);
    }

    #[test]
    fn enlarging_the_brush_never_drops_commits() {
        let commits = commits();
        let scale = TimeScale::from_commits(&commits).unwrap();
        let mut previous: Vec<usize> = Vec::new();
        for grow in 0..=10 {
            let region = BrushRegion::new((0.0, 9.0), (grow as f64 * 10.0, 9.0 + grow as f64));
            let included =
                apply_filter(&commits, Some(&scale), &FilterCriterion::Brush(region));
            assert!(
                previous.iter().all(|i| included.contains(i)),
                "grew from {previous:?} to {included:?}"
            );
            previous = included;
        }
        assert_eq!(previous, vec![0, 1]);
    }

    #[test]
    fn unordered_brush_corners_normalize() {
        let region = BrushRegion::new((80.0, 20.0), (10.0, 5.0));
        assert!(region.contains(50.0, 10.0));
        assert!(!region.contains(5.0, 10.0));
    }

    #[test]
    fn brush_without_data_selects_nothing() {
        let region = BrushRegion::new((0.0, 0.0), (100.0, 24.0));
        let included = apply_filter(&[], None, &FilterCriterion::Brush(region));
        assert!(included.is_empty());

        // data but no scale yet: still nothing, never a panic
        let commits = commits();
        let included = apply_filter(&commits, None, &FilterCriterion::Brush(region));
        assert!(included.is_empty());
    }
}
