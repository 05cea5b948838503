use chrono::{DateTime, FixedOffset};

use crate::model::CommitSummary;

/// Invertible linear map between the full commit time domain and a 0-100
/// progress scale. Both the manual slider and the narrative scroll write
/// through this same mapping, so they converge on identical cutoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min: DateTime<FixedOffset>,
    max: DateTime<FixedOffset>,
}

impl TimeScale {
    /// Build from commits already sorted ascending by datetime.
    /// Returns `None` when there are no commits to span.
    pub fn from_commits(commits: &[CommitSummary]) -> Option<Self> {
        let min = commits.first()?.datetime;
        let max = commits.last()?.datetime;
        Some(Self { min, max })
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.min, self.max)
    }

    /// Map an instant to progress in [0, 100].
    pub fn forward(&self, t: DateTime<FixedOffset>) -> f64 {
        let span = (self.max - self.min).num_milliseconds();
        if span == 0 {
            // Degenerate single-instant domain pins to the max end.
            return 100.0;
        }
        let offset = (t - self.min).num_milliseconds();
        (offset as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Map progress in [0, 100] back to an instant.
    pub fn invert(&self, progress: f64) -> DateTime<FixedOffset> {
        let span = (self.max - self.min).num_milliseconds();
        let p = progress.clamp(0.0, 100.0);
        let offset = (p / 100.0 * span as f64).round() as i64;
        self.min + chrono::Duration::milliseconds(offset)
    }
}

/// Plain linear scale between a numeric domain and range. The range may be
/// inverted, which the scatterplot uses to put midnight at the bottom.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f64,
    pub r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn scale(&self, v: f64) -> f64 {
        if self.d1 == self.d0 {
            return self.r1;
        }
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
}

/// Square-root scale for point radii: visual area, not radius, stays linear
/// in the encoded value.
#[derive(Debug, Clone, Copy)]
pub struct SqrtScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0.max(0.0).sqrt(),
            d1: domain.1.max(0.0).sqrt(),
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn scale(&self, v: f64) -> f64 {
        if self.d1 == self.d0 {
            return self.r1;
        }
        let t = (v.max(0.0).sqrt() - self.d0) / (self.d1 - self.d0);
        self.r0 + t.clamp(0.0, 1.0) * (self.r1 - self.r0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::loader::parse_records;

    fn commits(rows: &[&str]) -> Vec<CommitSummary> {
        let header = "commit,file,line,depth,length,type,author,date,time,timezone,datetime";
        let input = format!("{header}\n{}\n", rows.join("\n"));
        aggregate(parse_records(&input).unwrap(), "")
    }

    fn sample_scale() -> TimeScale {
        let commits = commits(&[
            "a,x.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00",
            "b,x.js,2,0,1,js,ada,2024-01-05,22:00,+00:00,2024-01-05T22:00",
        ]);
        TimeScale::from_commits(&commits).unwrap()
    }

    #[test]
    fn endpoints_map_exactly() {
        let s = sample_scale();
        let (min, max) = s.domain();
        assert_eq!(s.forward(min), 0.0);
        assert_eq!(s.forward(max), 100.0);
        assert_eq!(s.invert(0.0), min);
        assert_eq!(s.invert(100.0), max);
    }

    #[test]
    fn forward_then_invert_round_trips() {
        let s = sample_scale();
        let (min, max) = s.domain();
        let mut t = min;
        while t <= max {
            let back = s.invert(s.forward(t));
            assert!((back - t).num_milliseconds().abs() <= 1, "{t} -> {back}");
            t += chrono::Duration::hours(7);
        }
    }

    #[test]
    fn out_of_range_progress_clamps() {
        let s = sample_scale();
        let (min, max) = s.domain();
        assert_eq!(s.invert(-5.0), min);
        assert_eq!(s.invert(250.0), max);
    }

    #[test]
    fn single_commit_domain_pins_to_max() {
        let commits = commits(&["a,x.js,1,0,1,js,ada,2024-01-01,10:00,+00:00,2024-01-01T10:00"]);
        let s = TimeScale::from_commits(&commits).unwrap();
        assert_eq!(s.forward(commits[0].datetime), 100.0);
        assert_eq!(s.invert(50.0), commits[0].datetime);
    }

    #[test]
    fn no_commits_no_scale() {
        assert!(TimeScale::from_commits(&[]).is_none());
    }

    #[test]
    fn linear_scale_supports_inverted_range() {
        let y = LinearScale::new((0.0, 24.0), (24.0, 0.0));
        assert_eq!(y.scale(0.0), 24.0);
        assert_eq!(y.scale(24.0), 0.0);
        assert_eq!(y.scale(6.0), 18.0);
    }

    #[test]
    fn sqrt_scale_is_area_proportional() {
        let r = SqrtScale::new((1.0, 100.0), (1.0, 10.0));
        assert!((r.scale(1.0) - 1.0).abs() < 1e-9);
        assert!((r.scale(100.0) - 10.0).abs() < 1e-9);
        // quadrupling the value doubles the radius step along the sqrt axis
        let quarter = r.scale(25.0);
        assert!((quarter - 5.0).abs() < 1e-9);
    }
}
