/// Format `count / total` as a percentage with one fractional digit,
/// trimming a trailing `.0` so whole shares read as `50%` rather than `50.0%`.
pub fn format_share(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let pct = count as f64 / total as f64 * 100.0;
    let s = format!("{pct:.1}");
    let s = s.strip_suffix(".0").unwrap_or(&s);
    format!("{s}%")
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let keep: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{keep}...")
    } else {
        s.to_string()
    }
}

/// Shorten a path from the left, keeping the most specific tail segment.
pub fn shorten_path(path: &str, max: usize) -> String {
    let len = path.chars().count();
    if len > max {
        let tail: String = path.chars().skip(len - max.saturating_sub(3)).collect();
        format!("...{tail}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_keep_one_fractional_digit() {
        assert_eq!(format_share(2, 3), "66.7%");
        assert_eq!(format_share(1, 3), "33.3%");
        assert_eq!(format_share(1, 2), "50%");
        assert_eq!(format_share(3, 3), "100%");
        assert_eq!(format_share(0, 0), "0%");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long label", 10), "a very ...");
    }

    #[test]
    fn paths_shorten_from_the_left() {
        assert_eq!(shorten_path("src/a.rs", 10), "src/a.rs");
        assert_eq!(shorten_path("deeply/nested/dir/file.rs", 14), "...dir/file.rs");
    }
}
