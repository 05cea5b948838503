use std::collections::HashSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::Dataset;
use crate::stats::summarize;
use crate::tui::layout::visible_range;
use crate::tui::state::ViewState;
use crate::util::truncate;

/// Render the scroll-synchronized story: one entry per commit in sorted
/// order on the left, summary statistics for the commits up to the focused
/// entry on the right. Scrolling the story drives the same cutoff as the
/// slider.
pub fn draw_story_view(f: &mut Frame, area: Rect, data: &Dataset, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);

    draw_story_list(f, chunks[0], data, state);
    draw_stats_panel(f, chunks[1], data, state);
}

fn draw_story_list(f: &mut Frame, area: Rect, data: &Dataset, state: &ViewState) {
    let block = Block::default()
        .title(format!("Story ({} commits, j/k to scroll)", data.commits.len()))
        .borders(Borders::ALL);

    if data.commits.is_empty() {
        f.render_widget(
            Paragraph::new("Nothing to tell: the export had no commits").block(block),
            area,
        );
        return;
    }

    let viewport = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(data.commits.len(), state.focused, viewport);

    let lines: Vec<Line> = (start..end)
        .map(|i| {
            let commit = &data.commits[i];
            let files: HashSet<&str> = commit.lines().iter().map(|r| r.file.as_str()).collect();
            let verb = if i == 0 {
                "made their first commit"
            } else {
                "made another commit"
            };
            let text = format!(
                "On {}, {} {}: {} {} across {} {}",
                commit.datetime.format("%b %-d %H:%M"),
                commit.author,
                verb,
                commit.total_lines,
                plural(commit.total_lines, "line"),
                files.len(),
                plural(files.len(), "file"),
            );

            if i == state.focused {
                Line::from(vec![
                    Span::styled(
                        format!("◄ {} ", truncate(&commit.id, 7)),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        text,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("  {} ", truncate(&commit.id, 7)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(text, Style::default().fg(Color::Gray)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Summary statistics over the cutoff-filtered subset, recomputed on every
/// scroll step through the same engine the CLI uses.
fn draw_stats_panel(f: &mut Frame, area: Rect, data: &Dataset, state: &ViewState) {
    let stats = summarize(state.filtered.iter().filter_map(|&i| data.commits.get(i)));

    let value = |v: Option<u32>| v.map_or_else(|| "N/A".to_string(), |n| n.to_string());
    let rows = [
        ("Commits", stats.commit_count.to_string()),
        ("Files", stats.file_count.to_string()),
        ("Total LOC", stats.total_lines.to_string()),
        ("Max depth", value(stats.max_depth)),
        ("Longest line", value(stats.longest_line)),
        ("Max lines", value(stats.max_file_lines)),
        ("Avg depth", format!("{:.2}", stats.avg_depth)),
        (
            "Top day",
            stats.top_day.clone().unwrap_or_else(|| "N/A".to_string()),
        ),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            "So far",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(rows.into_iter().map(|(label, v)| {
        Line::from(vec![
            Span::styled(format!("{label:<14}"), Style::default().fg(Color::White)),
            Span::styled(v, Style::default().fg(Color::Cyan)),
        ])
    }));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Summary")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(panel, area);
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
