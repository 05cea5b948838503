use std::collections::HashMap;

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::model::{Dataset, LineRecord};
use crate::tui::palette::TypePalette;
use crate::tui::state::ViewState;
use crate::util::shorten_path;

use super::header_cell;

/// Width of the per-file swatch strip, in line units.
const STRIP_WIDTH: usize = 48;

/// Render the file composition of the cutoff-filtered commits: one row per
/// file, largest first, with a swatch strip of one colored unit per line.
/// Files with no included lines never appear; the brush does not affect
/// this view.
pub fn draw_files_view(
    f: &mut Frame,
    area: Rect,
    data: &Dataset,
    state: &ViewState,
    palette: &TypePalette,
) {
    let files = group_by_file(data, &state.filtered);

    if files.is_empty() {
        let placeholder = Paragraph::new("No files in the current time range")
            .block(Block::default().title("Files").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let rows: Vec<Row> = files
        .iter()
        .map(|(path, lines)| {
            Row::new(vec![
                Cell::from(shorten_path(path, 32)).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>5}", lines.len())),
                Cell::from(Line::from(swatch_spans(lines, palette))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(34),
            Constraint::Length(7),
            Constraint::Min(STRIP_WIDTH as u16 + 8),
        ],
    )
    .header(Row::new([
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Composition", Color::Magenta),
    ]))
    .block(
        Block::default()
            .title(format!("Files ({})", files.len()))
            .borders(Borders::ALL),
    );

    f.render_widget(table, area);
}

/// Flatten the filtered commits' records and group them by file path,
/// sorted descending by included line count. Grouping keeps encounter
/// order before the sort so ties are deterministic.
fn group_by_file<'a>(data: &'a Dataset, filtered: &[usize]) -> Vec<(&'a str, Vec<&'a LineRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut files: Vec<(&str, Vec<&LineRecord>)> = Vec::new();

    for &i in filtered {
        let Some(commit) = data.commits.get(i) else {
            continue;
        };
        for record in commit.lines() {
            match index.get(record.file.as_str()) {
                Some(&f) => files[f].1.push(record),
                None => {
                    index.insert(record.file.as_str(), files.len());
                    files.push((record.file.as_str(), vec![record]));
                }
            }
        }
    }

    files.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    files
}

/// One colored unit per line, capped to the strip width by sampling evenly
/// so the type mix stays representative. Consecutive same-colored units
/// collapse into one span.
fn swatch_spans<'a>(lines: &[&LineRecord], palette: &TypePalette) -> Vec<Span<'a>> {
    let step = (lines.len() + STRIP_WIDTH - 1) / STRIP_WIDTH;
    let step = step.max(1);
    let mut spans: Vec<Span> = Vec::new();
    let mut run: Option<(Color, usize)> = None;

    for record in lines.iter().step_by(step) {
        let color = palette.color_for(&record.kind);
        match run {
            Some((current, n)) if current == color => run = Some((current, n + 1)),
            Some((current, n)) => {
                spans.push(Span::styled("▪".repeat(n), Style::default().fg(current)));
                run = Some((color, 1));
            }
            None => run = Some((color, 1)),
        }
    }
    if let Some((color, n)) = run {
        spans.push(Span::styled("▪".repeat(n), Style::default().fg(color)));
    }
    if step > 1 {
        spans.push(Span::styled(
            format!(" (1:{step})"),
            Style::default().fg(Color::Gray),
        ));
    }
    spans
}
