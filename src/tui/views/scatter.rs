use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{Dataset, LineRecord};
use crate::scale::SqrtScale;
use crate::stats::language_breakdown;
use crate::tui::palette::{hour_color, TypePalette};
use crate::tui::state::ViewState;
use crate::util::{format_share, truncate};

const POINT_COLOR: Color = Color::Rgb(59, 130, 246);
const SELECTED_COLOR: Color = Color::Rgb(250, 204, 21);

/// Render the commits-by-time-of-day scatterplot with its side panel:
/// hover details, brush selection count, and the language breakdown of the
/// brushed commits.
pub fn draw_scatter_view(
    f: &mut Frame,
    area: Rect,
    data: &Dataset,
    state: &mut ViewState,
    palette: &TypePalette,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    draw_chart(f, chunks[0], data, state);
    draw_side_panel(f, chunks[1], data, state, palette);
}

fn draw_chart(f: &mut Frame, area: Rect, data: &Dataset, state: &mut ViewState) {
    let chart_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title("Commits by time of day")
        .borders(Borders::ALL);
    // remember the plot area so mouse events can be mapped back
    state.chart_area = Some(block.inner(chart_chunks[0]));

    // Radius spans the full commit set so sizes stay comparable while
    // filtering; the x domain is the full time range for the same reason.
    let (min_lines, max_lines) = data
        .commits
        .iter()
        .fold((usize::MAX, 0), |(lo, hi), c| {
            (lo.min(c.total_lines), hi.max(c.total_lines))
        });
    let radius = SqrtScale::new((min_lines as f64, max_lines as f64), (0.4, 2.4));

    // Biggest underneath: paint in descending size order so small commits
    // stay visible on top of large ones.
    let mut order: Vec<usize> = state.filtered.clone();
    order.sort_by(|&a, &b| data.commits[b].total_lines.cmp(&data.commits[a].total_lines));

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 24.0])
        .paint(|ctx| {
            for hour in 0..=24 {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: hour as f64,
                    x2: 100.0,
                    y2: hour as f64,
                    color: hour_color(hour as f64),
                });
            }
            ctx.layer();

            let Some(scale) = data.scale.as_ref() else {
                return;
            };
            for &i in &order {
                let commit = &data.commits[i];
                let color = if state.hovered == Some(i) {
                    Color::White
                } else if state.selected.contains(&i) {
                    SELECTED_COLOR
                } else {
                    POINT_COLOR
                };
                ctx.draw(&Circle {
                    x: scale.forward(commit.datetime),
                    y: commit.hour_frac,
                    radius: radius.scale(commit.total_lines as f64),
                    color,
                });
            }

            if let Some(region) = state.brush {
                let (x0, x1) = (region.x0.min(region.x1), region.x0.max(region.x1));
                let (y0, y1) = (region.y0.min(region.y1), region.y0.max(region.y1));
                ctx.draw(&Rectangle {
                    x: x0,
                    y: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                    color: Color::White,
                });
            }
        });
    f.render_widget(canvas, chart_chunks[0]);

    draw_x_axis(f, chart_chunks[1], data);
}

/// One-row time axis: domain endpoints under the chart corners.
fn draw_x_axis(f: &mut Frame, area: Rect, data: &Dataset) {
    let Some(scale) = data.scale.as_ref() else {
        return;
    };
    let (min, max) = scale.domain();
    let left = min.format("%b %d %Y").to_string();
    let right = max.format("%b %d %Y").to_string();
    let width = area.width as usize;
    let pad = width.saturating_sub(left.len() + right.len());
    let axis = format!("{left}{}{right}", " ".repeat(pad));
    f.render_widget(
        Paragraph::new(axis).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_side_panel(
    f: &mut Frame,
    area: Rect,
    data: &Dataset,
    state: &ViewState,
    palette: &TypePalette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    draw_tooltip(f, chunks[0], data, state);
    draw_selection_count(f, chunks[1], state);
    draw_language_breakdown(f, chunks[2], data, state, palette);
}

/// Details of the hovered point, mirroring the tooltip of a pointer UI.
fn draw_tooltip(f: &mut Frame, area: Rect, data: &Dataset, state: &ViewState) {
    let lines = match state.hovered.and_then(|i| data.commits.get(i)) {
        Some(commit) => vec![
            Line::from(vec![
                Span::styled("Commit: ", Style::default().fg(Color::White)),
                Span::styled(truncate(&commit.id, 10), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(Span::styled(
                truncate(&commit.url, area.width.saturating_sub(2) as usize),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(vec![
                Span::styled("Date:   ", Style::default().fg(Color::White)),
                Span::styled(
                    commit.datetime.format("%A, %B %-d, %Y").to_string(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Time:   ", Style::default().fg(Color::White)),
                Span::styled(
                    commit.datetime.format("%H:%M").to_string(),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled("Author: ", Style::default().fg(Color::White)),
                Span::styled(commit.author.clone(), Style::default().fg(Color::Magenta)),
            ]),
            Line::from(vec![
                Span::styled("Lines:  ", Style::default().fg(Color::White)),
                Span::styled(
                    commit.total_lines.to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Move the mouse over a point",
                Style::default().fg(Color::Gray),
            )),
        ],
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Commit")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(panel, area);
}

fn draw_selection_count(f: &mut Frame, area: Rect, state: &ViewState) {
    let text = if state.selected.is_empty() {
        "No commits selected".to_string()
    } else {
        format!("{} commits selected", state.selected.len())
    };
    let panel = Paragraph::new(text).block(
        Block::default()
            .title("Brush")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(panel, area);
}

/// Per-language line counts and proportions over the brushed commits'
/// flattened records. Empty selection renders an empty panel.
fn draw_language_breakdown(
    f: &mut Frame,
    area: Rect,
    data: &Dataset,
    state: &ViewState,
    palette: &TypePalette,
) {
    let block = Block::default()
        .title("Language Breakdown")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if state.selected.is_empty() {
        f.render_widget(block, area);
        return;
    }

    let records: Vec<&LineRecord> = state
        .selected
        .iter()
        .filter_map(|&i| data.commits.get(i))
        .flat_map(|c| c.lines())
        .collect();
    let total = records.len();
    let breakdown = language_breakdown(records);

    let lines: Vec<Line> = breakdown
        .iter()
        .map(|(kind, count)| {
            Line::from(vec![
                Span::styled(
                    format!("{kind:<10}"),
                    Style::default().fg(palette.color_for(kind)),
                ),
                Span::raw(format!("{count} lines ({})", format_share(*count, total))),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
