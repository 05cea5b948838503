use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Gauge};
use ratatui::Frame;

use crate::model::Dataset;
use crate::tui::state::ViewState;

mod files;
mod help;
mod narrative;
mod scatter;

pub use files::draw_files_view;
pub use help::draw_help_overlay;
pub use narrative::draw_story_view;
pub use scatter::draw_scatter_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// The time slider shared by every tab: progress on the 0-100 scale with the
/// derived cutoff as its label.
pub fn draw_slider(f: &mut Frame, area: Rect, data: &Dataset, state: &ViewState) {
    let label = match (&state.cutoff, data.commits.is_empty()) {
        (Some(cutoff), false) => format!(
            "up to {}  ({}/{} commits)",
            cutoff.format("%Y-%m-%d %H:%M"),
            state.filtered.len(),
            data.commits.len()
        ),
        _ => "all history".to_string(),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Time (←/→ scrub, Home/End jump)")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(state.progress.round().clamp(0.0, 100.0) as u16)
        .label(label);
    f.render_widget(gauge, area);
}
