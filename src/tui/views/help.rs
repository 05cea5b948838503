use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

/// Draw the modal help overlay describing navigation, views, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let section = |label: &'static str| {
        Line::from(vec![Span::styled(
            label,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "loclens - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Time slider:"),
        Line::from("  ←/→         Step the cutoff by 1% of history"),
        Line::from("  PgUp/PgDn   Step by 10%"),
        Line::from("  Home/End    Jump to the start/end of history"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Scatter/Files/Story)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from(""),
        section("Scatterplot:"),
        Line::from("  Mouse move  Hover a commit for details"),
        Line::from("  Left drag   Brush a rectangular selection"),
        Line::from("  Esc         Clear the brush"),
        Line::from(""),
        section("Story:"),
        Line::from("  j/k or ↑/↓  Scroll the narrative (moves the cutoff)"),
        Line::from("  g/G         Jump to first/last commit"),
        Line::from("  Wheel       Scroll with the mouse"),
        Line::from(""),
        section("Actions:"),
        Line::from("  y           Copy the commit link to the clipboard"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
