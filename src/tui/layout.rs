use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Window of list indices to render so the focused row stays centered
/// within the viewport where possible.
pub fn visible_range(len: usize, focused: usize, viewport: usize) -> (usize, usize) {
    if len == 0 || viewport == 0 {
        return (0, 0);
    }
    let start = focused
        .saturating_sub(viewport / 2)
        .min(len.saturating_sub(viewport));
    let end = (start + viewport).min(len);
    (start, end)
}
