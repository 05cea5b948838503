use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::filter::{apply_filter, BrushRegion, FilterCriterion};
use crate::model::Dataset;

use super::state::{ViewMode, ViewState};

/// Handle a keyboard event, mutating view state. Returns `true` when the
/// loop should exit.
pub fn handle_key(key: KeyEvent, state: &mut ViewState, data: &Dataset) -> bool {
    if state.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Esc => clear_brush(state),
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % 3,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 { 2 } else { state.tab_index - 1 }
        }

        // Manual slider: integer steps on the 0-100 progress scale.
        KeyCode::Left => set_progress(state, data, state.progress - 1.0),
        KeyCode::Right => set_progress(state, data, state.progress + 1.0),
        KeyCode::PageUp => set_progress(state, data, state.progress - 10.0),
        KeyCode::PageDown => set_progress(state, data, state.progress + 10.0),
        KeyCode::Home => set_progress(state, data, 0.0),
        KeyCode::End => set_progress(state, data, 100.0),

        // Narrative scroll: the focused story entry drives the same cutoff.
        KeyCode::Char('j') | KeyCode::Down if state.view_mode == ViewMode::Story => {
            focus_commit(state, data, state.focused.saturating_add(1));
        }
        KeyCode::Char('k') | KeyCode::Up if state.view_mode == ViewMode::Story => {
            focus_commit(state, data, state.focused.saturating_sub(1));
        }
        KeyCode::Char('g') if state.view_mode == ViewMode::Story => focus_commit(state, data, 0),
        KeyCode::Char('G') if state.view_mode == ViewMode::Story => {
            focus_commit(state, data, data.commits.len().saturating_sub(1));
        }

        KeyCode::Char('y') => yank_focused_url(state, data),
        _ => {}
    }
    false
}

/// Handle a mouse event: hover tracking and the brush drag on the scatter
/// chart, wheel scrolling in the story view.
pub fn handle_mouse(event: MouseEvent, state: &mut ViewState, data: &Dataset) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(point) = chart_point(state, event.column, event.row) {
                state.brush_anchor = Some(point);
                state.brush = Some(BrushRegion::new(point, point));
                update_brush_selection(state, data);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let (Some(anchor), Some(point)) =
                (state.brush_anchor, chart_point(state, event.column, event.row))
            {
                state.brush = Some(BrushRegion::new(anchor, point));
                update_brush_selection(state, data);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.brush_anchor = None;
            update_brush_selection(state, data);
        }
        MouseEventKind::Moved => {
            state.hovered = chart_point(state, event.column, event.row)
                .and_then(|point| nearest_commit(state, data, point));
        }
        MouseEventKind::ScrollDown if state.view_mode == ViewMode::Story => {
            focus_commit(state, data, state.focused.saturating_add(1));
        }
        MouseEventKind::ScrollUp if state.view_mode == ViewMode::Story => {
            focus_commit(state, data, state.focused.saturating_sub(1));
        }
        _ => {}
    }
}

/// Move the slider, derive the cutoff through the time scale, and re-run the
/// filter pipeline.
pub fn set_progress(state: &mut ViewState, data: &Dataset, progress: f64) {
    state.progress = progress.clamp(0.0, 100.0);
    state.cutoff = data.scale.as_ref().map(|s| s.invert(state.progress));
    refilter(state, data);
}

/// Bring a narrative entry into view: cutoff becomes that commit's datetime
/// and the slider follows through the forward mapping, so both input
/// modalities converge on identical state.
pub fn focus_commit(state: &mut ViewState, data: &Dataset, index: usize) {
    if data.commits.is_empty() {
        return;
    }
    state.focused = index.min(data.commits.len() - 1);
    let datetime = data.commits[state.focused].datetime;
    if let Some(scale) = data.scale.as_ref() {
        state.progress = scale.forward(datetime);
    }
    state.cutoff = Some(datetime);
    refilter(state, data);
}

/// Recompute the cutoff-filtered commit set. Shared by every input path.
pub fn refilter(state: &mut ViewState, data: &Dataset) {
    let criterion = match state.cutoff {
        Some(cutoff) => FilterCriterion::Cutoff(cutoff),
        None => FilterCriterion::All,
    };
    state.filtered = apply_filter(&data.commits, data.scale.as_ref(), &criterion);
    if let Some(hovered) = state.hovered {
        if !state.filtered.contains(&hovered) {
            state.hovered = None;
        }
    }
}

fn update_brush_selection(state: &mut ViewState, data: &Dataset) {
    state.selected = match state.brush {
        Some(region) => apply_filter(
            &data.commits,
            data.scale.as_ref(),
            &FilterCriterion::Brush(region),
        ),
        None => Vec::new(),
    };
}

fn clear_brush(state: &mut ViewState) {
    state.brush = None;
    state.brush_anchor = None;
    state.selected.clear();
}

/// Map a terminal cell to chart coordinates (progress 0-100, hour 0-24),
/// using the plot area recorded by the last draw. Row 0 of the plot is the
/// top, which corresponds to hour 24.
fn chart_point(state: &ViewState, column: u16, row: u16) -> Option<(f64, f64)> {
    let area = state.chart_area?;
    if column < area.x
        || column >= area.x + area.width
        || row < area.y
        || row >= area.y + area.height
        || area.width < 2
        || area.height < 2
    {
        return None;
    }
    let fx = (column - area.x) as f64 / (area.width - 1) as f64 * 100.0;
    let fy = 24.0 - (row - area.y) as f64 / (area.height - 1) as f64 * 24.0;
    Some((fx, fy))
}

/// The visible commit closest to a chart point, within a small pick radius.
fn nearest_commit(state: &ViewState, data: &Dataset, point: (f64, f64)) -> Option<usize> {
    let scale = data.scale.as_ref()?;
    let mut best: Option<(usize, f64)> = None;
    for &i in &state.filtered {
        let commit = &data.commits[i];
        // normalize both axes so the pick radius is round on screen
        let dx = (scale.forward(commit.datetime) - point.0) / 100.0;
        let dy = (commit.hour_frac - point.1) / 24.0;
        let dist = dx * dx + dy * dy;
        if dist < 0.0025 && best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

fn yank_focused_url(state: &mut ViewState, data: &Dataset) {
    let Some(commit) = current_commit(state, data) else {
        return;
    };
    let url = commit.url.clone();
    let id = commit.id.clone();
    match copy_to_clipboard(&url) {
        Ok(()) => {
            state.status_message = Some((
                format!("Copied link for {}", crate::util::truncate(&id, 8)),
                std::time::Instant::now(),
            ));
        }
        Err(err) => {
            state.status_message =
                Some((format!("Clipboard error: {err}"), std::time::Instant::now()));
        }
    }
}

/// The commit the user is pointing at: hover beats story focus.
pub fn current_commit<'a>(
    state: &ViewState,
    data: &'a Dataset,
) -> Option<&'a crate::model::CommitSummary> {
    state
        .hovered
        .or_else(|| (!data.commits.is_empty()).then_some(state.focused))
        .and_then(|i| data.commits.get(i))
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text.to_string())
}
