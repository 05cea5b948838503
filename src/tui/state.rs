use chrono::{DateTime, FixedOffset};
use ratatui::layout::Rect;

use crate::filter::BrushRegion;

/// All ephemeral UI state. The commit data itself lives in [`crate::model::Dataset`]
/// and is never mutated after load; every field here is recomputed per
/// interaction through the shared filter pipeline.
pub struct ViewState {
    pub tab_index: usize,
    pub view_mode: ViewMode,
    pub show_help: bool,

    /// Slider position on the 0-100 progress scale. The narrative scroll
    /// writes here too, through the same time scale; whichever fired last wins.
    pub progress: f64,
    /// Maximum-time filter derived from `progress` or the focused story entry.
    pub cutoff: Option<DateTime<FixedOffset>>,
    /// Commit indices included by the cutoff, in sorted order.
    pub filtered: Vec<usize>,

    /// Active brush rectangle in chart coordinates, if any.
    pub brush: Option<BrushRegion>,
    /// Drag origin while the brush is being drawn.
    pub brush_anchor: Option<(f64, f64)>,
    /// Commit indices inside the brush. Independent of `filtered`.
    pub selected: Vec<usize>,

    pub hovered: Option<usize>,
    /// Narrative entry currently in view.
    pub focused: usize,

    /// Inner plot area from the last draw, for mapping mouse positions back
    /// into chart coordinates.
    pub chart_area: Option<Rect>,
    pub status_message: Option<(String, std::time::Instant)>,
}

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Scatter,
    Files,
    Story,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab_index: 0,
            view_mode: ViewMode::Scatter,
            show_help: false,
            progress: 100.0,
            cutoff: None,
            filtered: Vec::new(),
            brush: None,
            brush_anchor: None,
            selected: Vec::new(),
            hovered: None,
            focused: 0,
            chart_area: None,
            status_message: None,
        }
    }
}
