use std::io;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;

use crate::model::Dataset;

use super::events;
use super::palette::TypePalette;
use super::state::{ViewMode, ViewState};
use super::views::{
    draw_files_view, draw_help_overlay, draw_scatter_view, draw_slider, draw_story_view,
};

/// Run the interactive explorer. The dataset is fully loaded and aggregated
/// before this is called; everything past this point is synchronous event
/// handling, one input at a time.
pub fn run(data: Dataset) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut state = ViewState::default();
    // Stable type colors for every view, assigned once per load.
    let palette = TypePalette::build(data.commits.iter().flat_map(|c| c.lines()));
    events::set_progress(&mut state, &data, 100.0);

    terminal.clear()?;
    let result = event_loop(&mut terminal, &data, &palette, &mut state);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data: &Dataset,
    palette: &TypePalette,
    state: &mut ViewState,
) -> io::Result<()> {
    loop {
        if let Some((_, shown_at)) = state.status_message {
            if shown_at.elapsed() > Duration::from_secs(3) {
                state.status_message = None;
            }
        }

        terminal.draw(|f| {
            let size = f.size();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ])
                .split(size);

            let tabs = Tabs::new(vec!["Scatter", "Files", "Story"])
                .block(Block::default().borders(Borders::ALL).title("loclens"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            state.view_mode = match state.tab_index {
                0 => ViewMode::Scatter,
                1 => ViewMode::Files,
                2 => ViewMode::Story,
                _ => ViewMode::Scatter,
            };

            // Mouse mapping only applies while the chart is on screen.
            if state.view_mode != ViewMode::Scatter {
                state.chart_area = None;
            }

            match state.view_mode {
                ViewMode::Scatter => draw_scatter_view(f, chunks[1], data, state, palette),
                ViewMode::Files => draw_files_view(f, chunks[1], data, state, palette),
                ViewMode::Story => draw_story_view(f, chunks[1], data, state),
            }

            draw_slider(f, chunks[2], data, state);
            draw_status_line(f, chunks[3], state);

            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if events::handle_key(key, state, data) {
                        break;
                    }
                }
                Event::Mouse(mouse) => events::handle_mouse(mouse, state, data),
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw_status_line(f: &mut ratatui::Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let text = match &state.status_message {
        Some((message, _)) => message.clone(),
        None => "h: help  q: quit".to_string(),
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}
