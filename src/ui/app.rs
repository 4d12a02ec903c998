//! Main TUI application state and logic

use super::panes::{
    render_control_pane, render_result_pane, render_source_pane, render_status_bar,
    render_tokens_pane, render_value_pane, ResultRenderData, SourceHighlight, StatusRenderData,
};
use crate::constants::{PLAY_INTERVAL_MS, SPACE_DEBOUNCE_MS};
use crate::parser::Error;
use crate::session::ParseSession;
use crate::snapshot::Step;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Control,
    Values,
    Result,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right, top to bottom)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Control,
            FocusedPane::Control => FocusedPane::Values,
            FocusedPane::Values => FocusedPane::Result,
            FocusedPane::Result => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Result,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Control => FocusedPane::Tokens,
            FocusedPane::Values => FocusedPane::Control,
            FocusedPane::Result => FocusedPane::Values,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded parse being viewed
    pub session: ParseSession,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub control_scroll: usize,
    pub values_scroll: usize,
    pub result_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: ParseSession) -> Self {
        let status_message = match session.outcome() {
            Err(Error::Lex(_)) => "Lexical error: nothing to step through".to_string(),
            _ => String::from("Ready!"),
        };
        let now = Instant::now();
        App {
            session,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            control_scroll: 0,
            values_scroll: 0,
            result_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing
                && self.last_play_time.elapsed() >= Duration::from_millis(PLAY_INTERVAL_MS)
            {
                if self.session.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Where the source pane should draw attention for the current step
    fn source_highlight(&self) -> SourceHighlight {
        if let Err(Error::Lex(e)) = self.session.outcome() {
            let location = e.location();
            return SourceHighlight {
                lookahead: None,
                error_at: Some(location.index),
                focus_line: Some(location.line),
            };
        }
        match self.session.current_token() {
            Some(token) => SourceHighlight {
                lookahead: Some(token.location.index..token.location.index + token.width),
                error_at: None,
                focus_line: Some(token.location.line),
            },
            None => SourceHighlight::default(),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Three columns of panes, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(pane_area);

        // Left column: Source (top) | Result (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        // Right column: Control (top) | Values (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[2]);

        let highlight = self.source_highlight();
        let snapshot = self.session.current();

        render_source_pane(
            frame,
            left_rows[0],
            self.session.source(),
            &highlight,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_result_pane(
            frame,
            left_rows[1],
            ResultRenderData {
                step: snapshot.map(|s| &s.step),
                outcome: self.session.outcome(),
                show_outcome: self.session.is_at_end(),
                is_truncated: self.session.is_truncated(),
            },
            self.focused_pane == FocusedPane::Result,
            &mut self.result_scroll,
        );

        render_tokens_pane(
            frame,
            columns[1],
            self.session.tokens(),
            snapshot.map(|s| s.position),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        render_control_pane(
            frame,
            right_rows[0],
            snapshot,
            self.focused_pane == FocusedPane::Control,
            &mut self.control_scroll,
        );

        render_value_pane(
            frame,
            right_rows[1],
            snapshot,
            self.focused_pane == FocusedPane::Values,
            &mut self.values_scroll,
        );

        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                current_step: self.session.history_position(),
                total_steps: self.session.total_snapshots(),
                failed: matches!(snapshot.map(|s| &s.step), Some(Step::Failed { .. })),
                is_playing: self.is_playing,
                is_truncated: self.session.is_truncated(),
            },
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Control => &mut self.control_scroll,
            FocusedPane::Values => &mut self.values_scroll,
            FocusedPane::Result => &mut self.result_scroll,
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.session.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode, debounced against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(SPACE_DEBOUNCE_MS) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        let now = Instant::now();
                        self.last_play_time = now
                            .checked_sub(Duration::from_millis(PLAY_INTERVAL_MS))
                            .unwrap_or(now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.session.jump_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.status_message = match self.session.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            _ => {}
        }
    }

    /// Step forward through the history
    fn step_forward(&mut self) {
        self.status_message = match self.session.step_forward() {
            Ok(()) => "Stepped forward".to_string(),
            Err(e) => format!("Cannot step forward: {}", e),
        };
    }

    /// Step backward through the history
    fn step_backward(&mut self) {
        self.status_message = match self.session.step_backward() {
            Ok(()) => "Stepped backward".to_string(),
            Err(e) => format!("Cannot step backward: {}", e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SNAPSHOT_MEMORY_LIMIT;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app(source: &str) -> App {
        App::new(ParseSession::trace(source, SNAPSHOT_MEMORY_LIMIT))
    }

    #[test]
    fn test_focus_cycles_through_every_pane() {
        let mut pane = FocusedPane::Source;
        for _ in 0..5 {
            assert_eq!(pane.next().prev(), pane);
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
    }

    #[test]
    fn test_keys_drive_session() {
        let mut app = app("(+ 1 2)");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.history_position(), 3);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.history_position(), 2);
        press(&mut app, KeyCode::Enter);
        assert!(app.session.is_at_end());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.history_position(), 0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_lex_error_highlights_offending_char() {
        let app = app("(+ 1 #)");
        let highlight = app.source_highlight();
        assert_eq!(highlight.error_at, Some(5));
        assert_eq!(highlight.lookahead, None);
    }

    #[test]
    fn test_lookahead_highlight_spans_token() {
        let mut app = app("(f 12)");
        press(&mut app, KeyCode::Char('5'));
        let token = app.session.current_token().cloned();
        let highlight = app.source_highlight();
        let token = token.unwrap();
        assert_eq!(
            highlight.lookahead,
            Some(token.location.index..token.location.index + token.width)
        );
    }
}
