//! Status bar: position in the history, last message, key bindings

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYBINDS: &[(&str, &str)] = &[
    ("←/→", "step"),
    ("1-9", "skip"),
    ("⎵", "play"),
    ("↵/⌫", "end/start"),
    ("⇥", "focus"),
    ("q", "quit"),
];

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    pub failed: bool,
    pub is_playing: bool,
    pub is_truncated: bool,
}

fn tag(text: &str, color: Color) -> Span<'_> {
    Span::styled(
        text,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let dim = bar.fg(DEFAULT_THEME.comment);
    let text = bar.fg(DEFAULT_THEME.fg);

    let position = if data.total_steps == 0 {
        " Step -/0 ".to_string()
    } else {
        let suffix = if data.is_truncated { "+" } else { "" };
        format!(
            " Step {}/{}{} ",
            data.current_step + 1,
            data.total_steps,
            suffix
        )
    };
    let position_color = if data.failed {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    let left = Line::from(vec![
        tag(&position, position_color),
        Span::styled(" | ", dim),
        Span::styled(format!(" {} ", data.message), text),
    ]);
    frame.render_widget(
        Paragraph::new(left).style(bar).alignment(Alignment::Left),
        halves[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let mut right = Vec::new();
    for (i, (key, action)) in KEYBINDS.iter().enumerate() {
        if i > 0 {
            right.push(Span::styled("│ ", dim));
        }
        right.push(Span::styled(format!(" {} ", key), key_style));
        right.push(Span::styled(format!(" {} ", action), text));
    }

    let at_end = data.current_step + 1 >= data.total_steps;
    let state = if data.is_playing {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if at_end {
        Some((" END ", DEFAULT_THEME.error))
    } else if data.current_step == 0 {
        Some((" START ", DEFAULT_THEME.success))
    } else {
        None
    };
    if let Some((label, color)) = state {
        right.push(Span::styled("│", dim));
        right.push(tag(label, color));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}
