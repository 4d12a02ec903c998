//! Source pane rendering with glyph highlighting
//!
//! Displays the program text with line numbers. The lookahead token of the
//! current step is drawn on a highlighted background; after a lexical error the
//! offending character is drawn in the error color instead.

use super::utils::{pane_block, scroll_into_view, visible_height};
use crate::parser::chars::{classify, CharClass};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

/// What to emphasise in the source text
#[derive(Debug, Clone, Default)]
pub struct SourceHighlight {
    /// Code point range of the current lookahead token
    pub lookahead: Option<Range<usize>>,
    /// Code point index of a lexical error
    pub error_at: Option<usize>,
    /// Line to keep in view (1-based)
    pub focus_line: Option<usize>,
}

fn char_style(ch: char) -> Style {
    match classify(ch) {
        Some(CharClass::Digit) => Style::default().fg(DEFAULT_THEME.number),
        Some(CharClass::LeftParen | CharClass::RightParen) => {
            Style::default().fg(DEFAULT_THEME.primary)
        }
        Some(
            CharClass::Plus
            | CharClass::Minus
            | CharClass::Multiply
            | CharClass::Equals
            | CharClass::Question
            | CharClass::Lambda
            | CharClass::Definition,
        ) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        Some(_) => Style::default().fg(DEFAULT_THEME.fg),
        None => Style::default().fg(DEFAULT_THEME.error),
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    highlight: &SourceHighlight,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source ", is_focused);
    let height = visible_height(area);

    // split on '\n' only so code point offsets stay exact
    let lines: Vec<&str> = source_code.split('\n').collect();
    if let Some(line) = highlight.focus_line {
        scroll_into_view(line.saturating_sub(1), height, scroll_offset);
    }
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(1));

    let mut line_start = 0;
    let mut rendered = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line_len = line.chars().count();
        if idx >= *scroll_offset && rendered.len() < height {
            let is_current = highlight.focus_line == Some(idx + 1);
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            for (offset, ch) in line.chars().enumerate() {
                let index = line_start + offset;
                let mut style = char_style(ch);
                if highlight.error_at == Some(index) {
                    style = Style::default()
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                } else if highlight
                    .lookahead
                    .as_ref()
                    .is_some_and(|range| range.contains(&index))
                {
                    style = style.bg(DEFAULT_THEME.current_line_bg).add_modifier(
                        Modifier::UNDERLINED | Modifier::BOLD,
                    );
                }
                spans.push(Span::styled(ch.to_string(), style));
            }

            // END sits just past the last character
            let end_of_line = line_start + line_len;
            if highlight.error_at == Some(end_of_line)
                || highlight
                    .lookahead
                    .as_ref()
                    .is_some_and(|range| range.is_empty() && range.start == end_of_line)
            {
                spans.push(Span::styled(
                    "⏎",
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }

            rendered.push(Line::from(spans));
        }
        line_start += line_len + 1;
    }

    let paragraph = Paragraph::new(rendered).block(block);
    frame.render_widget(paragraph, area);
}
