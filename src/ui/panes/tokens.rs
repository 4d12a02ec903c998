//! Token stream pane
//!
//! One row per token. Tokens before the cursor are already consumed and drawn
//! dimmed; the lookahead row carries a `▶` marker.

use super::utils::{clamp_scroll, pane_block, scroll_into_view, token_style, visible_height};
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the token pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    if let Some(cursor) = cursor {
        scroll_into_view(cursor, height, scroll_offset);
    }
    clamp_scroll(tokens.len(), height, scroll_offset);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(height)
        .map(|(idx, token)| {
            let is_current = cursor == Some(idx);
            let consumed = cursor.is_some_and(|c| idx < c);

            let marker = if is_current {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let style = if consumed {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                token_style(token.kind)
            };

            let mut line = Line::from(vec![
                marker,
                Span::styled(
                    format!("{:3} ", idx),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(token.to_string(), style),
            ]);
            if is_current {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
