//! Shared pane helpers: bordered blocks, scrolling, token colors

use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border is highlighted when the pane has focus
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Number of content rows inside a bordered pane
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize // Account for borders, min 1
}

/// Clamp `offset` so the window never scrolls past the last item
pub(crate) fn clamp_scroll(total_items: usize, visible_height: usize, offset: &mut usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}

/// Adjust `offset` so that row `target` is inside the window
pub(crate) fn scroll_into_view(target: usize, visible_height: usize, offset: &mut usize) {
    if target < *offset {
        *offset = target;
    } else if target >= *offset + visible_height {
        *offset = target + 1 - visible_height;
    }
}

pub(crate) fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Identifier => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::LParen | TokenKind::RParen => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::End => Style::default().fg(DEFAULT_THEME.comment),
        _ => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
    }
}
