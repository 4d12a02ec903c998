//! Control stack and value stack panes
//!
//! Both stacks are drawn top-first so the entry the machine touches next is
//! always on the first row.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::snapshot::{ControlEntry, ControlKind, Snapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn control_style(entry: &ControlEntry) -> Style {
    match entry.kind {
        ControlKind::Terminal => Style::default().fg(DEFAULT_THEME.keyword),
        ControlKind::NonTerminal => Style::default()
            .fg(DEFAULT_THEME.nonterminal)
            .add_modifier(Modifier::BOLD),
        ControlKind::Reduce => Style::default().fg(DEFAULT_THEME.marker),
    }
}

/// Render `rows` (already top-first) into a scrolled list, or a placeholder.
fn render_rows(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: Vec<Line<'static>>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(title, is_focused);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let height = visible_height(area);
    clamp_scroll(rows.len(), height, scroll_offset);

    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(height)
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn depth_span(depth: usize) -> Span<'static> {
    Span::styled(
        format!("{:3} ", depth),
        Style::default().fg(DEFAULT_THEME.comment),
    )
}

/// Render the control stack pane
pub fn render_control_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let rows: Vec<Line<'static>> = snapshot
        .map(|s| {
            s.control
                .iter()
                .enumerate()
                .rev()
                .map(|(depth, entry)| {
                    Line::from(vec![
                        depth_span(depth),
                        Span::styled(entry.text.clone(), control_style(entry)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    render_rows(frame, area, " Control Stack ", rows, is_focused, scroll_offset);
}

/// Render the value stack pane
pub fn render_value_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let rows: Vec<Line<'static>> = snapshot
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .rev()
                .map(|(depth, value)| {
                    Line::from(vec![
                        depth_span(depth),
                        Span::styled(value.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    render_rows(frame, area, " Value Stack ", rows, is_focused, scroll_offset);
}
