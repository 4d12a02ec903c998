//! Result pane: current step, then the parse outcome once the end is reached

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::parser::ast::Node;
use crate::parser::Error;
use crate::snapshot::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the result pane
pub struct ResultRenderData<'a> {
    pub step: Option<&'a Step>,
    pub outcome: &'a Result<Node, Error>,
    pub show_outcome: bool,
    pub is_truncated: bool,
}

/// Render the result pane
pub fn render_result_pane(
    frame: &mut Frame,
    area: Rect,
    data: ResultRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Result ", is_focused);
    let label = Style::default().fg(DEFAULT_THEME.comment);
    let mut lines = Vec::new();

    if let Some(step) = data.step {
        let step_style = match step {
            Step::Failed { .. } => Style::default().fg(DEFAULT_THEME.error),
            Step::Accept => Style::default().fg(DEFAULT_THEME.success),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        lines.push(Line::from(vec![
            Span::styled("step: ", label),
            Span::styled(step.to_string(), step_style),
        ]));
    }
    if data.is_truncated {
        lines.push(Line::from(Span::styled(
            "history truncated: snapshot memory limit reached",
            Style::default().fg(DEFAULT_THEME.secondary),
        )));
    }
    lines.push(Line::raw(""));

    if !data.show_outcome {
        lines.push(Line::from(Span::styled(
            "(step to the end, or press ↵, to see the result)",
            label,
        )));
    } else {
        match data.outcome {
            Ok(node) => {
                lines.push(Line::from(vec![
                    Span::styled("parsed: ", label),
                    Span::styled(
                        node.to_string(),
                        Style::default()
                            .fg(DEFAULT_THEME.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::raw(""));
                lines.extend(
                    node.tree_lines()
                        .into_iter()
                        .map(|l| Line::styled(l, Style::default().fg(DEFAULT_THEME.fg))),
                );
            }
            Err(e) => {
                let kind = if e.is_internal() {
                    "internal error: "
                } else {
                    match e {
                        Error::Lex(_) => "lexical error: ",
                        Error::Parse(_) => "syntax error: ",
                    }
                };
                lines.push(Line::from(vec![
                    Span::styled(kind, label),
                    Span::styled(
                        e.to_string(),
                        Style::default()
                            .fg(DEFAULT_THEME.error)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                if let Some(location) = e.location() {
                    lines.push(Line::from(Span::styled(format!("at {}", location), label)));
                }
            }
        }
    }

    let height = visible_height(area);
    clamp_scroll(lines.len(), height, scroll_offset);
    let visible: Vec<Line> = lines.into_iter().skip(*scroll_offset).take(height).collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
