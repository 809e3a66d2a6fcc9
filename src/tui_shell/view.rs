use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx<'a> {
    pub(super) focus: super::Focus,
    pub(super) loaded_at: &'a str,
}

/// Draws the pane border with its title and returns the inner area.
pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    focused: bool,
    updated_at: &str,
    area: Rect,
) -> Rect {
    let title_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(title.to_string(), title_style)];
    if !updated_at.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            super::fmt_ts_ui(updated_at),
            Style::default().fg(Color::Gray),
        ));
    }

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(spans));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
