use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent};

fn modal_color(kind: super::ModalKind) -> Color {
    match kind {
        super::ModalKind::Info => Color::Green,
        super::ModalKind::Warning => Color::Yellow,
        super::ModalKind::Error => Color::Red,
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &super::Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);
    let h = (modal.lines.len() as u16 + 4).clamp(6, area.height.saturating_sub(4).max(6));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w.min(area.width),
        height: h.min(area.height),
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let color = modal_color(modal.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Line::styled(modal.title.as_str(), Style::default().fg(color)))
        .title_bottom(Line::from("Enter/Esc: close").right_aligned());
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    let Some(m) = app.modal_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Up | KeyCode::Char('k') => {
            m.scroll = m.scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            m.scroll = (m.scroll + 1).min(m.lines.len().saturating_sub(1));
        }
        KeyCode::PageUp => {
            m.scroll = m.scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            m.scroll = (m.scroll + 10).min(m.lines.len().saturating_sub(1));
        }
        _ => {}
    }
}
