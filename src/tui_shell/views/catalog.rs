use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::selection::SelectionController;

use super::super::{Focus, RenderCtx, render_view_chrome};

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

pub(in crate::tui_shell) struct ProductsPane<'a> {
    selection: &'a SelectionController,
}

impl<'a> ProductsPane<'a> {
    pub(in crate::tui_shell) fn new(selection: &'a SelectionController) -> Self {
        Self { selection }
    }

    pub(in crate::tui_shell) fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: Rect,
        ctx: &RenderCtx,
    ) {
        let inner = render_view_chrome(
            frame,
            "Products",
            ctx.focus == Focus::Products,
            ctx.loaded_at,
            area,
        );
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let products = self.selection.products();
        let mut state = ListState::default();
        state.select(self.selection.selected_product());

        let mut rows: Vec<ListItem> = products
            .iter()
            .map(|p| {
                let style = if p.is_selectable() {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(p.display_name().to_string()).style(style)
            })
            .collect();
        if rows.is_empty() {
            rows.push(ListItem::new("(no products)"));
        }

        let list = List::new(rows)
            .highlight_style(highlight())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, parts[0], &mut state);

        let details = match self.selection.product() {
            Some(p) => vec![
                Line::from(format!(
                    "id: {}",
                    if p.id.is_empty() { "(none)" } else { p.id.as_str() }
                )),
                Line::from(format!("source: {}", self.selection.catalog().source.display())),
            ],
            None => vec![Line::from("(no selection)")],
        };
        frame.render_widget(
            Paragraph::new(details)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP)),
            parts[1],
        );
    }
}

pub(in crate::tui_shell) struct ViewsPane<'a> {
    selection: &'a SelectionController,
}

impl<'a> ViewsPane<'a> {
    pub(in crate::tui_shell) fn new(selection: &'a SelectionController) -> Self {
        Self { selection }
    }

    pub(in crate::tui_shell) fn render(
        &self,
        frame: &mut ratatui::Frame,
        area: Rect,
        ctx: &RenderCtx,
    ) {
        let inner = render_view_chrome(frame, "Views", ctx.focus == Focus::Views, "", area);

        let views = self.selection.views();
        let mut state = ListState::default();
        state.select(self.selection.selected_view());

        let mut rows: Vec<ListItem> = views
            .iter()
            .map(|v| {
                if v.name.is_some() {
                    ListItem::new(format!("{} ({})", v.display_name(), v.id))
                } else {
                    ListItem::new(v.display_name().to_string())
                }
            })
            .collect();
        if rows.is_empty() {
            let msg = if self.selection.product().is_some() {
                "(no views)"
            } else {
                "(no product selected)"
            };
            rows.push(ListItem::new(msg));
        }

        let list = List::new(rows)
            .highlight_style(highlight())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, inner, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crate::model::{Product, View};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn panes_show_products_and_views_of_selection() {
        let ctl = SelectionController::new(
            "configs.json",
            CatalogSnapshot::new(
                PathBuf::from("products.json"),
                vec![Product {
                    id: "P1".to_string(),
                    name: "Widget".to_string(),
                    views: vec![View {
                        id: "V1".to_string(),
                        name: Some("Front".to_string()),
                    }],
                }],
            ),
        );
        let ctx = RenderCtx {
            focus: Focus::Products,
            loaded_at: "",
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(f.area());
                ProductsPane::new(&ctl).render(f, halves[0], &ctx);
                ViewsPane::new(&ctl).render(f, halves[1], &ctx);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("> Widget"));
        assert!(text.contains("> Front (V1)"));
        assert!(text.contains("id: P1"));
    }

    #[test]
    fn empty_catalog_renders_placeholders() {
        let ctl = SelectionController::new("configs.json", CatalogSnapshot::empty());
        let ctx = RenderCtx {
            focus: Focus::Views,
            loaded_at: "",
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(f.area());
                ProductsPane::new(&ctl).render(f, halves[0], &ctx);
                ViewsPane::new(&ctl).render(f, halves[1], &ctx);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("(no products)"));
        assert!(text.contains("(no product selected)"));
    }
}
