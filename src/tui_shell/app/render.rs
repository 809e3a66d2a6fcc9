use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let catalog = app.selection().catalog();
    let spans = vec![
        Span::styled(
            "Product Selector",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            app.selection().config_path().display().to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::raw(format!("{} products", catalog.products.len())),
    ];
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    // Product and view lists
    let ctx = RenderCtx {
        focus: app.focus(),
        loaded_at: &catalog.loaded_at,
    };
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    ProductsPane::new(app.selection()).render(frame, panes[0], &ctx);
    ViewsPane::new(app.selection()).render(frame, panes[1], &ctx);

    // Status / last result
    {
        let mut lines = Vec::new();
        if app.submit_requested {
            let target = app
                .selection()
                .validate()
                .map(|t| format!("{} / {}", t.product_id, t.view_id))
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("submitting {} ...", target),
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_ts_ui(&r.ts)),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Key hints
    let hints = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" change product  "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" switch list  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" refresh list  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);

    if let Some(m) = app.modal() {
        modal::draw_modal(frame, m);
    }
}
