use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        // The "submitting" frame is on screen; now block on the calls.
        if app.submit_requested {
            app.run_submit();
            drain_queued_input()?;
            continue;
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

/// Drops key presses typed while a submit was blocking, so a second Enter
/// cannot fire another submit.
fn drain_queued_input() -> Result<()> {
    while event::poll(Duration::ZERO).context("poll")? {
        event::read().context("read event")?;
    }
    Ok(())
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
        }

        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            app.toggle_focus();
        }

        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),

        KeyCode::Char('r') | KeyCode::F(5) => app.reload(),

        KeyCode::Enter => app.request_submit(),

        _ => {}
    }
}
