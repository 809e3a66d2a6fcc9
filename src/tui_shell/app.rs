use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::catalog::CatalogSnapshot;
use crate::error::{SubmitError, ValidationError};
use crate::notify::SubmitOutcome;
use crate::selection::SelectionController;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use super::modal;
use super::view::RenderCtx;
use super::views::{ProductsPane, ViewsPane};

mod actions;
mod event_loop;
mod log_types;
mod modal_output;
mod modal_types;
mod render;
mod time_utils;

use self::log_types::{EntryKind, ScrollEntry};
pub(super) use self::modal_types::{Modal, ModalKind};
pub(in crate::tui_shell) use self::time_utils::now_ts;
pub(super) use self::time_utils::fmt_ts_ui;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::load(opts);
    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Which list the arrow keys move through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    Products,
    Views,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Products => Focus::Views,
            Focus::Views => Focus::Products,
        }
    }
}

pub(super) struct App {
    selection: SelectionController,

    focus: Focus,

    last_result: Option<ScrollEntry>,

    modal: Option<Modal>,

    // Set by Enter; the loop draws once more before making the blocking calls.
    submit_requested: bool,

    quit: bool,
}

impl App {
    pub(super) fn new(selection: SelectionController) -> Self {
        Self {
            selection,
            focus: Focus::Products,
            last_result: None,
            modal: None,
            submit_requested: false,
            quit: false,
        }
    }

    fn load(opts: crate::tui::TuiRunOptions) -> Self {
        match SelectionController::load(&opts.config_path) {
            Ok(selection) => {
                let mut app = App::new(selection);
                app.push_output(vec![format!(
                    "loaded {} products (Enter: change product; r: refresh list; q: quit)",
                    app.selection.products().len()
                )]);
                app
            }
            Err(err) => {
                tracing::error!("initial load failed: {:#}", err);
                let mut app = App::new(SelectionController::new(
                    opts.config_path,
                    CatalogSnapshot::empty(),
                ));
                app.show_error(
                    "Load failed",
                    vec![format!("{:#}", anyhow::Error::from(err))],
                );
                app
            }
        }
    }

    pub(super) fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub(super) fn focus(&self) -> Focus {
        self.focus
    }

    fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Products => {
                let len = self.selection.products().len();
                if let Some(next) = step_index(self.selection.selected_product(), len, delta) {
                    self.selection.on_product_changed(next);
                }
            }
            Focus::Views => {
                let len = self.selection.views().len();
                if let Some(next) = step_index(self.selection.selected_view(), len, delta) {
                    self.selection.on_view_changed(next);
                }
            }
        }
    }
}

/// Moves `cur` by `delta`, clamped to the list. `None` for an empty list.
fn step_index(cur: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let cur = cur.unwrap_or(0) as isize;
    Some((cur + delta).clamp(0, len as isize - 1) as usize)
}
