use super::*;

impl App {
    fn push_entry(&mut self, kind: EntryKind, lines: Vec<String>) {
        tracing::debug!(?kind, "{}", lines.join(" | "));
        self.last_result = Some(ScrollEntry {
            ts: now_ts(),
            kind,
            lines,
        });
    }

    pub(in crate::tui_shell) fn push_output(&mut self, lines: Vec<String>) {
        self.push_entry(EntryKind::Output, lines);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, msg: String) {
        self.push_entry(EntryKind::Error, vec![msg]);
    }

    pub(super) fn open_modal(
        &mut self,
        kind: ModalKind,
        title: impl Into<String>,
        lines: Vec<String>,
    ) {
        self.modal = Some(Modal {
            kind,
            title: title.into(),
            lines,
            scroll: 0,
        });
    }

    pub(super) fn show_error(&mut self, title: impl Into<String>, lines: Vec<String>) {
        let title = title.into();
        self.push_error(format!("{}: {}", title, lines.join(" ")));
        self.open_modal(ModalKind::Error, title, lines);
    }

    pub(in crate::tui_shell) fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }
}
