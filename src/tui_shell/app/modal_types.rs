/// Result dialogs; the kind picks the border color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ModalKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
}
