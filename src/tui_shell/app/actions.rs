use super::*;

impl App {
    pub(super) fn request_submit(&mut self) {
        if self.submit_requested || self.selection.is_busy() {
            return;
        }
        self.submit_requested = true;
    }

    /// Blocks for the three calls, then reports through a dialog.
    pub(super) fn run_submit(&mut self) {
        self.submit_requested = false;
        match self.selection.submit() {
            Ok(out) => self.show_submit_outcome(&out),
            Err(SubmitError::Validation(err)) => {
                let title = match err {
                    ValidationError::NoProduct => "No selection",
                    ValidationError::NoView => "No view",
                    ValidationError::UnroutableId(_) => "Invalid id",
                };
                self.push_error(err.to_string());
                self.open_modal(ModalKind::Warning, title, vec![err.to_string()]);
            }
            Err(err) => {
                tracing::error!("submit failed: {:#}", err);
                self.show_error(
                    "Error",
                    vec![format!("{:#}", anyhow::Error::from(err))],
                );
            }
        }
    }

    fn show_submit_outcome(&mut self, out: &SubmitOutcome) {
        let mut lines: Vec<String> = out.message().lines().map(str::to_string).collect();
        if out.ok() {
            lines.insert(0, "All operations completed successfully:".to_string());
            self.push_output(vec![format!(
                "activated {} / {}",
                out.product_id, out.view_id
            )]);
            self.open_modal(ModalKind::Info, "Success", lines);
        } else {
            let failed: Vec<&str> = out
                .steps
                .iter()
                .filter(|s| !s.outcome.ok)
                .map(|s| s.step.label())
                .collect();
            self.push_error(format!(
                "{} / {}: {} failed",
                out.product_id,
                out.view_id,
                failed.join(", ")
            ));
            self.open_modal(ModalKind::Error, "Error", lines);
        }
    }

    pub(super) fn reload(&mut self) {
        match self.selection.on_reload() {
            Ok(()) => {
                self.focus = Focus::Products;
                self.push_output(vec![format!(
                    "reloaded {} products from {}",
                    self.selection.products().len(),
                    self.selection.catalog().source.display()
                )]);
            }
            Err(err) => {
                tracing::error!("reload failed: {:#}", err);
                self.show_error(
                    "Reload failed",
                    vec![format!("{:#}", anyhow::Error::from(err))],
                );
            }
        }
    }
}
