use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::CatalogSnapshot;
use crate::config::load_config;
use crate::error::{ReloadError, SubmitError, ValidationError};
use crate::model::{Product, View, is_routable_id};
use crate::notify::{NotificationClient, Notifier, SubmitOutcome, run_sequence};

/// Product/view selection over the current catalog snapshot.
///
/// The view list is always derived from the selected product, so it can never
/// drift from it. Indices are reset whenever the snapshot is replaced.
pub struct SelectionController {
    config_path: PathBuf,
    catalog: Arc<CatalogSnapshot>,
    selected_product: Option<usize>,
    selected_view: Option<usize>,
    busy: bool,
}

/// A validated selection, handed out while the controller is marked busy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    pub product_id: String,
    pub view_id: String,
}

impl SubmitTicket {
    pub fn run(&self, notifier: &dyn Notifier) -> SubmitOutcome {
        run_sequence(notifier, &self.product_id, &self.view_id)
    }
}

impl SelectionController {
    pub fn new(config_path: impl Into<PathBuf>, catalog: CatalogSnapshot) -> Self {
        let mut ctl = Self {
            config_path: config_path.into(),
            catalog: Arc::new(catalog),
            selected_product: None,
            selected_view: None,
            busy: false,
        };
        ctl.reset_selection();
        ctl
    }

    /// Reads config and catalog from disk and selects the first entry.
    pub fn load(config_path: &Path) -> Result<Self, ReloadError> {
        let cfg = load_config(config_path)?;
        let catalog = CatalogSnapshot::load(&cfg)?;
        Ok(Self::new(config_path, catalog))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn catalog(&self) -> &Arc<CatalogSnapshot> {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        &self.catalog.products
    }

    pub fn selected_product(&self) -> Option<usize> {
        self.selected_product
    }

    pub fn selected_view(&self) -> Option<usize> {
        self.selected_view
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn product(&self) -> Option<&Product> {
        self.selected_product.and_then(|i| self.catalog.product(i))
    }

    /// Views of the selected product; empty when nothing is selected.
    pub fn views(&self) -> &[View] {
        self.product().map(|p| p.views.as_slice()).unwrap_or(&[])
    }

    pub fn view(&self) -> Option<&View> {
        self.selected_view.and_then(|i| self.views().get(i))
    }

    pub fn on_product_changed(&mut self, index: usize) {
        self.selected_product = (index < self.catalog.products.len()).then_some(index);
        self.selected_view = first_index(self.views());
        tracing::debug!(
            product = ?self.selected_product,
            view = ?self.selected_view,
            "product selection changed"
        );
    }

    pub fn on_view_changed(&mut self, index: usize) {
        self.selected_view = (index < self.views().len()).then_some(index);
    }

    /// Re-reads config and catalog. On failure the current snapshot and
    /// selection stay as they were.
    pub fn on_reload(&mut self) -> Result<(), ReloadError> {
        let cfg = load_config(&self.config_path)?;
        let catalog = CatalogSnapshot::load(&cfg)?;
        self.replace_catalog(catalog);
        Ok(())
    }

    pub fn replace_catalog(&mut self, catalog: CatalogSnapshot) {
        self.catalog = Arc::new(catalog);
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected_product = first_index(&self.catalog.products);
        self.selected_view = first_index(self.views());
    }

    pub fn validate(&self) -> Result<SubmitTicket, ValidationError> {
        let product = self
            .product()
            .filter(|p| p.is_selectable())
            .ok_or(ValidationError::NoProduct)?;
        let view = self
            .view()
            .filter(|v| !v.id.is_empty())
            .ok_or(ValidationError::NoView)?;
        for id in [&product.id, &view.id] {
            if !is_routable_id(id) {
                return Err(ValidationError::UnroutableId(id.clone()));
            }
        }
        Ok(SubmitTicket {
            product_id: product.id.clone(),
            view_id: view.id.clone(),
        })
    }

    /// Validates the selection and marks the controller busy until
    /// [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.busy {
            return Err(SubmitError::Busy);
        }
        let ticket = self.validate()?;
        self.busy = true;
        Ok(ticket)
    }

    pub fn finish_submit(&mut self) {
        self.busy = false;
    }

    pub fn on_submit(&mut self, notifier: &dyn Notifier) -> Result<SubmitOutcome, SubmitError> {
        let ticket = self.begin_submit()?;
        let out = ticket.run(notifier);
        self.finish_submit();
        Ok(out)
    }

    /// Submits against the services named by a freshly loaded config.
    pub fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let ticket = self.begin_submit()?;
        let res = load_config(&self.config_path)
            .map_err(SubmitError::from)
            .and_then(|cfg| NotificationClient::new(&cfg))
            .map(|client| ticket.run(&client));
        self.finish_submit();
        res
    }
}

fn first_index<T>(items: &[T]) -> Option<usize> {
    (!items.is_empty()).then_some(0)
}
