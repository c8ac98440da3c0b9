use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{InvoiceDraft, InvoiceId};
use crate::store::RecordStore;
use crate::validation::{validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(InvoiceId),
}

/// What a successful submit committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added(InvoiceId),
    Updated(InvoiceId),
}

/// Draft input, its validation errors, and whether it targets an existing
/// invoice
#[derive(Debug, Default)]
pub struct InvoiceForm {
    pub draft: InvoiceDraft,
    errors: ValidationErrors,
    mode: EditMode,
}

impl InvoiceForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    /// Load record `id` into the draft and switch to editing it.
    ///
    /// Leaves the form untouched when the record does not exist.
    pub fn begin_edit(&mut self, store: &RecordStore, id: InvoiceId) -> Result<(), StoreError> {
        let Some(record) = store.get(id) else {
            warn!(id = id.0, "cannot edit missing invoice");
            return Err(StoreError::NotFound(id));
        };

        self.draft = record.to_draft();
        self.errors.clear();
        self.mode = EditMode::Editing(id);
        debug!(id = id.0, "editing invoice");

        Ok(())
    }

    /// Commit the draft: update the record being edited, or add a new one.
    ///
    /// An invalid draft stays in place with its errors populated. A record
    /// that vanished while being edited drops the form back to idle with the
    /// draft kept, so it can be submitted again as a new invoice.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<Submitted, StoreError> {
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(StoreError::Validation(errors));
        }

        let outcome = match self.mode {
            EditMode::Editing(id) => match store.update(id, &self.draft) {
                Ok(()) => Submitted::Updated(id),
                Err(StoreError::NotFound(id)) => {
                    self.mode = EditMode::Idle;
                    self.errors.clear();
                    return Err(StoreError::NotFound(id));
                }
                Err(err) => return Err(err),
            },
            EditMode::Idle => Submitted::Added(store.add(&self.draft)?),
        };

        self.reset();
        Ok(outcome)
    }

    /// Drop the draft and any edit in progress. The store is not touched.
    pub fn cancel(&mut self) {
        if let EditMode::Editing(id) = self.mode {
            debug!(id = id.0, "edit cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = InvoiceDraft::new();
        self.errors.clear();
        self.mode = EditMode::Idle;
    }
}
