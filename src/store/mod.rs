use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{InvoiceDraft, InvoiceId, InvoiceRecord};
use crate::validation::validate;

/// Source of creation timestamps for new records
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// In-memory invoice records for the lifetime of the session
pub struct RecordStore {
    records: Vec<InvoiceRecord>,
    next_id: u64,
    clock: Box<dyn Clock>,
}

impl RecordStore {
    /// Create an empty store stamping records with the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store reading creation times from `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            clock: Box::new(clock),
        }
    }

    /// Validate the draft and append a new record built from it
    ///
    /// The new record gets a fresh id, its total, and the current time.
    pub fn add(&mut self, draft: &InvoiceDraft) -> Result<InvoiceId, StoreError> {
        let errors = validate(draft);
        if !errors.is_empty() {
            debug!(failed = errors.len(), "rejected invoice draft");
            return Err(StoreError::Validation(errors));
        }

        let id = InvoiceId(self.next_id);
        self.next_id += 1;

        let record = InvoiceRecord::from_draft(id, draft, self.clock.now());
        info!(
            id = id.0,
            number = %record.invoice_number(),
            client = %record.client_name(),
            total = record.total(),
            "added invoice"
        );
        self.records.push(record);

        Ok(id)
    }

    /// Validate the draft and replace the mutable fields of record `id`
    pub fn update(&mut self, id: InvoiceId, draft: &InvoiceDraft) -> Result<(), StoreError> {
        let errors = validate(draft);
        if !errors.is_empty() {
            debug!(id = id.0, failed = errors.len(), "rejected invoice update");
            return Err(StoreError::Validation(errors));
        }

        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            warn!(id = id.0, "update of missing invoice");
            return Err(StoreError::NotFound(id));
        };

        record.apply_draft(draft);
        info!(id = id.0, total = record.total(), "updated invoice");

        Ok(())
    }

    /// Remove record `id` if present
    ///
    /// Removing an absent id is a no-op. Confirmation is the caller's job.
    /// Returns whether a record was removed.
    pub fn remove(&mut self, id: InvoiceId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;

        if removed {
            info!(id = id.0, "removed invoice");
        } else {
            debug!(id = id.0, "remove of missing invoice ignored");
        }

        removed
    }

    /// All records in insertion order
    pub fn list(&self) -> &[InvoiceRecord] {
        &self.records
    }

    pub fn get(&self, id: InvoiceId) -> Option<&InvoiceRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{draft, ManualClock};
    use super::*;

    #[test]
    fn test_add_appends_one_record_with_total() {
        let mut store = RecordStore::with_clock(ManualClock::new());
        let id = store.add(&draft("INV1", "Client A", 3.0, 10.0)).unwrap();

        assert_eq!(store.len(), 1);
        let record = &store.list()[0];
        assert_eq!(record.id(), id);
        assert_eq!(record.invoice_number(), "INV1");
        assert_eq!(record.item_name(), "Widget");
        assert_eq!(record.total(), 30.0);
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut store = RecordStore::new();
        let err = store.add(&draft("INV1", "Client A", 0.0, 10.0)).unwrap_err();

        match err {
            StoreError::Validation(errors) => assert!(errors.contains_key("quantity")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_preserves_id_and_creation_time() {
        let clock = ManualClock::new();
        let mut store = RecordStore::with_clock(clock.clone());
        let id = store.add(&draft("INV1", "Client A", 3.0, 10.0)).unwrap();
        let created_at = store.get(id).unwrap().created_at();

        clock.advance(60);
        store.update(id, &draft("INV2", "Client B", 4.0, 2.5)).unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.id(), id);
        assert_eq!(record.created_at(), created_at);
        assert_eq!(record.invoice_number(), "INV2");
        assert_eq!(record.client_name(), "Client B");
        assert_eq!(record.total(), 10.0);
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let mut store = RecordStore::new();
        let err = store.update(InvoiceId(99), &InvoiceDraft::new()).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let mut store = RecordStore::new();
        let err = store.update(InvoiceId(99), &draft("INV1", "Client A", 1.0, 1.0)).unwrap_err();
        assert_eq!(err, StoreError::NotFound(InvoiceId(99)));
    }

    #[test]
    fn test_invalid_update_leaves_record_unchanged() {
        let mut store = RecordStore::new();
        let id = store.add(&draft("INV1", "Client A", 3.0, 10.0)).unwrap();
        let before = store.get(id).unwrap().clone();

        assert!(store.update(id, &draft("INV1", "Client A", -2.0, 10.0)).is_err());
        assert_eq!(store.get(id).unwrap(), &before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = RecordStore::new();
        let keep = store.add(&draft("INV1", "Client A", 1.0, 1.0)).unwrap();
        let gone = store.add(&draft("INV2", "Client B", 1.0, 1.0)).unwrap();

        assert!(store.remove(gone));
        let after_once: Vec<InvoiceRecord> = store.list().to_vec();
        assert!(!store.remove(gone));

        assert_eq!(store.list(), after_once.as_slice());
        assert_eq!(store.list()[0].id(), keep);
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        let mut store = RecordStore::new();
        let first = store.add(&draft("INV1", "Client A", 1.0, 1.0)).unwrap();
        store.remove(first);
        let second = store.add(&draft("INV2", "Client A", 1.0, 1.0)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = RecordStore::new();
        for number in ["INV3", "INV1", "INV2"] {
            store.add(&draft(number, "Client A", 1.0, 1.0)).unwrap();
        }
        let numbers: Vec<&str> = store.list().iter().map(|r| r.invoice_number()).collect();
        assert_eq!(numbers, vec!["INV3", "INV1", "INV2"]);
    }
}
