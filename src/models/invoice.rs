use std::fmt;

use chrono::{DateTime, Local};

use crate::models::InvoiceDraft;

/// Identifier assigned by the store when an invoice is added. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvoiceId(pub u64);

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed invoice line item.
///
/// Fields are private so `total` can only be produced by the constructors,
/// which keeps `total == quantity * unit_amount` for every record.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRecord {
    id: InvoiceId,
    invoice_number: String,
    client_name: String,
    item_name: String,
    quantity: f64,
    unit_amount: f64,
    total: f64,
    created_at: DateTime<Local>,
}

impl InvoiceRecord {
    pub(crate) fn from_draft(id: InvoiceId, draft: &InvoiceDraft, created_at: DateTime<Local>) -> Self {
        Self {
            id,
            invoice_number: draft.invoice_number.clone(),
            client_name: draft.client_name.clone(),
            item_name: draft.item_name.clone(),
            quantity: draft.quantity,
            unit_amount: draft.amount,
            total: draft.quantity * draft.amount,
            created_at,
        }
    }

    /// Replace every mutable field; `id` and `created_at` stay as they were.
    pub(crate) fn apply_draft(&mut self, draft: &InvoiceDraft) {
        self.invoice_number = draft.invoice_number.clone();
        self.client_name = draft.client_name.clone();
        self.item_name = draft.item_name.clone();
        self.quantity = draft.quantity;
        self.unit_amount = draft.amount;
        self.total = draft.quantity * draft.amount;
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_amount(&self) -> f64 {
        self.unit_amount
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Copy the mutable fields back into a draft, used when editing.
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: self.invoice_number.clone(),
            client_name: self.client_name.clone(),
            item_name: self.item_name.clone(),
            quantity: self.quantity,
            amount: self.unit_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(quantity: f64, amount: f64) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: "INV1".to_string(),
            client_name: "Client A".to_string(),
            item_name: "Widget".to_string(),
            quantity,
            amount,
        }
    }

    #[test]
    fn test_total_is_derived_on_creation_and_update() {
        let mut record = InvoiceRecord::from_draft(InvoiceId(1), &draft(3.0, 10.0), Local::now());
        assert_eq!(record.total(), 30.0);

        record.apply_draft(&draft(2.5, 4.0));
        assert_eq!(record.total(), 10.0);
        assert_eq!(record.quantity(), 2.5);
        assert_eq!(record.unit_amount(), 4.0);
    }

    #[test]
    fn test_to_draft_round_trips_mutable_fields() {
        let original = draft(3.0, 10.0);
        let record = InvoiceRecord::from_draft(InvoiceId(7), &original, Local::now());
        assert_eq!(record.to_draft(), original);
    }

    #[test]
    fn test_invoice_id_display() {
        assert_eq!(InvoiceId(42).to_string(), "#42");
    }
}
