use std::fmt;

use crate::models::InvoiceDraft;

/// Every user-editable field of an invoice, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceField {
    InvoiceNumber,
    ClientName,
    ItemName,
    Quantity,
    Amount,
}

impl InvoiceField {
    pub const ALL: [InvoiceField; 5] = [
        InvoiceField::InvoiceNumber,
        InvoiceField::ClientName,
        InvoiceField::ItemName,
        InvoiceField::Quantity,
        InvoiceField::Amount,
    ];

    /// Stable key used when errors are looked up by name.
    pub fn key(self) -> &'static str {
        match self {
            InvoiceField::InvoiceNumber => "invoiceNumber",
            InvoiceField::ClientName => "clientName",
            InvoiceField::ItemName => "itemName",
            InvoiceField::Quantity => "quantity",
            InvoiceField::Amount => "amount",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InvoiceField::InvoiceNumber => "Invoice Number",
            InvoiceField::ClientName => "Client Name",
            InvoiceField::ItemName => "Item Name",
            InvoiceField::Quantity => "Quantity",
            InvoiceField::Amount => "Amount",
        }
    }

    fn message(self) -> &'static str {
        match self {
            InvoiceField::InvoiceNumber => "Invoice number is required.",
            InvoiceField::ClientName => "Client name is required.",
            InvoiceField::ItemName => "Item name is required.",
            InvoiceField::Quantity => "Quantity must be greater than 0.",
            InvoiceField::Amount => "Amount must be greater than 0.",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One optional message per field. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: [Option<&'static str>; 5],
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&mut self, field: InvoiceField) {
        self.messages[field.index()] = Some(field.message());
    }

    pub fn get(&self, field: InvoiceField) -> Option<&'static str> {
        self.messages[field.index()]
    }

    pub fn get_by_key(&self, key: &str) -> Option<&'static str> {
        InvoiceField::ALL
            .iter()
            .find(|f| f.key() == key)
            .and_then(|f| self.get(*f))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_by_key(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.messages.iter().filter(|m| m.is_some()).count()
    }

    /// Failing fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (InvoiceField, &'static str)> + '_ {
        InvoiceField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|m| (f, m)))
    }

    pub fn clear(&mut self) {
        self.messages = [None; 5];
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, m)| m).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// Run every check against the draft. Checks never short-circuit, so all
/// failing fields are reported together.
pub fn validate(draft: &InvoiceDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.invoice_number.is_empty() {
        errors.flag(InvoiceField::InvoiceNumber);
    }
    if draft.client_name.is_empty() {
        errors.flag(InvoiceField::ClientName);
    }
    if draft.item_name.is_empty() {
        errors.flag(InvoiceField::ItemName);
    }
    // `!(x > 0.0)` so NaN fails too
    if !(draft.quantity > 0.0) {
        errors.flag(InvoiceField::Quantity);
    }
    if !(draft.amount > 0.0) {
        errors.flag(InvoiceField::Amount);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: "INV1".to_string(),
            client_name: "Client A".to_string(),
            item_name: "Widget".to_string(),
            quantity: 3.0,
            amount: 10.0,
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate(&valid_draft());
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = validate(&InvoiceDraft::new());
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(InvoiceField::InvoiceNumber), Some("Invoice number is required."));
        assert_eq!(errors.get(InvoiceField::ClientName), Some("Client name is required."));
        assert_eq!(errors.get(InvoiceField::ItemName), Some("Item name is required."));
        assert_eq!(errors.get(InvoiceField::Quantity), Some("Quantity must be greater than 0."));
        assert_eq!(errors.get(InvoiceField::Amount), Some("Amount must be greater than 0."));
    }

    #[test]
    fn test_zero_quantity_is_keyed_by_quantity() {
        let mut draft = valid_draft();
        draft.quantity = 0.0;
        let errors = validate(&draft);
        assert!(errors.contains_key("quantity"));
        assert!(!errors.contains_key("amount"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_negative_and_nan_amounts_fail() {
        let mut draft = valid_draft();
        draft.amount = -1.0;
        assert!(validate(&draft).contains_key("amount"));
        draft.amount = f64::NAN;
        assert!(validate(&draft).contains_key("amount"));
    }

    #[test]
    fn test_get_by_key() {
        let mut draft = valid_draft();
        draft.item_name.clear();
        let errors = validate(&draft);
        assert_eq!(errors.get_by_key("itemName"), Some("Item name is required."));
        assert_eq!(errors.get_by_key("unknown"), None);
    }

    #[test]
    fn test_iter_follows_form_order() {
        let mut draft = valid_draft();
        draft.amount = 0.0;
        draft.invoice_number.clear();
        let fields: Vec<InvoiceField> = validate(&draft).iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![InvoiceField::InvoiceNumber, InvoiceField::Amount]);
    }
}
