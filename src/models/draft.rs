/// Uncommitted invoice input. Numeric fields are already parsed; the form
/// converts typed text before it reaches the draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub client_name: String,
    pub item_name: String,
    pub quantity: f64,
    pub amount: f64,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line total the draft would commit with.
    pub fn total(&self) -> f64 {
        self.quantity * self.amount
    }
}
