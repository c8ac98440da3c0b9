use thiserror::Error;

use crate::models::InvoiceId;
use crate::validation::ValidationErrors;

/// Failures of record store and form operations. All of them are
/// recoverable and meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("invalid invoice: {0}")]
    Validation(ValidationErrors),
    #[error("invoice {0} not found")]
    NotFound(InvoiceId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("client roster is empty, set INVOICE_FORM_CLIENTS or pass --clients")]
    EmptyRoster,
}
