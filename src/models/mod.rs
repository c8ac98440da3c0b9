mod client;
mod draft;
mod invoice;

pub use client::ClientRoster;
pub use draft::InvoiceDraft;
pub use invoice::{InvoiceId, InvoiceRecord};
