pub mod components;
pub mod invoice_form;
pub mod invoices;
