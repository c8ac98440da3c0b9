//! In-memory invoice records with a terminal form for adding, editing,
//! searching and listing them.

pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod models;
pub mod projection;
pub mod store;
pub mod ui;
pub mod validation;
