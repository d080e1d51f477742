//! Editing session: the HTTP form layer over the in-memory quotation.

pub mod handlers;
pub mod views;

pub use handlers::config;
pub use views::{QuotationPreview, QuotationSummary};
