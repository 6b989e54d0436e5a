//! Invoicing view support.
//!
//! This crate assembles the data an invoice-edit view needs ([`EditBundle`])
//! from a data source, with authorization checked through the gate. It holds
//! no business rules for invoices themselves (no IO, no HTTP, no storage).

pub mod edit;
pub mod editor;
pub mod source;

pub use edit::EditBundle;
pub use editor::{EditError, InvoiceEditor};
pub use source::{EditSource, InMemoryEditSource};
