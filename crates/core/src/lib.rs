//! `billdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! opaque records, the closed set of protected entity kinds, and the shared
//! error model.

pub mod entity;
pub mod error;
pub mod id;
pub mod record;

pub use entity::{Entity, EntityKind};
pub use error::{DomainError, DomainResult};
pub use id::TenantId;
pub use record::{CategoryRecord, CustomerRecord, InvoiceRecord, ProductRecord, Record};
