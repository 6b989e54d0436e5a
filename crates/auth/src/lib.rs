//! `billdesk-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns the
//! entity→policy declaration ([`PolicyRegistry`]) and the in-process gate
//! ([`Gate`]) that dispatches authorization queries to policies.

pub mod action;
pub mod authorize;
pub mod claims;
pub mod gate;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod registry;
pub mod roles;

pub use action::{Access, Action};
pub use authorize::{authorize, AuthzError};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use gate::Gate;
pub use permissions::Permission;
pub use policy::{
    CategoryPolicy, CustomerPolicy, Decision, DenialKind, InvoicePolicy, Policy, PolicyKind, ProductPolicy,
};
pub use principal::{Principal, PrincipalId, TenantMembership};
pub use registry::{GateError, PolicyGate, PolicyMap, PolicyRegistry};
pub use roles::{Role, RolePermissions};
