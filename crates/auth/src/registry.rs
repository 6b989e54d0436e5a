//! Entity → policy declaration and the seam it is registered through.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use billdesk_core::EntityKind;

use crate::PolicyKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("policy mapping already registered")]
    AlreadyRegistered,

    #[error("no implementation registered for {0}")]
    MissingPolicy(PolicyKind),

    #[error("entity kind '{0}' mapped more than once")]
    DuplicateEntity(EntityKind),

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Validated, ordered entity → policy mapping.
///
/// Each entity kind appears at most once. Serializes as a JSON object keyed by
/// entity kind, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyMap {
    entries: Vec<(EntityKind, PolicyKind)>,
}

impl PolicyMap {
    pub fn new<I>(entries: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = (EntityKind, PolicyKind)>,
    {
        let mut out: Vec<(EntityKind, PolicyKind)> = Vec::new();
        for (entity, policy) in entries {
            if out.iter().any(|(e, _)| *e == entity) {
                return Err(GateError::DuplicateEntity(entity));
            }
            out.push((entity, policy));
        }
        Ok(Self { entries: out })
    }

    pub fn get(&self, entity: EntityKind) -> Option<PolicyKind> {
        self.entries
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, p)| *p)
    }

    pub fn entries(&self) -> &[(EntityKind, PolicyKind)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PolicyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (entity, policy) in &self.entries {
            map.serialize_entry(entity.as_str(), policy.as_str())?;
        }
        map.end()
    }
}

/// Anything that accepts a policy mapping at startup.
pub trait PolicyGate {
    fn register(&mut self, map: PolicyMap) -> Result<(), GateError>;
}

/// Which policy governs which protected entity type.
///
/// The table is fixed at compile time. Every entity kind that needs
/// authorization must appear here; queries for a kind without an entry are
/// denied by the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyRegistry;

impl PolicyRegistry {
    const ENTRIES: [(EntityKind, PolicyKind); 4] = [
        (EntityKind::Product, PolicyKind::ProductPolicy),
        (EntityKind::Category, PolicyKind::CategoryPolicy),
        (EntityKind::Customer, PolicyKind::CustomerPolicy),
        (EntityKind::Invoice, PolicyKind::InvoicePolicy),
    ];

    pub fn entries() -> &'static [(EntityKind, PolicyKind)] {
        &Self::ENTRIES
    }

    pub fn policy_map() -> Result<PolicyMap, GateError> {
        PolicyMap::new(Self::ENTRIES)
    }

    /// Hand the mapping to `gate`. Call once per process, before the gate is
    /// shared.
    pub fn boot<G: PolicyGate + ?Sized>(gate: &mut G) -> Result<(), GateError> {
        let map = Self::policy_map()?;
        let count = map.len();
        gate.register(map)?;
        tracing::info!(policies = count, "policy mapping registered");
        Ok(())
    }
}
