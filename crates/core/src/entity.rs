//! Protected entity kinds and the `Entity` trait.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{error::DomainError, record::Record};

/// The closed set of entity types that authorization is declared for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Category,
    Customer,
    Invoice,
}

impl EntityKind {
    /// All kinds, in registration order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Product,
        EntityKind::Category,
        EntityKind::Customer,
        EntityKind::Invoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Customer => "customer",
            EntityKind::Invoice => "invoice",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownEntityKind(s.to_string()))
    }
}

/// A runtime instance of a protected entity.
///
/// Object safe: authorization takes `&dyn Entity` so callers can hand any
/// typed record to the gate.
pub trait Entity {
    /// Which kind of entity this instance is (drives policy resolution).
    fn entity_kind(&self) -> EntityKind;

    /// The underlying opaque record.
    fn record(&self) -> &Record;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_form_is_stable() {
        let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["product", "category", "customer", "invoice"]);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Invoice".parse::<EntityKind>().unwrap(), EntityKind::Invoice);
        assert_eq!(" category ".parse::<EntityKind>().unwrap(), EntityKind::Category);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "supplier".parse::<EntityKind>(),
            Err(DomainError::UnknownEntityKind("supplier".to_string()))
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_value(EntityKind::Customer).unwrap();
        assert_eq!(json, serde_json::json!("customer"));
    }
}
