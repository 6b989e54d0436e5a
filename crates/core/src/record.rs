//! Opaque records.
//!
//! The internal shape of products, categories, customers and invoices is owned
//! by whatever data source produced them. At this layer a record is just a
//! JSON object; nothing here inspects or validates its fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{Entity, EntityKind};
use crate::error::{DomainError, DomainResult};

/// An opaque key-value record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from an arbitrary JSON value.
    ///
    /// Only objects are records; anything else is a validation error.
    pub fn from_value(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::validation(format!(
                "record must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `id` field rendered as a string, if present.
    ///
    /// Used for logging and lookups only; records without an id are valid.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl TryFrom<Value> for Record {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Record::from_value(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

macro_rules! typed_record {
    ($(#[$meta:meta])* $t:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Record);

        impl $t {
            pub fn new(record: Record) -> Self {
                Self(record)
            }

            pub fn from_value(value: Value) -> DomainResult<Self> {
                Record::from_value(value).map(Self)
            }

            pub fn into_record(self) -> Record {
                self.0
            }
        }

        impl From<Record> for $t {
            fn from(value: Record) -> Self {
                Self(value)
            }
        }

        impl TryFrom<Value> for $t {
            type Error = DomainError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                Self::from_value(value)
            }
        }

        impl Entity for $t {
            fn entity_kind(&self) -> EntityKind {
                $kind
            }

            fn record(&self) -> &Record {
                &self.0
            }
        }
    };
}

typed_record!(
    /// A product record.
    ProductRecord,
    EntityKind::Product
);
typed_record!(
    /// A product category record.
    CategoryRecord,
    EntityKind::Category
);
typed_record!(
    /// A customer record.
    CustomerRecord,
    EntityKind::Customer
);
typed_record!(
    /// An invoice record.
    InvoiceRecord,
    EntityKind::Invoice
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_objects_are_not_records() {
        let err = Record::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("record must be a JSON object, got array".to_string())
        );
    }

    #[test]
    fn id_accepts_numbers_and_strings() {
        let numeric = Record::from_value(json!({"id": 7})).unwrap();
        let text = Record::from_value(json!({"id": "inv-7"})).unwrap();
        let missing = Record::from_value(json!({"total": 1})).unwrap();

        assert_eq!(numeric.id().as_deref(), Some("7"));
        assert_eq!(text.id().as_deref(), Some("inv-7"));
        assert_eq!(missing.id(), None);
    }

    #[test]
    fn typed_records_report_their_kind() {
        let invoice = InvoiceRecord::from_value(json!({"id": 1})).unwrap();
        let customer = CustomerRecord::default();
        let entities: Vec<&dyn Entity> = vec![&invoice, &customer];

        assert_eq!(entities[0].entity_kind(), EntityKind::Invoice);
        assert_eq!(entities[1].entity_kind(), EntityKind::Customer);
        assert_eq!(entities[0].record().id().as_deref(), Some("1"));
    }

    #[test]
    fn typed_records_serialize_transparently() {
        let product = ProductRecord::from_value(json!({"id": 9, "sku": "X"})).unwrap();
        assert_eq!(serde_json::to_value(&product).unwrap(), json!({"id": 9, "sku": "X"}));
    }
}
