use serde::Serialize;
use serde_json::{Map, Value};

use billdesk_core::{CustomerRecord, Entity, InvoiceRecord, ProductRecord};

/// Everything an invoice-edit view needs, as one value.
///
/// Built once per request from freshly fetched data and never mutated; the
/// fields are private so all three are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditBundle {
    invoice: InvoiceRecord,
    customers: Vec<CustomerRecord>,
    products: Vec<ProductRecord>,
}

impl EditBundle {
    pub fn new(
        invoice: InvoiceRecord,
        customers: Vec<CustomerRecord>,
        products: Vec<ProductRecord>,
    ) -> Self {
        Self {
            invoice,
            customers,
            products,
        }
    }

    pub fn invoice(&self) -> &InvoiceRecord {
        &self.invoice
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn into_parts(self) -> (InvoiceRecord, Vec<CustomerRecord>, Vec<ProductRecord>) {
        (self.invoice, self.customers, self.products)
    }

    /// Generic key-value form for view rendering.
    ///
    /// A fresh map with exactly `invoice`, `customers` and `products`, holding
    /// the constructor values unchanged.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("invoice".to_string(), record_value(&self.invoice));
        map.insert(
            "customers".to_string(),
            Value::Array(self.customers.iter().map(|c| record_value(c)).collect()),
        );
        map.insert(
            "products".to_string(),
            Value::Array(self.products.iter().map(|p| record_value(p)).collect()),
        );
        map
    }
}

fn record_value(entity: &dyn Entity) -> Value {
    entity.record().clone().into_value()
}
