use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use billdesk_core::{CustomerRecord, Entity, InvoiceRecord, ProductRecord, TenantId};

/// Where the edit view's data comes from (repository / query layer).
///
/// Tenant-scoped; lists come back in the source's own order.
pub trait EditSource: Send + Sync {
    fn invoice(&self, tenant_id: TenantId, invoice_id: &str) -> Option<InvoiceRecord>;
    fn customers(&self, tenant_id: TenantId) -> Vec<CustomerRecord>;
    fn products(&self, tenant_id: TenantId) -> Vec<ProductRecord>;
}

impl<S> EditSource for Arc<S>
where
    S: EditSource + ?Sized,
{
    fn invoice(&self, tenant_id: TenantId, invoice_id: &str) -> Option<InvoiceRecord> {
        (**self).invoice(tenant_id, invoice_id)
    }

    fn customers(&self, tenant_id: TenantId) -> Vec<CustomerRecord> {
        (**self).customers(tenant_id)
    }

    fn products(&self, tenant_id: TenantId) -> Vec<ProductRecord> {
        (**self).products(tenant_id)
    }
}

#[derive(Debug, Default, Clone)]
struct TenantRecords {
    invoices: Vec<InvoiceRecord>,
    customers: Vec<CustomerRecord>,
    products: Vec<ProductRecord>,
}

/// In-memory tenant-isolated source for tests/dev.
///
/// Invoices are looked up by their `id` field; inserting an invoice whose id
/// is already present replaces it.
#[derive(Debug, Default)]
pub struct InMemoryEditSource {
    inner: RwLock<HashMap<TenantId, TenantRecords>>,
}

impl InMemoryEditSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_invoice(&self, tenant_id: TenantId, invoice: InvoiceRecord) {
        if let Ok(mut map) = self.inner.write() {
            let invoices = &mut map.entry(tenant_id).or_default().invoices;
            let id = invoice.record().id();
            match invoices
                .iter_mut()
                .find(|existing| id.is_some() && existing.record().id() == id)
            {
                Some(existing) => *existing = invoice,
                None => invoices.push(invoice),
            }
        }
    }

    pub fn push_customer(&self, tenant_id: TenantId, customer: CustomerRecord) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(tenant_id).or_default().customers.push(customer);
        }
    }

    pub fn push_product(&self, tenant_id: TenantId, product: ProductRecord) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(tenant_id).or_default().products.push(product);
        }
    }
}

impl EditSource for InMemoryEditSource {
    fn invoice(&self, tenant_id: TenantId, invoice_id: &str) -> Option<InvoiceRecord> {
        let map = self.inner.read().ok()?;
        map.get(&tenant_id)?
            .invoices
            .iter()
            .find(|inv| inv.record().id().as_deref() == Some(invoice_id))
            .cloned()
    }

    fn customers(&self, tenant_id: TenantId) -> Vec<CustomerRecord> {
        match self.inner.read() {
            Ok(map) => map
                .get(&tenant_id)
                .map(|t| t.customers.clone())
                .unwrap_or_default(),
            Err(_) => vec![],
        }
    }

    fn products(&self, tenant_id: TenantId) -> Vec<ProductRecord> {
        match self.inner.read() {
            Ok(map) => map
                .get(&tenant_id)
                .map(|t| t.products.clone())
                .unwrap_or_default(),
            Err(_) => vec![],
        }
    }
}
