//! Invoice edit use case: fetch, authorize, bundle.

use thiserror::Error;

use billdesk_auth::{Action, AuthzError, Gate, Principal};

use crate::{EditBundle, EditSource};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("invoice '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthzError),
}

/// Loads [`EditBundle`]s for a principal.
///
/// The principal must be allowed to `update` the invoice. Customers and
/// products are the ones the principal may `view`, in source order.
pub struct InvoiceEditor<S> {
    source: S,
}

impl<S: EditSource> InvoiceEditor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn load(
        &self,
        gate: &Gate,
        principal: &Principal,
        invoice_id: &str,
    ) -> Result<EditBundle, EditError> {
        let tenant_id = principal.active_tenant_id;

        let invoice = self
            .source
            .invoice(tenant_id, invoice_id)
            .ok_or_else(|| EditError::NotFound(invoice_id.to_string()))?;

        gate.authorize(principal, Action::Update, &invoice)?;

        let customers: Vec<_> = self
            .source
            .customers(tenant_id)
            .into_iter()
            .filter(|c| gate.allows(principal, Action::View, c))
            .collect();
        let products: Vec<_> = self
            .source
            .products(tenant_id)
            .into_iter()
            .filter(|p| gate.allows(principal, Action::View, p))
            .collect();

        tracing::debug!(
            %tenant_id,
            invoice_id,
            customers = customers.len(),
            products = products.len(),
            "invoice edit bundle loaded"
        );

        Ok(EditBundle::new(invoice, customers, products))
    }
}
