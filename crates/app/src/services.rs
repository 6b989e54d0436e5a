//! Startup wiring: the booted gate, role table and edit use case.

use std::sync::Arc;

use anyhow::Context;
use serde_json::{Map, Value};

use billdesk_auth::{Gate, PolicyRegistry, RolePermissions};
use billdesk_core::TenantId;
use billdesk_invoicing::{EditError, EditSource, InvoiceEditor};

use crate::config::AppConfig;
use crate::context::{PrincipalContext, TenantContext};

/// Long-lived services, built once at startup and shared read-only.
pub struct AppServices {
    gate: Arc<Gate>,
    roles: RolePermissions,
    editor: InvoiceEditor<Arc<dyn EditSource>>,
    default_tenant: TenantId,
}

impl AppServices {
    /// Boot the gate with the policy mapping and wire the edit use case.
    pub fn boot(config: &AppConfig, source: Arc<dyn EditSource>) -> anyhow::Result<Self> {
        let mut gate = Gate::with_default_policies();
        PolicyRegistry::boot(&mut gate).context("registering policy mapping")?;

        let default_tenant = match config.default_tenant {
            Some(tenant_id) => tenant_id,
            None => {
                let tenant_id = TenantId::new();
                tracing::warn!(%tenant_id, "BILLDESK_TENANT_ID not set; using a fresh dev tenant");
                tenant_id
            }
        };

        Ok(Self {
            gate: Arc::new(gate),
            roles: RolePermissions::default(),
            editor: InvoiceEditor::new(source),
            default_tenant,
        })
    }

    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    pub fn roles(&self) -> &RolePermissions {
        &self.roles
    }

    pub fn default_tenant(&self) -> TenantContext {
        TenantContext::new(self.default_tenant)
    }

    /// The map an invoice-edit view renders from.
    pub fn invoice_edit_view(
        &self,
        tenant: &TenantContext,
        principal: &PrincipalContext,
        invoice_id: &str,
    ) -> Result<Map<String, Value>, EditError> {
        let principal = principal.resolve(tenant, &self.roles);
        let bundle = self.editor.load(&self.gate, &principal, invoice_id)?;
        Ok(bundle.to_map())
    }
}
