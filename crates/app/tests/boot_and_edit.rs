use std::sync::Arc;

use billdesk_app::authz::authorize_entity;
use billdesk_app::context::{PrincipalContext, TenantContext};
use billdesk_app::{AppConfig, AppServices};
use billdesk_auth::{Action, AuthzError, PolicyKind, PrincipalId, Role};
use billdesk_core::{CustomerRecord, EntityKind, InvoiceRecord, ProductRecord, TenantId};
use billdesk_invoicing::{EditError, InMemoryEditSource};
use serde_json::{json, Value};

struct Harness {
    services: AppServices,
    tenant: TenantContext,
}

impl Harness {
    fn boot() -> Self {
        let tenant_id = TenantId::new();
        let source = Arc::new(InMemoryEditSource::new());
        source.upsert_invoice(tenant_id, InvoiceRecord::from_value(json!({"id": 1, "total": 100})).unwrap());
        source.push_customer(tenant_id, CustomerRecord::from_value(json!({"id": 1, "name": "A"})).unwrap());
        source.push_product(tenant_id, ProductRecord::from_value(json!({"id": 9, "sku": "X"})).unwrap());

        let config = AppConfig {
            default_tenant: Some(tenant_id),
            ..AppConfig::default()
        };
        let services = AppServices::boot(&config, source).expect("boot failed");

        Self {
            services,
            tenant: TenantContext::new(tenant_id),
        }
    }

    fn as_role(role: &'static str) -> PrincipalContext {
        PrincipalContext::new(PrincipalId::new(), vec![Role::new(role)])
    }
}

#[test]
fn boot_registers_all_four_policies() {
    let h = Harness::boot();
    let gate = h.services.gate();

    assert!(gate.is_registered());
    assert_eq!(gate.policy_for(EntityKind::Product), Some(PolicyKind::ProductPolicy));
    assert_eq!(gate.policy_for(EntityKind::Category), Some(PolicyKind::CategoryPolicy));
    assert_eq!(gate.policy_for(EntityKind::Customer), Some(PolicyKind::CustomerPolicy));
    assert_eq!(gate.policy_for(EntityKind::Invoice), Some(PolicyKind::InvoicePolicy));
    assert_eq!(h.services.default_tenant(), h.tenant);
}

#[test]
fn clerk_renders_edit_view() {
    let h = Harness::boot();
    let view = h
        .services
        .invoice_edit_view(&h.tenant, &Harness::as_role("clerk"), "1")
        .unwrap();

    assert_eq!(
        Value::Object(view),
        json!({
            "invoice": {"id": 1, "total": 100},
            "customers": [{"id": 1, "name": "A"}],
            "products": [{"id": 9, "sku": "X"}],
        })
    );
}

#[test]
fn viewer_is_refused_edit_view() {
    let h = Harness::boot();
    let err = h
        .services
        .invoice_edit_view(&h.tenant, &Harness::as_role("viewer"), "1")
        .unwrap_err();

    assert_eq!(
        err,
        EditError::Unauthorized(AuthzError::Forbidden("invoices.write".to_string()))
    );
    assert_eq!(err.to_string(), "forbidden: missing permission 'invoices.write'");
}

#[test]
fn other_tenant_sees_nothing() {
    let h = Harness::boot();
    let elsewhere = TenantContext::new(TenantId::new());
    let err = h
        .services
        .invoice_edit_view(&elsewhere, &Harness::as_role("admin"), "1")
        .unwrap_err();

    assert_eq!(err, EditError::NotFound("1".to_string()));
}

#[test]
fn unknown_roles_are_denied_everywhere() {
    let h = Harness::boot();
    let nobody = Harness::as_role("intern");
    let invoice = InvoiceRecord::default();

    for action in [Action::View, Action::Update, Action::Delete] {
        assert!(authorize_entity(
            h.services.gate(),
            &h.tenant,
            &nobody,
            h.services.roles(),
            action,
            &invoice,
        )
        .is_err());
    }
}

#[test]
fn gate_is_shared_across_request_threads() {
    let h = Harness::boot();
    let gate = h.services.gate().clone();
    let tenant = h.tenant;

    let handles: Vec<_> = ["admin", "manager", "clerk", "viewer"]
        .into_iter()
        .map(|role| {
            let gate = gate.clone();
            let roles = h.services.roles().clone();
            std::thread::spawn(move || {
                let ctx = Harness::as_role(role);
                authorize_entity(&gate, &tenant, &ctx, &roles, Action::View, &ProductRecord::default())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(()));
    }
}
