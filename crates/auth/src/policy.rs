//! Policies: one unit of authorization logic per protected entity type.
//!
//! A policy answers every [`Action`] through a single `decide` function. The
//! concrete business rules for each resource live outside this crate; the
//! shipped policies defer to the principal's permissions using the
//! `<resource>.read` / `<resource>.write` convention.

use serde::{Deserialize, Serialize};

use billdesk_core::{Entity, EntityKind};

use crate::{authorize, Action, AuthzError, Permission, Principal};

/// Identifier of a policy type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyKind {
    ProductPolicy,
    CategoryPolicy,
    CustomerPolicy,
    InvoicePolicy,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::ProductPolicy => "ProductPolicy",
            PolicyKind::CategoryPolicy => "CategoryPolicy",
            PolicyKind::CustomerPolicy => "CustomerPolicy",
            PolicyKind::InvoicePolicy => "InvoicePolicy",
        }
    }
}

impl core::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The principal is acting outside its membership tenant.
    TenantMismatch,
    /// The principal lacks the named permission.
    MissingPermission(Permission),
    /// The gate has not been handed a policy mapping yet.
    NotRegistered,
    /// No policy governs the entity's kind.
    NoPolicy,
    /// A policy refused for a reason of its own.
    Refused,
}

/// Outcome of an authorization query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny { kind: DenialKind, reason: String },
}

impl Decision {
    /// Policy-specific denial.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::denied(DenialKind::Refused, reason)
    }

    pub fn denied(kind: DenialKind, reason: impl Into<String>) -> Self {
        Decision::Deny {
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn denial_kind(&self) -> Option<&DenialKind> {
        match self {
            Decision::Allow => None,
            Decision::Deny { kind, .. } => Some(kind),
        }
    }

    pub fn into_result(self) -> Result<(), AuthzError> {
        let (kind, reason) = match self {
            Decision::Allow => return Ok(()),
            Decision::Deny { kind, reason } => (kind, reason),
        };
        Err(match kind {
            DenialKind::TenantMismatch => AuthzError::TenantMismatch,
            DenialKind::MissingPermission(p) => AuthzError::Forbidden(p.as_str().to_string()),
            DenialKind::NotRegistered | DenialKind::NoPolicy => AuthzError::Unresolved(reason),
            DenialKind::Refused => AuthzError::Denied(reason),
        })
    }
}

impl From<AuthzError> for Decision {
    fn from(err: AuthzError) -> Self {
        let reason = err.to_string();
        match err {
            AuthzError::TenantMismatch => Decision::denied(DenialKind::TenantMismatch, reason),
            AuthzError::Forbidden(p) => {
                Decision::denied(DenialKind::MissingPermission(Permission::new(p)), reason)
            }
            AuthzError::Unresolved(r) => Decision::denied(DenialKind::NoPolicy, r),
            AuthzError::Denied(r) => Decision::deny(r),
        }
    }
}

/// Authorization logic for one entity type.
pub trait Policy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Decide whether `principal` may perform `action` on `entity`.
    fn decide(&self, principal: &Principal, action: Action, entity: &dyn Entity) -> Decision;
}

fn decide_by_permission(
    policy: PolicyKind,
    governs: EntityKind,
    resource: &str,
    principal: &Principal,
    action: Action,
    entity: &dyn Entity,
) -> Decision {
    if entity.entity_kind() != governs {
        return Decision::deny(format!(
            "{policy} governs {governs}, not {}",
            entity.entity_kind()
        ));
    }

    let required = Permission::for_resource(resource, action.access());
    match authorize(principal, &required) {
        Ok(()) => Decision::Allow,
        Err(e) => Decision::from(e),
    }
}

macro_rules! permission_policy {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $governs:expr, $resource:literal) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// Resource prefix used for this policy's permissions.
            pub const RESOURCE: &'static str = $resource;
        }

        impl Policy for $name {
            fn kind(&self) -> PolicyKind {
                $kind
            }

            fn decide(&self, principal: &Principal, action: Action, entity: &dyn Entity) -> Decision {
                decide_by_permission($kind, $governs, Self::RESOURCE, principal, action, entity)
            }
        }
    };
}

permission_policy!(
    /// Governs products (`products.*`).
    ProductPolicy,
    PolicyKind::ProductPolicy,
    EntityKind::Product,
    "products"
);
permission_policy!(
    /// Governs product categories (`categories.*`).
    CategoryPolicy,
    PolicyKind::CategoryPolicy,
    EntityKind::Category,
    "categories"
);
permission_policy!(
    /// Governs customers (`customers.*`).
    CustomerPolicy,
    PolicyKind::CustomerPolicy,
    EntityKind::Customer,
    "customers"
);
permission_policy!(
    /// Governs invoices (`invoices.*`).
    InvoicePolicy,
    PolicyKind::InvoicePolicy,
    EntityKind::Invoice,
    "invoices"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrincipalId, TenantMembership};
    use billdesk_core::{CustomerRecord, InvoiceRecord, TenantId};

    fn principal_with(perms: &[&'static str]) -> Principal {
        let membership = TenantMembership {
            tenant_id: TenantId::new(),
            roles: Vec::new(),
            permissions: perms.iter().map(|p| Permission::new(*p)).collect(),
        };
        Principal::member(PrincipalId::new(), membership)
    }

    #[test]
    fn read_permission_covers_viewing_only() {
        let p = principal_with(&["invoices.read"]);
        let invoice = InvoiceRecord::default();

        assert_eq!(InvoicePolicy.decide(&p, Action::View, &invoice), Decision::Allow);
        assert_eq!(InvoicePolicy.decide(&p, Action::ViewAny, &invoice), Decision::Allow);
        assert_eq!(
            InvoicePolicy.decide(&p, Action::Update, &invoice),
            Decision::denied(
                DenialKind::MissingPermission(Permission::new("invoices.write")),
                "forbidden: missing permission 'invoices.write'"
            )
        );
    }

    #[test]
    fn write_permission_covers_mutations() {
        let p = principal_with(&["customers.write"]);
        let customer = CustomerRecord::default();

        for action in [Action::Create, Action::Update, Action::Delete, Action::Restore, Action::ForceDelete] {
            assert!(CustomerPolicy.decide(&p, action, &customer).is_allowed(), "{action}");
        }
        assert!(!CustomerPolicy.decide(&p, Action::View, &customer).is_allowed());
    }

    #[test]
    fn policy_refuses_foreign_entities() {
        let p = principal_with(&["*"]);
        let customer = CustomerRecord::default();

        assert_eq!(
            InvoicePolicy.decide(&p, Action::View, &customer),
            Decision::deny("InvoicePolicy governs invoice, not customer")
        );
    }

    #[test]
    fn deny_converts_to_error() {
        let err = Decision::deny("nope").into_result().unwrap_err();
        assert_eq!(err, AuthzError::Denied("nope".to_string()));
        assert_eq!(Decision::Allow.into_result(), Ok(()));
    }

    #[test]
    fn denial_kinds_map_back_to_typed_errors() {
        let missing = Decision::denied(
            DenialKind::MissingPermission(Permission::new("invoices.write")),
            "forbidden: missing permission 'invoices.write'",
        );
        let err = missing.into_result().unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("invoices.write".to_string()));
        assert_eq!(err.to_string(), "forbidden: missing permission 'invoices.write'");

        let cross = Decision::denied(DenialKind::TenantMismatch, "tenant mismatch");
        assert_eq!(cross.into_result(), Err(AuthzError::TenantMismatch));

        let unmapped = Decision::denied(DenialKind::NoPolicy, "no policy registered for product");
        assert_eq!(
            unmapped.into_result(),
            Err(AuthzError::Unresolved("no policy registered for product".to_string()))
        );
    }

    #[test]
    fn authz_errors_round_trip_through_decision() {
        for err in [
            AuthzError::TenantMismatch,
            AuthzError::Forbidden("customers.read".to_string()),
            AuthzError::Unresolved("policy mapping not registered".to_string()),
            AuthzError::Denied("closed period".to_string()),
        ] {
            assert_eq!(Decision::from(err.clone()).into_result(), Err(err));
        }
    }

    #[test]
    fn decision_serializes_with_tag() {
        let json = serde_json::to_value(Decision::deny("x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"decision": "deny", "kind": "refused", "reason": "x"})
        );

        let json = serde_json::to_value(Decision::from(AuthzError::Forbidden("invoices.read".to_string()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "decision": "deny",
                "kind": {"missing_permission": "invoices.read"},
                "reason": "forbidden: missing permission 'invoices.read'",
            })
        );
    }

    #[test]
    fn kinds_match_names() {
        assert_eq!(ProductPolicy.kind(), PolicyKind::ProductPolicy);
        assert_eq!(CategoryPolicy.kind().to_string(), "CategoryPolicy");
        assert_eq!(CustomerPolicy::RESOURCE, "customers");
    }
}
