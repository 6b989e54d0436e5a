//! Application-side authorization helpers.
//!
//! Resolves request contexts (or verified token claims) into principals and
//! runs gate checks before any data is touched.

use chrono::{DateTime, Utc};

use billdesk_auth::{
    Action, AuthzError, Gate, JwtClaims, Principal, RolePermissions, TokenValidationError,
    validate_claims,
};
use billdesk_core::Entity;

use crate::context::{PrincipalContext, TenantContext};

/// Turn verified claims into a principal, rejecting tokens outside their window.
pub fn principal_from_claims(
    claims: &JwtClaims,
    now: DateTime<Utc>,
    table: &RolePermissions,
) -> Result<Principal, TokenValidationError> {
    validate_claims(claims, now)?;
    Ok(claims.to_principal(table))
}

/// Check `action` on `entity` for the current request context.
///
/// Intended to be called **before** acting on the entity.
pub fn authorize_entity(
    gate: &Gate,
    tenant: &TenantContext,
    principal: &PrincipalContext,
    table: &RolePermissions,
    action: Action,
    entity: &dyn Entity,
) -> Result<(), AuthzError> {
    let principal = principal.resolve(tenant, table);
    gate.authorize(&principal, action, entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use billdesk_auth::{PolicyRegistry, PrincipalId, Role};
    use billdesk_core::{CategoryRecord, TenantId};

    fn gate() -> Gate {
        let mut gate = Gate::default();
        PolicyRegistry::boot(&mut gate).unwrap();
        gate
    }

    #[test]
    fn manager_may_edit_categories_viewer_may_not() {
        let gate = gate();
        let table = RolePermissions::default();
        let tenant = TenantContext::new(TenantId::new());
        let category = CategoryRecord::default();

        let manager = PrincipalContext::new(PrincipalId::new(), vec![Role::new("manager")]);
        let viewer = PrincipalContext::new(PrincipalId::new(), vec![Role::new("viewer")]);

        assert_eq!(
            authorize_entity(&gate, &tenant, &manager, &table, Action::Update, &category),
            Ok(())
        );
        assert_eq!(
            authorize_entity(&gate, &tenant, &viewer, &table, Action::View, &category),
            Ok(())
        );
        assert!(authorize_entity(&gate, &tenant, &viewer, &table, Action::Update, &category).is_err());
    }

    #[test]
    fn expired_claims_yield_no_principal() {
        let issued = Utc::now() - Duration::hours(2);
        let claims = JwtClaims {
            sub: PrincipalId::new(),
            tenant_id: TenantId::new(),
            roles: vec![Role::new("admin")],
            issued_at: issued,
            expires_at: issued + Duration::hours(1),
        };

        assert_eq!(
            principal_from_claims(&claims, Utc::now(), &RolePermissions::default()),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn valid_claims_resolve_to_member_principal() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: PrincipalId::new(),
            tenant_id: TenantId::new(),
            roles: vec![Role::new("viewer")],
            issued_at: now,
            expires_at: now + Duration::minutes(5),
        };

        let principal = principal_from_claims(&claims, now, &RolePermissions::default()).unwrap();
        assert_eq!(principal.principal_id, claims.sub);
        assert_eq!(principal.membership.tenant_id, claims.tenant_id);
    }
}
