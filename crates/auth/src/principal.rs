use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use billdesk_core::TenantId;

use crate::{Permission, Role, RolePermissions};

/// Identity of an authenticated principal (human user, service account, etc).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A principal's membership in a tenant.
///
/// This is an authorization boundary object: it states *which tenant* the
/// principal is acting within and which roles/permissions are granted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMembership {
    pub tenant_id: TenantId,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

impl TenantMembership {
    /// Membership whose permissions are derived from `roles` via `table`.
    pub fn from_roles(tenant_id: TenantId, roles: Vec<Role>, table: &RolePermissions) -> Self {
        let permissions = table.permissions_for(&roles);
        Self {
            tenant_id,
            roles,
            permissions,
        }
    }
}

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from storage and transport: callers derive the
/// membership from claims and a role table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub active_tenant_id: TenantId,
    pub membership: TenantMembership,
}

impl Principal {
    /// A principal acting inside its own membership tenant.
    pub fn member(principal_id: PrincipalId, membership: TenantMembership) -> Self {
        Self {
            principal_id,
            active_tenant_id: membership.tenant_id,
            membership,
        }
    }

    pub fn is_cross_tenant(&self) -> bool {
        self.active_tenant_id != self.membership.tenant_id
    }
}
