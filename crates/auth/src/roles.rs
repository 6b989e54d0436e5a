use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier used for RBAC.
///
/// Roles are intentionally opaque strings at this layer; [`RolePermissions`]
/// maps them to permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role → permission table.
///
/// The default table covers the four protected resources (`products`,
/// `categories`, `customers`, `invoices`); deployments can build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissions {
    grants: HashMap<Role, Vec<Permission>>,
}

impl RolePermissions {
    /// An empty table (every role grants nothing).
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Add permissions to a role (appends to any existing grants).
    pub fn grant<I, P>(mut self, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.grants
            .entry(role)
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Permissions granted by a single role (unknown roles grant nothing).
    pub fn for_role(&self, role: &Role) -> &[Permission] {
        self.grants.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of the permissions granted by `roles`, first occurrence order.
    pub fn permissions_for(&self, roles: &[Role]) -> Vec<Permission> {
        let mut out: Vec<Permission> = Vec::new();
        for role in roles {
            for perm in self.for_role(role) {
                if !out.contains(perm) {
                    out.push(perm.clone());
                }
            }
        }
        out
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        const READ_ALL: [&str; 4] = [
            "products.read",
            "categories.read",
            "customers.read",
            "invoices.read",
        ];

        RolePermissions::empty()
            .grant(Role::new("admin"), ["*"])
            .grant(Role::new("manager"), READ_ALL)
            .grant(
                Role::new("manager"),
                [
                    "products.write",
                    "categories.write",
                    "customers.write",
                    "invoices.write",
                ],
            )
            .grant(Role::new("clerk"), READ_ALL)
            .grant(Role::new("clerk"), ["invoices.write"])
            .grant(Role::new("viewer"), READ_ALL)
    }
}
