//! In-process authorization gate.
//!
//! The gate owns the policy implementations and, once booted, the entity →
//! policy mapping. Resolution: look up the entity's kind in the mapping, then
//! hand the query to that policy's `decide`. Anything the mapping does not
//! cover is denied.
//!
//! After registration the gate is never mutated, so an `Arc<Gate>` can be read
//! from any number of threads without locking.

use std::collections::HashMap;

use billdesk_core::{Entity, EntityKind};

use crate::{
    Action, AuthzError, CategoryPolicy, CustomerPolicy, Decision, DenialKind, GateError, InvoicePolicy,
    Policy, PolicyGate, PolicyKind, PolicyMap, Principal, ProductPolicy,
};

pub struct Gate {
    policies: HashMap<PolicyKind, Box<dyn Policy>>,
    map: Option<PolicyMap>,
}

impl Gate {
    /// A gate with no policy implementations and no mapping.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
            map: None,
        }
    }

    /// A gate carrying the four shipped policies (not yet booted).
    pub fn with_default_policies() -> Self {
        Self::new()
            .with_policy(ProductPolicy)
            .with_policy(CategoryPolicy)
            .with_policy(CustomerPolicy)
            .with_policy(InvoicePolicy)
    }

    /// Install (or replace) the implementation for `policy.kind()`.
    pub fn with_policy<P: Policy + 'static>(mut self, policy: P) -> Self {
        self.policies.insert(policy.kind(), Box::new(policy));
        self
    }

    pub fn is_registered(&self) -> bool {
        self.map.is_some()
    }

    pub fn policy_map(&self) -> Option<&PolicyMap> {
        self.map.as_ref()
    }

    /// The resolution step on its own: which policy governs `entity`.
    pub fn policy_for(&self, entity: EntityKind) -> Option<PolicyKind> {
        self.map.as_ref()?.get(entity)
    }

    /// Decide whether `principal` may perform `action` on `entity`.
    pub fn inspect(&self, principal: &Principal, action: Action, entity: &dyn Entity) -> Decision {
        let kind = entity.entity_kind();

        if principal.is_cross_tenant() {
            tracing::warn!(
                principal_id = %principal.principal_id,
                active_tenant_id = %principal.active_tenant_id,
                "authorization denied: tenant mismatch"
            );
            return Decision::from(AuthzError::TenantMismatch);
        }

        let Some(map) = self.map.as_ref() else {
            tracing::warn!(entity = %kind, %action, "authorization denied: gate not booted");
            return Decision::denied(DenialKind::NotRegistered, "policy mapping not registered");
        };

        let Some(policy_kind) = map.get(kind) else {
            tracing::warn!(entity = %kind, %action, "authorization denied: no policy for entity");
            return Decision::denied(DenialKind::NoPolicy, format!("no policy registered for {kind}"));
        };

        let Some(policy) = self.policies.get(&policy_kind) else {
            // `register` refuses maps naming unknown policies, so this only
            // trips if the invariant is broken.
            tracing::error!(policy = %policy_kind, "mapped policy has no implementation");
            return Decision::denied(
                DenialKind::NoPolicy,
                GateError::MissingPolicy(policy_kind).to_string(),
            );
        };

        let decision = policy.decide(principal, action, entity);
        let record_id = entity.record().id();
        tracing::debug!(
            principal_id = %principal.principal_id,
            entity = %kind,
            record_id = record_id.as_deref().unwrap_or("-"),
            %action,
            policy = %policy_kind,
            allowed = decision.is_allowed(),
            "authorization decided"
        );
        decision
    }

    /// [`Gate::inspect`] with the action given by name (`"view"`, `"update"`, ...).
    pub fn inspect_named(
        &self,
        principal: &Principal,
        action: &str,
        entity: &dyn Entity,
    ) -> Result<Decision, GateError> {
        let action: Action = action.parse()?;
        Ok(self.inspect(principal, action, entity))
    }

    pub fn allows(&self, principal: &Principal, action: Action, entity: &dyn Entity) -> bool {
        self.inspect(principal, action, entity).is_allowed()
    }

    pub fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        entity: &dyn Entity,
    ) -> Result<(), AuthzError> {
        self.inspect(principal, action, entity).into_result()
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::with_default_policies()
    }
}

impl core::fmt::Debug for Gate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut kinds: Vec<PolicyKind> = self.policies.keys().copied().collect();
        kinds.sort();
        f.debug_struct("Gate")
            .field("policies", &kinds)
            .field("map", &self.map)
            .finish()
    }
}

impl PolicyGate for Gate {
    fn register(&mut self, map: PolicyMap) -> Result<(), GateError> {
        if self.map.is_some() {
            return Err(GateError::AlreadyRegistered);
        }
        if let Some((_, missing)) = map
            .entries()
            .iter()
            .find(|(_, policy)| !self.policies.contains_key(policy))
        {
            return Err(GateError::MissingPolicy(*missing));
        }
        self.map = Some(map);
        Ok(())
    }
}
