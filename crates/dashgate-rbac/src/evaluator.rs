//! Permission evaluator
//!
//! Pure query surface over an immutable [`Policy`]. Every check answers with a
//! `bool` or a possibly-empty collection; "not permitted" is never an error.
//!
//! # Lookup
//!
//! ```text
//! has_permission(role, resource, action, ctx)
//!   └─ grants_for(role) ── first grant on resource? ── no ──▶ false
//!                               │ yes
//!                          action listed? ── no ──▶ false
//!                               │ yes
//!                          conditions all pass(ctx)
//! ```
//!
//! The role hierarchy is consulted only by the seniority helpers
//! ([`PermissionEvaluator::dominates`] and friends); grants are never merged
//! along it.

use crate::builtin::builtin_policy;
use crate::condition::{evaluate_conditions, EvaluationContext};
use crate::navigation::NavPermission;
use crate::policy::Policy;
use crate::taxonomy::{Action, PermissionKey, Resource, Role};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Answers permission and route questions for a policy
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    policy: Arc<Policy>,
}

impl PermissionEvaluator {
    /// Evaluator over `policy`
    #[inline]
    #[must_use]
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }

    /// Evaluator over the shared built-in policy
    #[inline]
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_policy())
    }

    /// Underlying policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Can `role` perform `action` on `resource` given `context`
    ///
    /// Ownership conditions always pass here, even without a context. Callers
    /// must restrict record sets to the acting user's own records themselves.
    #[must_use]
    pub fn has_permission(
        &self,
        role: Role,
        resource: Resource,
        action: Action,
        context: Option<&EvaluationContext>,
    ) -> bool {
        let granted = match self.policy.table().grant(role, resource) {
            None => false,
            Some(permission) if !permission.allows(action) => false,
            Some(permission) => evaluate_conditions(&permission.conditions, context),
        };

        tracing::debug!(
            role = %role,
            resource = %resource,
            action = %action,
            granted,
            "permission evaluated"
        );
        granted
    }

    /// [`Self::has_permission`] for a `resource:action` key
    #[inline]
    #[must_use]
    pub fn check(
        &self,
        role: Role,
        key: PermissionKey,
        context: Option<&EvaluationContext>,
    ) -> bool {
        self.has_permission(role, key.resource, key.action, context)
    }

    /// At least one key passes; `false` for an empty list
    #[must_use]
    pub fn has_any_permission(
        &self,
        role: Role,
        keys: &[PermissionKey],
        context: Option<&EvaluationContext>,
    ) -> bool {
        keys.iter().any(|key| self.check(role, *key, context))
    }

    /// Every key passes; `true` for an empty list
    #[must_use]
    pub fn has_all_permissions(
        &self,
        role: Role,
        keys: &[PermissionKey],
        context: Option<&EvaluationContext>,
    ) -> bool {
        keys.iter().all(|key| self.check(role, *key, context))
    }

    /// Some grant for `role` names `resource`, whatever the action
    #[inline]
    #[must_use]
    pub fn can_access_resource(&self, role: Role, resource: Resource) -> bool {
        self.policy.table().grant(role, resource).is_some()
    }

    /// Actions of the matching grant, empty if none
    ///
    /// Conditions are not evaluated here.
    #[must_use]
    pub fn allowed_actions(&self, role: Role, resource: Resource) -> BTreeSet<Action> {
        self.policy
            .table()
            .grant(role, resource)
            .map(|permission| permission.actions.clone())
            .unwrap_or_default()
    }

    /// Resources `role` holds any grant on, in table order
    #[must_use]
    pub fn accessible_resources(&self, role: Role) -> Vec<Resource> {
        self.policy
            .table()
            .grants_for(role)
            .iter()
            .map(|permission| permission.resource)
            .collect()
    }

    /// `senior` strictly outranks `junior`
    #[inline]
    #[must_use]
    pub fn dominates(&self, senior: Role, junior: Role) -> bool {
        self.policy.hierarchy().dominates(senior, junior)
    }

    /// `role` is `minimum` or outranks it
    #[inline]
    #[must_use]
    pub fn is_at_least(&self, role: Role, minimum: Role) -> bool {
        self.policy.hierarchy().is_at_least(role, minimum)
    }

    /// Roles `role` may manage, most senior first
    #[inline]
    #[must_use]
    pub fn manageable_roles(&self, role: Role) -> Vec<Role> {
        self.policy.hierarchy().dominated_by(role)
    }

    /// Can `role` open `path`
    ///
    /// Unlisted paths follow the policy's unknown-route default and are
    /// logged as a configuration gap.
    #[must_use]
    pub fn is_route_allowed(
        &self,
        role: Role,
        path: &str,
        context: Option<&EvaluationContext>,
    ) -> bool {
        match self.policy.navigation().route(path) {
            Some(entry) => self.route_admits(entry, role, context),
            None => {
                let fallback = self.policy.navigation().unknown_route();
                tracing::warn!(
                    path,
                    role = %role,
                    ?fallback,
                    "no navigation entry for route"
                );
                fallback.is_allowed()
            }
        }
    }

    /// Routes `role` may open, in menu order
    #[must_use]
    pub fn allowed_routes(
        &self,
        role: Role,
        context: Option<&EvaluationContext>,
    ) -> Vec<&NavPermission> {
        self.policy
            .navigation()
            .iter()
            .filter(|entry| self.route_admits(entry, role, context))
            .collect()
    }

    /// Allowed actions for every (role, resource) pair
    #[must_use]
    pub fn matrix(&self) -> PermissionMatrix {
        let rows = Role::ALL
            .into_iter()
            .map(|role| MatrixRow {
                role,
                cells: Resource::ALL
                    .into_iter()
                    .map(|resource| MatrixCell {
                        resource,
                        actions: self.allowed_actions(role, resource),
                    })
                    .collect(),
            })
            .collect();
        PermissionMatrix { rows }
    }

    fn route_admits(
        &self,
        entry: &NavPermission,
        role: Role,
        context: Option<&EvaluationContext>,
    ) -> bool {
        entry.admits(role)
            && entry
                .required_permission
                .map_or(true, |key| self.check(role, key, context))
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Role × resource table of allowed actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
    /// One row per role, most privileged first
    pub rows: Vec<MatrixRow>,
}

/// Allowed actions of one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    /// Role
    pub role: Role,
    /// One cell per resource
    pub cells: Vec<MatrixCell>,
}

/// Allowed actions of one role on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    /// Resource
    pub resource: Resource,
    /// Allowed actions, possibly empty
    pub actions: BTreeSet<Action>,
}

impl PermissionMatrix {
    /// Row for `role`
    #[must_use]
    pub fn row(&self, role: Role) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.role == role)
    }
}
