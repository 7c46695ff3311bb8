//! Grants and the per-role permission table
//!
//! Each role owns a flat, self-contained list of [`Permission`] grants. The
//! table never expands grants along the role hierarchy: what a role can do is
//! exactly what its own entry says.

use crate::condition::PermissionCondition;
use crate::error::PolicyError;
use crate::taxonomy::{Action, PermissionKey, Resource, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Grant of a set of actions on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Resource the grant covers
    pub resource: Resource,
    /// Allowed actions
    pub actions: BTreeSet<Action>,
    /// Qualifiers; all must pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<PermissionCondition>,
}

impl Permission {
    /// Unconditional grant
    #[must_use]
    pub fn new(resource: Resource, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            resource,
            actions: actions.into_iter().collect(),
            conditions: Vec::new(),
        }
    }

    /// Grant of every action
    #[must_use]
    pub fn full(resource: Resource) -> Self {
        Self::new(resource, Action::ALL)
    }

    /// Add a condition
    #[inline]
    #[must_use]
    pub fn with_condition(mut self, condition: PermissionCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Action is listed, conditions not considered
    #[inline]
    #[must_use]
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Grant carries at least one condition
    #[inline]
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// Role → ordered grants
///
/// # Invariants
/// - Every [`Role`] has an entry, possibly empty
/// - At most one grant per (role, resource)
/// - No grant has an empty action set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    grants: BTreeMap<Role, Vec<Permission>>,
}

impl PermissionTable {
    /// Build and validate a table
    ///
    /// # Errors
    /// - [`PolicyError::MissingRole`] when a role has no entry
    /// - [`PolicyError::DuplicateGrant`] when a resource appears twice for a role
    /// - [`PolicyError::EmptyGrant`] when a grant lists no actions
    pub fn new(
        entries: impl IntoIterator<Item = (Role, Vec<Permission>)>,
    ) -> Result<Self, PolicyError> {
        let mut grants: BTreeMap<Role, Vec<Permission>> = BTreeMap::new();
        for (role, permissions) in entries {
            grants.entry(role).or_default().extend(permissions);
        }

        for role in Role::ALL {
            let permissions = grants.get(&role).ok_or(PolicyError::MissingRole(role))?;

            let mut seen = HashSet::new();
            for permission in permissions {
                if !seen.insert(permission.resource) {
                    return Err(PolicyError::DuplicateGrant {
                        role,
                        resource: permission.resource,
                    });
                }
                if permission.actions.is_empty() {
                    return Err(PolicyError::EmptyGrant {
                        role,
                        resource: permission.resource,
                    });
                }
            }
        }

        Ok(Self { grants })
    }

    /// Complete, ordered grants for a role
    #[must_use]
    pub fn grants_for(&self, role: Role) -> &[Permission] {
        self.grants.get(&role).map_or(&[], Vec::as_slice)
    }

    /// First grant naming `resource`
    #[must_use]
    pub fn grant(&self, role: Role, resource: Resource) -> Option<&Permission> {
        self.grants_for(role)
            .iter()
            .find(|permission| permission.resource == resource)
    }

    /// Some role holds `key.action` on `key.resource`, conditions aside
    #[must_use]
    pub fn is_granted_anywhere(&self, key: PermissionKey) -> bool {
        self.grants.keys().any(|role| {
            self.grant(*role, key.resource)
                .is_some_and(|permission| permission.allows(key.action))
        })
    }

    /// Total number of grants across roles
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.values().map(Vec::len).sum()
    }

    /// No role holds any grant
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate roles with their grants
    pub fn iter(&self) -> impl Iterator<Item = (Role, &[Permission])> {
        self.grants
            .iter()
            .map(|(role, permissions)| (*role, permissions.as_slice()))
    }
}
