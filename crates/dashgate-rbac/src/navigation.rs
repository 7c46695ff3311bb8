//! Route-level policy
//!
//! Static table of dashboard routes, each with the roles allowed to open it
//! and an optional resource permission that must also hold. Paths match
//! exactly; declaration order is preserved for menu rendering.

use crate::error::PolicyError;
use crate::taxonomy::{PermissionKey, Role};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Policy entry for one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPermission {
    /// Route path, e.g. `/employees`
    pub path: String,
    /// Roles allowed to open the route
    pub roles: Vec<Role>,
    /// Resource permission checked in addition to the role list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<PermissionKey>,
}

impl NavPermission {
    /// Route open to `roles` with no resource requirement
    #[must_use]
    pub fn new(path: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            path: path.into(),
            roles: roles.into_iter().collect(),
            required_permission: None,
        }
    }

    /// Require a resource permission as well
    #[inline]
    #[must_use]
    pub fn requiring(mut self, key: PermissionKey) -> Self {
        self.required_permission = Some(key);
        self
    }

    /// `role` is in the allowed list
    #[inline]
    #[must_use]
    pub fn admits(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Decision for paths with no navigation entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRoutePolicy {
    /// Refuse and report a configuration gap
    #[default]
    Deny,
    /// Let the route through
    Allow,
}

impl UnknownRoutePolicy {
    /// Boolean outcome for an unknown route
    #[inline]
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Path → navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    routes: IndexMap<String, NavPermission>,
    unknown_route: UnknownRoutePolicy,
}

impl NavigationPolicy {
    /// Build and validate route entries
    ///
    /// # Errors
    /// - [`PolicyError::InvalidRoute`] for paths not starting with `/`
    /// - [`PolicyError::DuplicateRoute`] for repeated paths
    pub fn new(
        entries: impl IntoIterator<Item = NavPermission>,
        unknown_route: UnknownRoutePolicy,
    ) -> Result<Self, PolicyError> {
        let mut routes = IndexMap::new();
        for entry in entries {
            if !entry.path.starts_with('/') {
                return Err(PolicyError::InvalidRoute(entry.path));
            }
            if routes.contains_key(&entry.path) {
                return Err(PolicyError::DuplicateRoute(entry.path));
            }
            if entry.roles.is_empty() {
                tracing::warn!(path = %entry.path, "navigation entry admits no roles");
            }
            routes.insert(entry.path.clone(), entry);
        }
        Ok(Self {
            routes,
            unknown_route,
        })
    }

    /// Exact-match lookup
    #[inline]
    #[must_use]
    pub fn route(&self, path: &str) -> Option<&NavPermission> {
        self.routes.get(path)
    }

    /// Default decision for unlisted paths
    #[inline]
    #[must_use]
    pub fn unknown_route(&self) -> UnknownRoutePolicy {
        self.unknown_route
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &NavPermission> {
        self.routes.values()
    }

    /// Number of routes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// No routes declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
