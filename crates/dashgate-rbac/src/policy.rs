//! Validated, immutable policy
//!
//! A [`Policy`] bundles the permission table, the role hierarchy and the
//! navigation table. Construction runs every cross-table check; once built, a
//! policy is never mutated and can be shared freely between threads.

use crate::builtin;
use crate::config::PolicyConfig;
use crate::error::{PolicyError, RbacResult};
use crate::hierarchy::RoleHierarchy;
use crate::navigation::{NavigationPolicy, UnknownRoutePolicy};
use crate::permission::PermissionTable;
use std::path::Path;

/// Permission table, role hierarchy and navigation policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    table: PermissionTable,
    hierarchy: RoleHierarchy,
    navigation: NavigationPolicy,
}

impl Policy {
    /// Combine already-validated tables and run cross-table checks
    ///
    /// # Errors
    /// [`PolicyError::OrphanedRoutePermission`] when a route requires an
    /// action on a resource that no role's grant lists. Conditions are not
    /// considered, so a route may still be closed for a given context.
    pub fn new(
        table: PermissionTable,
        hierarchy: RoleHierarchy,
        navigation: NavigationPolicy,
    ) -> Result<Self, PolicyError> {
        for entry in navigation.iter() {
            if let Some(required) = entry.required_permission {
                if !table.is_granted_anywhere(required) {
                    return Err(PolicyError::OrphanedRoutePermission {
                        path: entry.path.clone(),
                        permission: required,
                    });
                }
            }
        }

        tracing::info!(
            grants = table.len(),
            routes = navigation.len(),
            "permission policy built"
        );

        Ok(Self {
            table,
            hierarchy,
            navigation,
        })
    }

    /// The built-in dashboard policy
    ///
    /// # Errors
    /// Only if the built-in tables are malformed.
    pub fn builtin() -> Result<Self, PolicyError> {
        Self::new(
            PermissionTable::new(builtin::grants())?,
            RoleHierarchy::new(builtin::hierarchy())?,
            NavigationPolicy::new(builtin::navigation(), UnknownRoutePolicy::Deny)?,
        )
    }

    /// Validate and freeze a config document
    ///
    /// # Errors
    /// Any [`PolicyError`] raised by the table constructors or cross checks.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        Self::new(
            PermissionTable::new(config.grant_entries())?,
            RoleHierarchy::new(config.hierarchy_entries())?,
            NavigationPolicy::new(config.navigation.clone(), config.unknown_route)?,
        )
    }

    /// Load, validate and freeze a policy file
    ///
    /// # Errors
    /// File, format and validation errors.
    pub fn load(path: impl AsRef<Path>) -> RbacResult<Self> {
        let config = PolicyConfig::from_path(path)?;
        Ok(Self::from_config(&config)?)
    }

    /// Permission table
    #[inline]
    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Role hierarchy
    #[inline]
    #[must_use]
    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Navigation policy
    #[inline]
    #[must_use]
    pub fn navigation(&self) -> &NavigationPolicy {
        &self.navigation
    }
}
