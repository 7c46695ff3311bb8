//! Dashgate RBAC
//!
//! Role-based permission model for the business-admin dashboard.
//!
//! # Overview
//!
//! - **Taxonomy**: closed sets of [`Role`], [`Resource`] and [`Action`]
//! - **PermissionTable**: flat, per-role grants with optional conditions
//! - **RoleHierarchy**: seniority relation, independent of grants
//! - **PermissionEvaluator**: pure `bool` queries over a frozen [`Policy`]
//! - **NavigationPolicy**: per-route role lists plus resource requirements
//!
//! UI gating code asks the evaluator and renders a fallback on `false`.
//! Malformed tables are rejected when the [`Policy`] is built, never at query
//! time.
//!
//! # Example
//!
//! ```rust
//! use dashgate_rbac::{Action, EvaluationContext, PermissionEvaluator, Resource, Role};
//!
//! let evaluator = PermissionEvaluator::builtin();
//!
//! assert!(evaluator.has_permission(Role::Manager, Resource::Finance, Action::Export, None));
//! assert!(!evaluator.has_permission(Role::Intern, Resource::Clients, Action::Create, None));
//!
//! let ctx = EvaluationContext::new().with_department("Sales");
//! assert!(evaluator.is_route_allowed(Role::TeamLead, "/employees", Some(&ctx)));
//! assert!(!evaluator.is_route_allowed(Role::Viewer, "/employees", None));
//! ```

#![warn(missing_docs)]

pub mod builtin;
pub mod condition;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod hierarchy;
pub mod navigation;
pub mod permission;
pub mod policy;
pub mod taxonomy;

// Re-exports
pub use builtin::builtin_policy;
pub use condition::{evaluate_conditions, ConditionKind, EvaluationContext, PermissionCondition};
pub use config::{ConditionConfig, ConfigFormat, GrantConfig, PolicyConfig};
pub use error::{ConfigError, ParseError, PolicyError, RbacError, RbacResult};
pub use evaluator::{MatrixCell, MatrixRow, PermissionEvaluator, PermissionMatrix};
pub use hierarchy::RoleHierarchy;
pub use navigation::{NavPermission, NavigationPolicy, UnknownRoutePolicy};
pub use permission::{Permission, PermissionTable};
pub use policy::Policy;
pub use taxonomy::{Action, PermissionKey, Resource, Role};

use std::collections::BTreeSet;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for gating code
    pub use crate::{
        Action, EvaluationContext, PermissionEvaluator, PermissionKey, Policy, Resource, Role,
    };
}

/// [`PermissionEvaluator::has_permission`] against the built-in policy
#[must_use]
pub fn has_permission(
    role: Role,
    resource: Resource,
    action: Action,
    context: Option<&EvaluationContext>,
) -> bool {
    PermissionEvaluator::builtin().has_permission(role, resource, action, context)
}

/// [`PermissionEvaluator::can_access_resource`] against the built-in policy
#[must_use]
pub fn can_access_resource(role: Role, resource: Resource) -> bool {
    PermissionEvaluator::builtin().can_access_resource(role, resource)
}

/// [`PermissionEvaluator::allowed_actions`] against the built-in policy
#[must_use]
pub fn allowed_actions(role: Role, resource: Resource) -> BTreeSet<Action> {
    PermissionEvaluator::builtin().allowed_actions(role, resource)
}

/// [`PermissionEvaluator::dominates`] against the built-in policy
#[must_use]
pub fn dominates(senior: Role, junior: Role) -> bool {
    PermissionEvaluator::builtin().dominates(senior, junior)
}

/// [`PermissionEvaluator::is_route_allowed`] against the built-in policy
#[must_use]
pub fn is_route_allowed(role: Role, path: &str, context: Option<&EvaluationContext>) -> bool {
    PermissionEvaluator::builtin().is_route_allowed(role, path, context)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
