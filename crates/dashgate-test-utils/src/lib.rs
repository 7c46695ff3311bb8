//! Testing utilities for the dashgate workspace
//!
//! Shared fixtures, small hand-built policies, and proptest strategies.

#![allow(missing_docs)]

use dashgate_rbac::{
    Action, EvaluationContext, NavPermission, NavigationPolicy, Permission, PermissionCondition,
    PermissionEvaluator, PermissionKey, PermissionTable, Policy, Resource, Role, RoleHierarchy,
    UnknownRoutePolicy,
};
use proptest::prelude::*;
use std::sync::Arc;

pub fn sales_context() -> EvaluationContext {
    EvaluationContext::new()
        .with_user_id("u-100")
        .with_department("Sales")
}

pub fn sales_east_context() -> EvaluationContext {
    sales_context().with_region("East")
}

pub fn empty_grants() -> Vec<(Role, Vec<Permission>)> {
    Role::ALL.into_iter().map(|role| (role, Vec::new())).collect()
}

/// Managers may approve sales only in the East region of the Sales department
pub fn conjunction_policy() -> Policy {
    let mut grants = empty_grants();
    grants.push((
        Role::Manager,
        vec![Permission::new(Resource::Sales, [Action::Read, Action::Approve])
            .with_condition(PermissionCondition::department(Some("Sales")))
            .with_condition(PermissionCondition::region(Some("East")))],
    ));

    let navigation = vec![NavPermission::new("/sales", [Role::Manager])
        .requiring(PermissionKey::new(Resource::Sales, Action::Approve))];

    build_policy(grants, Vec::new(), navigation, UnknownRoutePolicy::Deny)
}

/// Hierarchy says admin outranks manager, but only manager holds a grant
pub fn hierarchy_without_inheritance_policy() -> Policy {
    let mut grants = empty_grants();
    grants.push((
        Role::Manager,
        vec![Permission::new(Resource::Finance, [Action::Read])],
    ));

    build_policy(
        grants,
        vec![(Role::Admin, vec![Role::Manager])],
        Vec::new(),
        UnknownRoutePolicy::Deny,
    )
}

pub fn build_policy(
    grants: Vec<(Role, Vec<Permission>)>,
    hierarchy: Vec<(Role, Vec<Role>)>,
    navigation: Vec<NavPermission>,
    unknown_route: UnknownRoutePolicy,
) -> Policy {
    Policy::new(
        PermissionTable::new(grants).unwrap(),
        RoleHierarchy::new(hierarchy).unwrap(),
        NavigationPolicy::new(navigation, unknown_route).unwrap(),
    )
    .unwrap()
}

pub fn evaluator_for(policy: Policy) -> PermissionEvaluator {
    PermissionEvaluator::new(Arc::new(policy))
}

pub fn any_role() -> impl Strategy<Value = Role> {
    proptest::sample::select(Role::ALL.to_vec())
}

pub fn any_resource() -> impl Strategy<Value = Resource> {
    proptest::sample::select(Resource::ALL.to_vec())
}

pub fn any_action() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::ALL.to_vec())
}
