//! Gating scenarios against the built-in dashboard policy and small fixtures.

use dashgate_rbac::{
    allowed_actions, can_access_resource, dominates, has_permission, is_route_allowed, Action,
    EvaluationContext, PermissionEvaluator, PermissionKey, Resource, Role,
};
use dashgate_test_utils::{
    conjunction_policy, evaluator_for, hierarchy_without_inheritance_policy, sales_context,
    sales_east_context,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

#[test]
fn manager_may_export_but_not_delete_finance() {
    assert!(has_permission(Role::Manager, Resource::Finance, Action::Export, None));
    assert!(!has_permission(Role::Manager, Resource::Finance, Action::Delete, None));
    assert_eq!(
        allowed_actions(Role::Manager, Resource::Finance),
        BTreeSet::from([Action::Read, Action::Export])
    );
}

#[test]
fn intern_only_reads_clients() {
    assert!(!has_permission(Role::Intern, Resource::Clients, Action::Create, None));
    assert_eq!(
        allowed_actions(Role::Intern, Resource::Clients),
        BTreeSet::from([Action::Read])
    );
}

#[test]
fn viewer_cannot_open_employees_route() {
    assert!(!is_route_allowed(Role::Viewer, "/employees", None));
}

#[test]
fn viewer_sees_dashboard_not_settings() {
    assert!(can_access_resource(Role::Viewer, Resource::Dashboard));
    assert!(!can_access_resource(Role::Viewer, Resource::Settings));
}

#[test]
fn conjunction_requires_both_department_and_region() {
    let eval = evaluator_for(conjunction_policy());

    let department_only = sales_context();
    assert!(!eval.has_permission(
        Role::Manager,
        Resource::Sales,
        Action::Approve,
        Some(&department_only)
    ));

    let both = sales_east_context();
    assert!(eval.has_permission(Role::Manager, Resource::Sales, Action::Approve, Some(&both)));

    let wrong_region = sales_context().with_region("West");
    assert!(!eval.has_permission(
        Role::Manager,
        Resource::Sales,
        Action::Approve,
        Some(&wrong_region)
    ));

    assert!(!eval.has_permission(Role::Manager, Resource::Sales, Action::Approve, None));
}

#[test]
fn conjunction_gates_route_too() {
    let eval = evaluator_for(conjunction_policy());

    assert!(eval.is_route_allowed(Role::Manager, "/sales", Some(&sales_east_context())));
    assert!(!eval.is_route_allowed(Role::Manager, "/sales", Some(&sales_context())));
}

#[test]
fn dominance_does_not_inherit_grants() {
    let eval = evaluator_for(hierarchy_without_inheritance_policy());

    assert!(eval.dominates(Role::Admin, Role::Manager));
    assert!(eval.has_permission(Role::Manager, Resource::Finance, Action::Read, None));
    assert!(!eval.has_permission(Role::Admin, Resource::Finance, Action::Read, None));
    assert!(eval.allowed_actions(Role::Admin, Resource::Finance).is_empty());
}

#[test]
fn super_admin_entry_is_self_sufficient() {
    let eval = PermissionEvaluator::builtin();
    let table = eval.policy().table();

    for resource in Resource::ALL {
        let grant = table
            .grant(Role::SuperAdmin, resource)
            .expect("super_admin grant for every resource");
        assert_eq!(grant.actions.len(), Action::ALL.len());
        assert!(!grant.is_conditional());
    }
}

#[test]
fn builtin_hierarchy_follows_rank() {
    for senior in Role::ALL {
        for junior in Role::ALL {
            assert_eq!(
                dominates(senior, junior),
                senior.rank() > junior.rank(),
                "{senior} vs {junior}"
            );
        }
    }
}

#[test]
fn employee_ownership_grants_pass_through() {
    let ctx = EvaluationContext::new().with_user_id("u-7");
    assert!(has_permission(Role::Employee, Resource::Sales, Action::Update, Some(&ctx)));
    assert!(!has_permission(Role::Employee, Resource::Sales, Action::Delete, Some(&ctx)));
}

#[test]
fn ownership_grant_holds_without_context() {
    assert!(has_permission(Role::Employee, Resource::Sales, Action::Update, None));
    assert!(has_permission(Role::Employee, Resource::Employees, Action::Read, None));
}

#[test]
fn team_lead_grants_need_no_department() {
    assert!(has_permission(Role::TeamLead, Resource::Employees, Action::Update, None));
    assert!(has_permission(Role::TeamLead, Resource::Sales, Action::Create, None));
    assert!(has_permission(Role::Manager, Resource::Employees, Action::Assign, None));
    assert!(is_route_allowed(Role::TeamLead, "/employees", None));
}

#[test]
fn menu_for_manager() {
    let eval = PermissionEvaluator::builtin();
    let paths: Vec<String> = eval
        .allowed_routes(Role::Manager, Some(&sales_context()))
        .into_iter()
        .map(|entry| entry.path.clone())
        .collect();

    assert_eq!(
        paths,
        vec![
            "/dashboard",
            "/employees",
            "/clients",
            "/sales",
            "/finance",
            "/reports",
            "/profile",
        ]
    );
}

#[test]
fn admin_gate_for_user_management() {
    let eval = PermissionEvaluator::builtin();
    let manage_users = [
        "users:create".parse::<PermissionKey>().unwrap(),
        "users:assign".parse::<PermissionKey>().unwrap(),
    ];

    assert!(eval.has_all_permissions(Role::Admin, &manage_users, None));
    assert!(!eval.has_any_permission(Role::Manager, &manage_users, None));
    assert!(!is_route_allowed(Role::Admin, "/system", None));
    assert!(is_route_allowed(Role::SuperAdmin, "/system", None));
}
