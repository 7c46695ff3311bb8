//! Built-in dashboard policy
//!
//! Every role's grants are spelled out in full. Nothing here is derived from
//! another role's list, so a grant can be audited by reading one block.

use crate::condition::PermissionCondition;
use crate::navigation::NavPermission;
use crate::permission::Permission;
use crate::policy::Policy;
use crate::taxonomy::{Action, PermissionKey, Resource, Role};
use once_cell::sync::Lazy;
use std::sync::Arc;

use Action::{Approve, Assign, Create, Delete, Export, Import, Read, Reject, Update};

static BUILTIN: Lazy<Arc<Policy>> = Lazy::new(|| match Policy::builtin() {
    Ok(policy) => Arc::new(policy),
    Err(err) => panic!("built-in dashboard policy is malformed: {err}"),
});

/// Shared built-in policy, built and validated on first use
#[must_use]
pub fn builtin_policy() -> Arc<Policy> {
    Arc::clone(&BUILTIN)
}

/// Grants per role
#[must_use]
pub fn grants() -> Vec<(Role, Vec<Permission>)> {
    vec![
        (
            Role::SuperAdmin,
            Resource::ALL.into_iter().map(Permission::full).collect(),
        ),
        (
            Role::Admin,
            vec![
                Permission::new(Resource::Users, [Create, Read, Update, Delete, Assign]),
                Permission::new(
                    Resource::Employees,
                    [Create, Read, Update, Delete, Export, Import, Assign],
                ),
                Permission::new(Resource::Clients, [Create, Read, Update, Delete, Export, Import]),
                Permission::new(
                    Resource::Sales,
                    [Create, Read, Update, Delete, Export, Approve, Reject],
                ),
                Permission::new(Resource::Finance, [Read, Export, Approve, Reject]),
                Permission::new(Resource::Dashboard, [Read]),
                Permission::new(Resource::Settings, [Read, Update]),
                Permission::new(Resource::Reports, [Create, Read, Export]),
                Permission::new(Resource::AuditLogs, [Read, Export]),
            ],
        ),
        (
            Role::Manager,
            vec![
                Permission::new(Resource::Employees, [Read, Update, Assign]),
                Permission::new(Resource::Clients, [Create, Read, Update, Export]),
                Permission::new(Resource::Sales, [Create, Read, Update, Export, Approve, Reject]),
                Permission::new(Resource::Finance, [Read, Export]),
                Permission::new(Resource::Dashboard, [Read]),
                Permission::new(Resource::Reports, [Create, Read, Export]),
            ],
        ),
        (
            Role::TeamLead,
            vec![
                Permission::new(Resource::Employees, [Read, Update]),
                Permission::new(Resource::Clients, [Read, Update]),
                Permission::new(Resource::Sales, [Create, Read, Update]),
                Permission::new(Resource::Dashboard, [Read]),
                Permission::new(Resource::Reports, [Read]),
            ],
        ),
        (
            Role::Employee,
            vec![
                Permission::new(Resource::Employees, [Read])
                    .with_condition(PermissionCondition::ownership()),
                Permission::new(Resource::Clients, [Read]),
                Permission::new(Resource::Sales, [Create, Read, Update])
                    .with_condition(PermissionCondition::ownership()),
                Permission::new(Resource::Dashboard, [Read]),
                Permission::new(Resource::Reports, [Read]),
            ],
        ),
        (
            Role::Intern,
            vec![
                Permission::new(Resource::Clients, [Read]),
                Permission::new(Resource::Sales, [Read]),
                Permission::new(Resource::Dashboard, [Read]),
            ],
        ),
        (
            Role::Viewer,
            vec![
                Permission::new(Resource::Dashboard, [Read]),
                Permission::new(Resource::Reports, [Read]),
            ],
        ),
    ]
}

/// Declared dominance sets
#[must_use]
pub fn hierarchy() -> Vec<(Role, Vec<Role>)> {
    use Role::{Admin, Employee, Intern, Manager, SuperAdmin, TeamLead, Viewer};

    vec![
        (SuperAdmin, vec![Admin, Manager, TeamLead, Employee, Intern, Viewer]),
        (Admin, vec![Manager, TeamLead, Employee, Intern, Viewer]),
        (Manager, vec![TeamLead, Employee, Intern, Viewer]),
        (TeamLead, vec![Employee, Intern, Viewer]),
        (Employee, vec![Intern, Viewer]),
        (Intern, vec![Viewer]),
        (Viewer, vec![]),
    ]
}

/// Dashboard routes in menu order
#[must_use]
pub fn navigation() -> Vec<NavPermission> {
    use Role::{Admin, Employee, Intern, Manager, SuperAdmin, TeamLead, Viewer};

    vec![
        NavPermission::new("/dashboard", Role::ALL)
            .requiring(PermissionKey::new(Resource::Dashboard, Read)),
        NavPermission::new("/employees", [SuperAdmin, Admin, Manager, TeamLead, Employee])
            .requiring(PermissionKey::new(Resource::Employees, Read)),
        NavPermission::new("/clients", [SuperAdmin, Admin, Manager, TeamLead, Employee, Intern])
            .requiring(PermissionKey::new(Resource::Clients, Read)),
        NavPermission::new("/sales", [SuperAdmin, Admin, Manager, TeamLead, Employee, Intern])
            .requiring(PermissionKey::new(Resource::Sales, Read)),
        NavPermission::new("/finance", [SuperAdmin, Admin, Manager])
            .requiring(PermissionKey::new(Resource::Finance, Read)),
        NavPermission::new("/reports", [SuperAdmin, Admin, Manager, TeamLead, Employee, Viewer])
            .requiring(PermissionKey::new(Resource::Reports, Read)),
        NavPermission::new("/users", [SuperAdmin, Admin])
            .requiring(PermissionKey::new(Resource::Users, Read)),
        NavPermission::new("/settings", [SuperAdmin, Admin])
            .requiring(PermissionKey::new(Resource::Settings, Read)),
        NavPermission::new("/audit-logs", [SuperAdmin, Admin])
            .requiring(PermissionKey::new(Resource::AuditLogs, Read)),
        NavPermission::new("/system", [SuperAdmin])
            .requiring(PermissionKey::new(Resource::SystemConfig, Read)),
        NavPermission::new("/profile", Role::ALL),
    ]
}
