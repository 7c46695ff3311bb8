//! Role, resource and action taxonomy
//!
//! Closed enumerations shared by every table in the crate. Wire names are the
//! snake_case strings returned by `as_str`; serde uses the same names, so an
//! unknown name in a policy file fails to deserialize.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Dashboard role
///
/// Variants are declared most privileged first, which is also the order of
/// [`Role::ALL`]. Derived `Ord` follows declaration order; use
/// [`Role::rank`] for seniority comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted platform owner
    SuperAdmin,
    /// Organisation administrator
    Admin,
    /// Department manager
    Manager,
    /// Team lead inside a department
    TeamLead,
    /// Regular employee
    Employee,
    /// Intern with read access to day-to-day data
    Intern,
    /// Read-only observer
    Viewer,
}

impl Role {
    /// All roles, most to least privileged
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::TeamLead,
        Role::Employee,
        Role::Intern,
        Role::Viewer,
    ];

    /// Canonical wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::TeamLead => "team_lead",
            Role::Employee => "employee",
            Role::Intern => "intern",
            Role::Viewer => "viewer",
        }
    }

    /// Human-readable label for role badges
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::TeamLead => "Team Lead",
            Role::Employee => "Employee",
            Role::Intern => "Intern",
            Role::Viewer => "Viewer",
        }
    }

    /// Numeric seniority, `viewer` = 0
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Role::SuperAdmin => 6,
            Role::Admin => 5,
            Role::Manager => 4,
            Role::TeamLead => 3,
            Role::Employee => 2,
            Role::Intern => 1,
            Role::Viewer => 0,
        }
    }
}

/// Protectable class of domain objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Login accounts
    Users,
    /// Employee records
    Employees,
    /// Client records
    Clients,
    /// Sales pipeline and deals
    Sales,
    /// Revenue, invoices, payroll
    Finance,
    /// Landing dashboard
    Dashboard,
    /// Organisation settings
    Settings,
    /// Generated reports
    Reports,
    /// Audit trail
    AuditLogs,
    /// Platform configuration
    SystemConfig,
}

impl Resource {
    /// All resources in declaration order
    pub const ALL: [Resource; 10] = [
        Resource::Users,
        Resource::Employees,
        Resource::Clients,
        Resource::Sales,
        Resource::Finance,
        Resource::Dashboard,
        Resource::Settings,
        Resource::Reports,
        Resource::AuditLogs,
        Resource::SystemConfig,
    ];

    /// Canonical wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Employees => "employees",
            Resource::Clients => "clients",
            Resource::Sales => "sales",
            Resource::Finance => "finance",
            Resource::Dashboard => "dashboard",
            Resource::Settings => "settings",
            Resource::Reports => "reports",
            Resource::AuditLogs => "audit_logs",
            Resource::SystemConfig => "system_config",
        }
    }
}

/// Operation verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a record
    Create,
    /// View a record
    Read,
    /// Modify a record
    Update,
    /// Remove a record
    Delete,
    /// Export records
    Export,
    /// Bulk import records
    Import,
    /// Approve a pending item
    Approve,
    /// Reject a pending item
    Reject,
    /// Assign a record to someone
    Assign,
}

impl Action {
    /// All actions in declaration order
    pub const ALL: [Action; 9] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Export,
        Action::Import,
        Action::Approve,
        Action::Reject,
        Action::Assign,
    ];

    /// Canonical wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Import => "import",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::Assign => "assign",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| ParseError::UnknownRole(value.to_string()))
    }
}

impl FromStr for Resource {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| ParseError::UnknownResource(value.to_string()))
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| ParseError::UnknownAction(value.to_string()))
    }
}

/// A `(resource, action)` requirement, written `resource:action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionKey {
    /// Resource being acted upon
    pub resource: Resource,
    /// Action performed
    pub action: Action,
}

impl PermissionKey {
    /// Create a new key
    #[inline]
    #[must_use]
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl Display for PermissionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

impl FromStr for PermissionKey {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (resource, action) = value
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidPermissionKey(value.to_string()))?;
        Ok(Self {
            resource: resource.parse()?,
            action: action.parse()?,
        })
    }
}
