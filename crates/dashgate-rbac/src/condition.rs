//! Grant conditions and the per-call evaluation context
//!
//! A grant may carry conditions narrowing when it applies. All conditions on a
//! grant must pass. Each [`ConditionKind`] has its own check function and
//! dispatch is a plain `match`.
//!
//! # Semantics
//!
//! | Kind | Passes when |
//! |------|-------------|
//! | `ownership` | always (record ownership is enforced by the caller's filtering) |
//! | `department` | no value required, or `context.department` equals it |
//! | `region` | no value required, or `context.region` equals it |
//! | `custom` | always |

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Kind of grant qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Record belongs to the acting user
    Ownership,
    /// Acting user's department
    Department,
    /// Acting user's region
    Region,
    /// Extension point, always passes
    Custom,
}

impl ConditionKind {
    /// Canonical wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::Ownership => "ownership",
            ConditionKind::Department => "department",
            ConditionKind::Region => "region",
            ConditionKind::Custom => "custom",
        }
    }

    /// Parse a kind name, returning `None` for names outside the closed set
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ownership" => Some(ConditionKind::Ownership),
            "department" => Some(ConditionKind::Department),
            "region" => Some(ConditionKind::Region),
            "custom" => Some(ConditionKind::Custom),
            _ => None,
        }
    }
}

impl Display for ConditionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualifier attached to a grant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionCondition {
    /// Which check to run
    pub kind: ConditionKind,
    /// Required value, if the check compares against one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PermissionCondition {
    /// Condition without a required value
    #[inline]
    #[must_use]
    pub fn new(kind: ConditionKind) -> Self {
        Self { kind, value: None }
    }

    /// Condition with a required value
    #[inline]
    #[must_use]
    pub fn with_value(kind: ConditionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
        }
    }

    /// Ownership pass-through condition
    #[inline]
    #[must_use]
    pub fn ownership() -> Self {
        Self::new(ConditionKind::Ownership)
    }

    /// Department condition, `None` means any department
    #[inline]
    #[must_use]
    pub fn department(value: Option<&str>) -> Self {
        Self {
            kind: ConditionKind::Department,
            value: value.map(str::to_string),
        }
    }

    /// Region condition, `None` means any region
    #[inline]
    #[must_use]
    pub fn region(value: Option<&str>) -> Self {
        Self {
            kind: ConditionKind::Region,
            value: value.map(str::to_string),
        }
    }

    /// Evaluate this condition against a context
    #[must_use]
    pub fn evaluate(&self, context: &EvaluationContext) -> bool {
        match self.kind {
            ConditionKind::Ownership => check_ownership(context),
            ConditionKind::Department => {
                check_attribute(self.value.as_deref(), context.department.as_deref())
            }
            ConditionKind::Region => {
                check_attribute(self.value.as_deref(), context.region.as_deref())
            }
            ConditionKind::Custom => true,
        }
    }
}

/// Per-call facts supplied by the caller
///
/// Never stored and never modified by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
    /// Acting user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Acting user's department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Acting user's region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl EvaluationContext {
    /// Empty context
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With acting user
    #[inline]
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// With department
    #[inline]
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// With region
    #[inline]
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Conjunction over `conditions`
///
/// A missing context is evaluated as an empty one, so conditions that require
/// a value fail instead of granting.
#[must_use]
pub fn evaluate_conditions(
    conditions: &[PermissionCondition],
    context: Option<&EvaluationContext>,
) -> bool {
    let empty = EvaluationContext::default();
    let context = context.unwrap_or(&empty);
    conditions.iter().all(|condition| condition.evaluate(context))
}

// Record ownership cannot be checked without the record; callers pre-filter.
fn check_ownership(_context: &EvaluationContext) -> bool {
    true
}

fn check_attribute(required: Option<&str>, actual: Option<&str>) -> bool {
    match required {
        None => true,
        Some(required) => actual == Some(required),
    }
}
