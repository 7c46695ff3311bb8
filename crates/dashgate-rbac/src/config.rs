//! Policy documents
//!
//! A [`PolicyConfig`] is the serializable form of a policy, read from JSON,
//! YAML or TOML. Role, resource and action names are checked by serde;
//! table-level rules are checked by [`crate::Policy::from_config`].
//!
//! ```yaml
//! unknown_route: deny
//! grants:
//!   manager:
//!     - resource: finance
//!       actions: [read, export]
//!     - resource: employees
//!       actions: [read, update]
//!       conditions:
//!         - kind: department
//!           value: Sales
//!   viewer: []
//! hierarchy:
//!   manager: [viewer]
//! navigation:
//!   - path: /finance
//!     roles: [manager]
//!     required_permission: { resource: finance, action: read }
//! ```

use crate::builtin::builtin_policy;
use crate::condition::{ConditionKind, PermissionCondition};
use crate::error::ConfigError;
use crate::navigation::{NavPermission, UnknownRoutePolicy};
use crate::permission::Permission;
use crate::policy::Policy;
use crate::taxonomy::{Action, Resource, Role};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;

/// Policy document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedFormat`] for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Display for ConfigFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        })
    }
}

/// Serializable policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Decision for routes with no navigation entry
    #[serde(default)]
    pub unknown_route: UnknownRoutePolicy,

    /// Grants per role; every role must appear
    pub grants: IndexMap<Role, Vec<GrantConfig>>,

    /// Declared dominance sets
    #[serde(default)]
    pub hierarchy: IndexMap<Role, Vec<Role>>,

    /// Route entries in menu order
    #[serde(default)]
    pub navigation: Vec<NavPermission>,
}

/// One grant in a policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Resource covered
    pub resource: Resource,
    /// Allowed actions
    pub actions: Vec<Action>,
    /// Qualifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionConfig>,
}

/// One condition in a policy document
///
/// The kind is kept as free text so documents written for a newer condition
/// set still load; unrecognized kinds become [`ConditionKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Condition kind name
    pub kind: String,
    /// Required value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PolicyConfig {
    /// The built-in dashboard policy as a document
    #[must_use]
    pub fn builtin() -> Self {
        Self::from(builtin_policy().as_ref())
    }

    /// Read a policy file, format chosen by extension
    ///
    /// # Errors
    /// IO, unsupported extension, or parse errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::io_error(path, source))?;
        let config = Self::parse(&text, format)?;
        tracing::debug!(path = %path.display(), %format, "policy document loaded");
        Ok(config)
    }

    /// Parse a policy document
    ///
    /// # Errors
    /// Format-specific parse errors, including unknown taxonomy names.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(text)?,
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Toml => toml::from_str(text)?,
        };
        Ok(config)
    }

    /// Render the document
    ///
    /// # Errors
    /// Serializer errors.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let text = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(text)
    }

    pub(crate) fn grant_entries(&self) -> Vec<(Role, Vec<Permission>)> {
        self.grants
            .iter()
            .map(|(role, grants)| (*role, grants.iter().map(GrantConfig::to_permission).collect()))
            .collect()
    }

    pub(crate) fn hierarchy_entries(&self) -> Vec<(Role, Vec<Role>)> {
        self.hierarchy
            .iter()
            .map(|(role, juniors)| (*role, juniors.clone()))
            .collect()
    }
}

impl GrantConfig {
    fn to_permission(&self) -> Permission {
        Permission {
            resource: self.resource,
            actions: self.actions.iter().copied().collect(),
            conditions: self
                .conditions
                .iter()
                .map(ConditionConfig::to_condition)
                .collect(),
        }
    }
}

impl ConditionConfig {
    fn to_condition(&self) -> PermissionCondition {
        let kind = ConditionKind::from_name(&self.kind).unwrap_or_else(|| {
            tracing::warn!(kind = %self.kind, "unrecognized condition kind, treating as custom");
            ConditionKind::Custom
        });
        PermissionCondition {
            kind,
            value: self.value.clone(),
        }
    }
}

impl From<&Policy> for PolicyConfig {
    fn from(policy: &Policy) -> Self {
        let grants = policy
            .table()
            .iter()
            .map(|(role, permissions)| {
                let grants = permissions
                    .iter()
                    .map(|permission| GrantConfig {
                        resource: permission.resource,
                        actions: permission.actions.iter().copied().collect(),
                        conditions: permission
                            .conditions
                            .iter()
                            .map(|condition| ConditionConfig {
                                kind: condition.kind.as_str().to_string(),
                                value: condition.value.clone(),
                            })
                            .collect(),
                    })
                    .collect();
                (role, grants)
            })
            .collect();

        let hierarchy = policy
            .hierarchy()
            .declared()
            .iter()
            .map(|(role, juniors)| (*role, juniors.iter().copied().collect()))
            .collect();

        Self {
            unknown_route: policy.navigation().unknown_route(),
            grants,
            hierarchy,
            navigation: policy.navigation().iter().cloned().collect(),
        }
    }
}
