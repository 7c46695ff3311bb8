//! Error types for the permission model
//!
//! Denial is never an error. Everything here is a configuration problem
//! detected while parsing names or building a [`crate::Policy`]:
//! - Taxonomy parsing (unknown role/resource/action names)
//! - Policy validation (missing roles, duplicate grants, cyclic hierarchy)
//! - Policy file loading (I/O and format errors)

use crate::taxonomy::{PermissionKey, Resource, Role};
use std::path::PathBuf;

/// Unknown name for one of the closed taxonomy enumerations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Role name not in the taxonomy
    #[error("unknown role: '{0}'")]
    UnknownRole(String),

    /// Resource name not in the taxonomy
    #[error("unknown resource: '{0}'")]
    UnknownResource(String),

    /// Action name not in the taxonomy
    #[error("unknown action: '{0}'")]
    UnknownAction(String),

    /// Permission key not in `resource:action` form
    #[error("invalid permission key '{0}': expected 'resource:action'")]
    InvalidPermissionKey(String),
}

/// Malformed policy tables, detected when a policy is built
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// A role has no entry in the permission table
    #[error("role '{0}' has no entry in the permission table")]
    MissingRole(Role),

    /// Two grants for the same (role, resource) pair
    #[error("duplicate grant for role '{role}' on resource '{resource}'")]
    DuplicateGrant {
        /// Role owning both grants
        role: Role,
        /// Resource named twice
        resource: Resource,
    },

    /// A grant lists no actions
    #[error("grant for role '{role}' on resource '{resource}' lists no actions")]
    EmptyGrant {
        /// Role owning the grant
        role: Role,
        /// Resource of the empty grant
        resource: Resource,
    },

    /// A role is declared to dominate itself
    #[error("role '{0}' cannot dominate itself")]
    ReflexiveHierarchy(Role),

    /// A role is declared to dominate a role of equal or higher rank
    #[error("role '{senior}' cannot dominate '{junior}': '{junior}' is not a junior role")]
    InvertedHierarchy {
        /// Declared senior
        senior: Role,
        /// Declared junior
        junior: Role,
    },

    /// The dominance relation contains a cycle
    #[error("role hierarchy contains a cycle through '{0}'")]
    CyclicHierarchy(Role),

    /// Two navigation entries for the same path
    #[error("duplicate navigation entry for path '{0}'")]
    DuplicateRoute(String),

    /// Route path is empty or not absolute
    #[error("invalid route path '{0}': must start with '/'")]
    InvalidRoute(String),

    /// A route requires a permission no role is granted
    #[error("route '{path}' requires '{permission}' which no role is granted")]
    OrphanedRoutePermission {
        /// Route path
        path: String,
        /// Permission nobody holds
        permission: PermissionKey,
    },
}

/// Policy file loading failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the policy file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File extension does not name a supported format
    #[error("unsupported policy format: '{0}'")]
    UnsupportedFormat(String),

    /// Invalid JSON
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Invalid YAML
    #[error("invalid yaml: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Invalid TOML
    #[error("invalid toml: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Policy could not be rendered as TOML
    #[error("toml serialization failed: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined error for the crate
#[derive(Debug, thiserror::Error)]
pub enum RbacError {
    /// Taxonomy name error
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Policy validation error
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Policy file error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl RbacError {
    /// Short name of the failing layer
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Policy(_) => "policy",
            Self::Config(_) => "config",
        }
    }

    /// True when the error comes from a policy file rather than the tables
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result alias for fallible policy operations
pub type RbacResult<T> = Result<T, RbacError>;
