//! Loading policy documents from disk.

use dashgate_rbac::{
    Action, ConfigError, ConfigFormat, PermissionEvaluator, Policy, PolicyConfig, PolicyError,
    RbacError, Resource, Role,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;

const REGIONAL_POLICY: &str = r#"{
  "unknown_route": "allow",
  "grants": {
    "super_admin": [{ "resource": "sales", "actions": ["read", "approve"] }],
    "admin": [],
    "manager": [
      {
        "resource": "sales",
        "actions": ["read"],
        "conditions": [{ "kind": "region", "value": "North" }]
      }
    ],
    "team_lead": [],
    "employee": [],
    "intern": [],
    "viewer": []
  },
  "hierarchy": { "super_admin": ["manager"] },
  "navigation": [
    {
      "path": "/sales",
      "roles": ["super_admin", "manager"],
      "required_permission": { "resource": "sales", "action": "read" }
    }
  ]
}"#;

fn write_policy(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_json_policy() {
    let file = write_policy(".json", REGIONAL_POLICY);
    let policy = Policy::load(file.path()).unwrap();
    let eval = PermissionEvaluator::new(Arc::new(policy));

    let north = dashgate_rbac::EvaluationContext::new().with_region("North");
    assert!(eval.has_permission(Role::Manager, Resource::Sales, Action::Read, Some(&north)));
    assert!(!eval.has_permission(Role::Manager, Resource::Sales, Action::Read, None));
    assert!(eval.dominates(Role::SuperAdmin, Role::Manager));
    assert!(eval.is_route_allowed(Role::Viewer, "/unlisted", None));
}

#[test]
fn exported_builtin_reloads_from_yaml_and_toml() {
    let builtin = PolicyConfig::builtin();

    for (suffix, format) in [(".yaml", ConfigFormat::Yaml), (".toml", ConfigFormat::Toml)] {
        let file = write_policy(suffix, &builtin.render(format).unwrap());
        let loaded = Policy::load(file.path()).unwrap();
        assert_eq!(loaded, Policy::builtin().unwrap());
    }
}

#[test]
fn missing_file_is_io_error() {
    let result = PolicyConfig::from_path("/definitely/not/here/policy.yaml");
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn cyclic_hierarchy_is_rejected() {
    let text = REGIONAL_POLICY.replace(
        r#""hierarchy": { "super_admin": ["manager"] }"#,
        r#""hierarchy": { "super_admin": ["manager"], "manager": ["super_admin"] }"#,
    );
    let file = write_policy(".json", &text);

    let err = Policy::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RbacError::Policy(PolicyError::CyclicHierarchy(_))
    ));
}

#[test]
fn unknown_action_is_rejected_at_load() {
    let text = REGIONAL_POLICY.replace(r#"["read", "approve"]"#, r#"["read", "publish"]"#);
    let file = write_policy(".json", &text);

    let err = Policy::load(file.path()).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("publish"));
}

#[test]
fn orphaned_route_is_rejected() {
    let text = REGIONAL_POLICY.replace(
        r#""required_permission": { "resource": "sales", "action": "read" }"#,
        r#""required_permission": { "resource": "finance", "action": "read" }"#,
    );
    let file = write_policy(".json", &text);

    let err = Policy::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RbacError::Policy(PolicyError::OrphanedRoutePermission { .. })
    ));
}

#[test]
fn inverted_hierarchy_is_rejected() {
    let text = REGIONAL_POLICY.replace(
        r#""hierarchy": { "super_admin": ["manager"] }"#,
        r#""hierarchy": { "viewer": ["super_admin"] }"#,
    );
    let file = write_policy(".json", &text);

    let err = Policy::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RbacError::Policy(PolicyError::InvertedHierarchy {
            senior: Role::Viewer,
            junior: Role::SuperAdmin,
        })
    ));
}

#[test]
fn route_requiring_ungranted_action_is_rejected() {
    let text = REGIONAL_POLICY.replace(
        r#""required_permission": { "resource": "sales", "action": "read" }"#,
        r#""required_permission": { "resource": "sales", "action": "delete" }"#,
    );
    let file = write_policy(".json", &text);

    let err = Policy::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("sales:delete"));
}
