//! `dashgate` - query and audit dashboard permission policies
//!
//! Exit status for `check` and `route` is 0 when granted, 1 when denied and
//! 2 on any error.

mod logging;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dashgate_rbac::{
    Action, ConfigFormat, EvaluationContext, PermissionEvaluator, Policy, PolicyConfig, Resource,
    Role,
};
use logging::LogFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

const POLICY_ENV: &str = "DASHGATE_POLICY";

const EXIT_OK: u8 = 0;
const EXIT_DENIED: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn cli() -> Command {
    Command::new("dashgate")
        .version(dashgate_rbac::VERSION)
        .about("Query and audit dashboard permission policies")
        .subcommand_required(true)
        .arg(
            Arg::new("policy")
                .long("policy")
                .global(true)
                .env(POLICY_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("Policy file (.json, .yaml, .toml); built-in policy when absent"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(value_parser!(LogFormat))
                .help("Log output format on stderr"),
        )
        .subcommand(
            Command::new("check")
                .about("Check one role/resource/action triple")
                .arg(role_arg())
                .arg(
                    Arg::new("resource")
                        .required(true)
                        .value_parser(str::parse::<Resource>),
                )
                .arg(
                    Arg::new("action")
                        .required(true)
                        .value_parser(str::parse::<Action>),
                )
                .args(context_args()),
        )
        .subcommand(
            Command::new("route")
                .about("Check whether a role may open a route")
                .arg(role_arg())
                .arg(Arg::new("path").required(true))
                .args(context_args()),
        )
        .subcommand(
            Command::new("actions")
                .about("List the actions a role holds on a resource")
                .arg(role_arg())
                .arg(
                    Arg::new("resource")
                        .required(true)
                        .value_parser(str::parse::<Resource>),
                ),
        )
        .subcommand(
            Command::new("matrix")
                .about("Print the role x resource permission matrix")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a policy file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Print the active policy as a document")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("yaml")
                        .value_parser(str::parse::<ConfigFormat>),
                ),
        )
}

fn role_arg() -> Arg {
    Arg::new("role")
        .required(true)
        .value_parser(str::parse::<Role>)
}

fn context_args() -> [Arg; 3] {
    [
        Arg::new("user-id").long("user-id").help("Acting user id"),
        Arg::new("department")
            .long("department")
            .help("Department of the acting user"),
        Arg::new("region")
            .long("region")
            .help("Region of the acting user"),
    ]
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    let format = matches
        .get_one::<LogFormat>("log-format")
        .copied()
        .unwrap_or(LogFormat::Text);
    logging::init(format);

    match run(&matches) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<u8> {
    let policy_path = matches.get_one::<PathBuf>("policy");

    match matches.subcommand() {
        Some(("check", args)) => {
            let evaluator = load_evaluator(policy_path)?;
            let role = required::<Role>(args, "role")?;
            let resource = required::<Resource>(args, "resource")?;
            let action = required::<Action>(args, "action")?;
            let context = context_from(args);

            let granted = evaluator.has_permission(role, resource, action, context.as_ref());
            println!("{}", verdict(granted));
            Ok(exit_for(granted))
        }
        Some(("route", args)) => {
            let evaluator = load_evaluator(policy_path)?;
            let role = required::<Role>(args, "role")?;
            let path = required::<String>(args, "path")?;
            let context = context_from(args);

            let granted = evaluator.is_route_allowed(role, &path, context.as_ref());
            println!("{}", verdict(granted));
            Ok(exit_for(granted))
        }
        Some(("actions", args)) => {
            let evaluator = load_evaluator(policy_path)?;
            let role = required::<Role>(args, "role")?;
            let resource = required::<Resource>(args, "resource")?;

            for action in evaluator.allowed_actions(role, resource) {
                println!("{action}");
            }
            Ok(EXIT_OK)
        }
        Some(("matrix", args)) => {
            let evaluator = load_evaluator(policy_path)?;
            let matrix = evaluator.matrix();

            if args.get_flag("json") {
                let text = serde_json::to_string_pretty(&matrix)
                    .context("failed to serialize permission matrix")?;
                println!("{text}");
            } else {
                for row in &matrix.rows {
                    println!("{} ({})", row.role.label(), row.role);
                    for cell in row.cells.iter().filter(|cell| !cell.actions.is_empty()) {
                        let actions: Vec<&str> =
                            cell.actions.iter().map(|action| action.as_str()).collect();
                        println!("  {:<14} {}", cell.resource.as_str(), actions.join(", "));
                    }
                }
            }
            Ok(EXIT_OK)
        }
        Some(("validate", args)) => {
            let file = required::<PathBuf>(args, "file")?;
            let policy = load_policy(&file)?;
            println!(
                "{}: ok ({} grants, {} routes)",
                file.display(),
                policy.table().len(),
                policy.navigation().len()
            );
            Ok(EXIT_OK)
        }
        Some(("export", args)) => {
            let format = required::<ConfigFormat>(args, "format")?;
            let evaluator = load_evaluator(policy_path)?;
            let text = PolicyConfig::from(evaluator.policy())
                .render(format)
                .with_context(|| format!("failed to render policy as {format}"))?;
            print!("{text}");
            Ok(EXIT_OK)
        }
        _ => Ok(EXIT_ERROR),
    }
}

fn required<T: Clone + Send + Sync + 'static>(args: &ArgMatches, name: &str) -> Result<T> {
    args.get_one::<T>(name)
        .cloned()
        .with_context(|| format!("missing argument `{name}`"))
}

fn context_from(args: &ArgMatches) -> Option<EvaluationContext> {
    let user_id = args.get_one::<String>("user-id");
    let department = args.get_one::<String>("department");
    let region = args.get_one::<String>("region");

    if user_id.is_none() && department.is_none() && region.is_none() {
        return None;
    }

    Some(EvaluationContext {
        user_id: user_id.cloned(),
        department: department.cloned(),
        region: region.cloned(),
    })
}

fn load_policy(path: &Path) -> Result<Policy> {
    Policy::load(path).with_context(|| format!("failed to load policy {}", path.display()))
}

fn load_evaluator(path: Option<&PathBuf>) -> Result<PermissionEvaluator> {
    match path {
        Some(path) => {
            let policy = load_policy(path)?;
            tracing::debug!(path = %path.display(), "using policy file");
            Ok(PermissionEvaluator::new(Arc::new(policy)))
        }
        None => Ok(PermissionEvaluator::builtin()),
    }
}

fn verdict(granted: bool) -> &'static str {
    if granted {
        "allowed"
    } else {
        "denied"
    }
}

fn exit_for(granted: bool) -> u8 {
    if granted {
        EXIT_OK
    } else {
        EXIT_DENIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        cli().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn check_parses_taxonomy_names() {
        let matches = parse(&["dashgate", "check", "team_lead", "sales", "create"]);
        let (_, args) = matches.subcommand().unwrap();

        assert_eq!(required::<Role>(args, "role").unwrap(), Role::TeamLead);
        assert_eq!(required::<Resource>(args, "resource").unwrap(), Resource::Sales);
        assert_eq!(required::<Action>(args, "action").unwrap(), Action::Create);
        assert!(context_from(args).is_none());
    }

    #[test]
    fn check_rejects_unknown_role() {
        let result = cli().try_get_matches_from(["dashgate", "check", "owner", "sales", "read"]);
        assert!(result.is_err());
    }

    #[test]
    fn context_flags_build_context() {
        let matches = parse(&[
            "dashgate",
            "route",
            "manager",
            "/finance",
            "--department",
            "Sales",
            "--region",
            "East",
        ]);
        let (_, args) = matches.subcommand().unwrap();

        let context = context_from(args).unwrap();
        assert_eq!(context.department.as_deref(), Some("Sales"));
        assert_eq!(context.region.as_deref(), Some("East"));
        assert_eq!(context.user_id, None);
    }

    #[test]
    fn export_format_defaults_to_yaml() {
        let matches = parse(&["dashgate", "export"]);
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(
            required::<ConfigFormat>(args, "format").unwrap(),
            ConfigFormat::Yaml
        );

        let matches = parse(&["dashgate", "export", "--format", "toml"]);
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(
            required::<ConfigFormat>(args, "format").unwrap(),
            ConfigFormat::Toml
        );
    }

    #[test]
    fn builtin_check_verdicts() {
        let matches = parse(&["dashgate", "check", "intern", "clients", "create"]);
        assert_eq!(run(&matches).unwrap(), EXIT_DENIED);

        let matches = parse(&["dashgate", "check", "manager", "finance", "export"]);
        assert_eq!(run(&matches).unwrap(), EXIT_OK);
    }

    #[test]
    fn unknown_route_is_denied() {
        let matches = parse(&["dashgate", "route", "super_admin", "/nowhere"]);
        assert_eq!(run(&matches).unwrap(), EXIT_DENIED);
    }

    #[test]
    fn validate_accepts_exported_policy() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("policy.json");
        let text = PolicyConfig::builtin().render(ConfigFormat::Json).unwrap();
        std::fs::write(&file, text).unwrap();

        let path = file.to_str().unwrap();
        let matches = parse(&["dashgate", "validate", path]);
        assert_eq!(run(&matches).unwrap(), EXIT_OK);
    }

    #[test]
    fn validate_reports_missing_file() {
        let matches = parse(&["dashgate", "validate", "/nonexistent/policy.yaml"]);
        let err = run(&matches).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load policy"));
    }
}
