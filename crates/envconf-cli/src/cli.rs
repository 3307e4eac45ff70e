//! envconf CLI - inspect how configuration keys resolve in the current environment
//!
//! Usage:
//!   envconf get --set 'port=[system, PORT, 8080]' port --type int
//!   envconf fetch --set 'db.url=[system, DATABASE_URL]' db.url
//!   envconf resolve '[system, HOME]'

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use envconf_core::{Container, KeyPath, Resolver, Value};
use indexmap::IndexMap;
use std::process::ExitCode;

/// envconf - Resolve configuration keys with environment indirection
#[derive(Parser)]
#[command(name = "envconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a key, falling back to a default
    Get {
        /// Dotted key path (e.g., database.url)
        path: String,

        #[command(flatten)]
        settings: Settings,

        /// Coerce the resolved value
        #[arg(short = 't', long = "type", value_enum, default_value = "raw")]
        value_type: ValueType,

        /// Default value if the key does not resolve
        #[arg(short, long)]
        default: Option<String>,

        /// Output format: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve a key that must be present
    Fetch {
        /// Dotted key path (e.g., database.url)
        path: String,

        #[command(flatten)]
        settings: Settings,

        /// Output format: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve a single inline value such as '[system, HOME, /root]'
    Resolve {
        /// Inline YAML value
        value: String,

        /// Output format: text, json, yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[derive(clap::Args)]
struct Settings {
    /// Seed a key: KEY=VALUE, VALUE is inline YAML (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ValueType {
    Raw,
    Bool,
    Int,
    Float,
}

/// Why a command produced no value
#[derive(Debug, PartialEq)]
enum Failure {
    /// The key or variable did not resolve (exit 1)
    Missing(String),
    /// Arguments could not be understood (exit 2)
    Invalid(String),
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Missing(_) => ExitCode::from(1),
            Failure::Invalid(_) => ExitCode::from(2),
        }
    }
}

/// Run the CLI with the process arguments and environment
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let resolver = Resolver::new();

    match execute(cli.command, &resolver) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            match &failure {
                Failure::Missing(message) => eprintln!("{}: {}", "Error".red(), message),
                Failure::Invalid(message) => eprintln!("{}: {}", "Invalid input".red(), message),
            }
            failure.exit_code()
        }
    }
}

fn execute(command: Commands, resolver: &Resolver) -> Result<String, Failure> {
    match command {
        Commands::Get {
            path,
            settings,
            value_type,
            default,
            format,
        } => cmd_get(resolver, &path, &settings, value_type, default, &format),

        Commands::Fetch {
            path,
            settings,
            format,
        } => cmd_fetch(resolver, &path, &settings, &format),

        Commands::Resolve { value, format } => cmd_resolve(resolver, &value, &format),
    }
}

fn cmd_get(
    resolver: &Resolver,
    path: &str,
    settings: &Settings,
    value_type: ValueType,
    default: Option<String>,
    format: &str,
) -> Result<String, Failure> {
    let root = build_settings(settings)?;
    let container = Container::Mapping(&root);
    let path = parse_key_path(path)?;

    let resolved = match value_type {
        ValueType::Raw => {
            let default = default.as_deref().map(parse_inline).transpose()?;
            resolver
                .fetch(&container, &path)
                .ok()
                .or(default)
        }
        ValueType::Bool => {
            let default = parse_default(default, "boolean", |text: &str| text.parse::<bool>().ok())?;
            resolver
                .get_boolean(&container, &path, default)
                .map(Value::Bool)
        }
        ValueType::Int => {
            let default = parse_default(default, "integer", |text: &str| text.parse::<i64>().ok())?;
            resolver
                .get_integer(&container, &path, default)
                .map(Value::Integer)
        }
        ValueType::Float => {
            let default = parse_default(default, "float", |text: &str| text.parse::<f64>().ok())?;
            resolver
                .get_float(&container, &path, default)
                .map(Value::Float)
        }
    };

    match resolved {
        Some(value) => render(&value, format),
        None => Err(Failure::Missing(format!("Path '{}' did not resolve", path))),
    }
}

fn cmd_fetch(
    resolver: &Resolver,
    path: &str,
    settings: &Settings,
    format: &str,
) -> Result<String, Failure> {
    let root = build_settings(settings)?;
    let container = Container::Mapping(&root);
    let path = parse_key_path(path)?;

    let value = resolver
        .fetch_or_raise(&container, path)
        .map_err(|e| Failure::Missing(e.to_string()))?;
    render(&value, format)
}

fn cmd_resolve(resolver: &Resolver, value: &str, format: &str) -> Result<String, Failure> {
    let raw = parse_inline(value)?;
    match resolver.resolve_indirection(&raw) {
        Ok(value) => render(&value, format),
        Err(_) => Err(Failure::Missing(format!("'{}' did not resolve", value))),
    }
}

fn parse_key_path(path: &str) -> Result<KeyPath, Failure> {
    KeyPath::dotted(path).map_err(|e| Failure::Invalid(e.to_string()))
}

/// Parse an inline YAML value; an empty string is the empty string
fn parse_inline(text: &str) -> Result<Value, Failure> {
    if text.is_empty() {
        return Ok(Value::String(String::new()));
    }
    serde_yaml::from_str(text)
        .map_err(|e| Failure::Invalid(format!("Cannot parse value '{}': {}", text, e)))
}

/// Parse a typed `--default` strictly; it is a literal and is never coerced
fn parse_default<T>(
    default: Option<String>,
    expected: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, Failure> {
    default
        .map(|text| {
            parse(&text).ok_or_else(|| {
                Failure::Invalid(format!("Default '{}' is not a valid {}", text, expected))
            })
        })
        .transpose()
}

/// Build the in-memory mapping described by repeated `--set KEY=VALUE` flags
fn build_settings(settings: &Settings) -> Result<IndexMap<String, Value>, Failure> {
    let mut root = IndexMap::new();

    for entry in &settings.set {
        let (key, text) = entry
            .split_once('=')
            .ok_or_else(|| Failure::Invalid(format!("Expected KEY=VALUE, got '{}'", entry)))?;
        let path = parse_key_path(key)?;
        let value = parse_inline(text)?;
        insert_path(&mut root, path.keys(), value)
            .map_err(|_| Failure::Invalid(format!("'{}' crosses a non-mapping value", key)))?;
    }

    Ok(root)
}

/// Insert at a key path, creating intermediate mappings as needed
fn insert_path(map: &mut IndexMap<String, Value>, keys: &[String], value: Value) -> Result<(), ()> {
    let Some((first, rest)) = keys.split_first() else {
        return Err(());
    };

    if rest.is_empty() {
        map.insert(first.clone(), value);
        return Ok(());
    }

    let next = map
        .entry(first.clone())
        .or_insert_with(|| Value::Mapping(IndexMap::new()));
    match next {
        Value::Mapping(inner) => insert_path(inner, rest, value),
        _ => Err(()),
    }
}

fn render(value: &Value, format: &str) -> Result<String, Failure> {
    match format {
        "json" => serde_json::to_string_pretty(value)
            .map_err(|e| Failure::Invalid(format!("Cannot render JSON: {}", e))),
        "yaml" => to_yaml(value),
        _ => match value {
            Value::Sequence(_) | Value::Mapping(_) | Value::Pairs(_) => to_yaml(value),
            _ => Ok(value.to_string()),
        },
    }
}

fn to_yaml(value: &Value) -> Result<String, Failure> {
    serde_yaml::to_string(value)
        .map(|yaml| yaml.trim_end().to_string())
        .map_err(|e| Failure::Invalid(format!("Cannot render YAML: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use envconf_core::Env;
    use pretty_assertions::assert_eq;

    fn run_args(args: &[&str], vars: &[(&str, &str)]) -> Result<String, Failure> {
        let cli = Cli::try_parse_from(std::iter::once("envconf").chain(args.iter().copied()))
            .expect("arguments should parse");
        let resolver = Resolver::with_env(Env::from_vars(vars.iter().copied()));
        execute(cli.command, &resolver)
    }

    #[test]
    fn test_get_literal() {
        let out = run_args(&["get", "--set", "name=billing", "name"], &[]).unwrap();
        assert_eq!(out, "billing");
    }

    #[test]
    fn test_get_env_reference() {
        let args = ["get", "--set", "db.url=[system, DATABASE_URL]", "db.url"];

        assert_eq!(
            run_args(&args, &[("DATABASE_URL", "postgres://db")]).unwrap(),
            "postgres://db"
        );
        assert!(matches!(run_args(&args, &[]), Err(Failure::Missing(_))));
    }

    #[test]
    fn test_get_raw_default() {
        let out = run_args(&["get", "missing", "--default", "42"], &[]).unwrap();
        assert_eq!(out, "42");
    }

    #[test]
    fn test_get_typed() {
        let set = "port=[system, PORT, \"8080\"]";
        assert_eq!(
            run_args(&["get", "-s", set, "port", "-t", "int"], &[]).unwrap(),
            "8080"
        );
        assert_eq!(
            run_args(&["get", "-s", set, "port", "-t", "int"], &[("PORT", "9090/tcp")]).unwrap(),
            "9090"
        );
        assert_eq!(
            run_args(&["get", "-s", "tls=[system, TLS]", "tls", "-t", "bool"], &[("TLS", "On")])
                .unwrap(),
            "true"
        );
        assert_eq!(
            run_args(&["get", "-s", "ratio=\"5\"", "ratio", "-t", "float", "-d", "0.5"], &[])
                .unwrap(),
            "0.5"
        );
    }

    #[test]
    fn test_get_typed_without_default_is_missing() {
        let result = run_args(&["get", "-s", "flag=maybe", "flag", "-t", "bool"], &[]);
        assert!(matches!(result, Err(Failure::Missing(_))));
    }

    #[test]
    fn test_get_invalid_default() {
        let result = run_args(&["get", "flag", "-t", "bool", "-d", "perhaps"], &[]);
        assert!(matches!(result, Err(Failure::Invalid(_))));
    }

    #[test]
    fn test_typed_default_is_a_strict_literal() {
        assert_eq!(
            run_args(&["get", "missing", "-t", "float", "-d", "5"], &[]).unwrap(),
            "5"
        );
        assert_eq!(
            run_args(&["get", "missing", "-t", "int", "-d", "17"], &[]).unwrap(),
            "17"
        );
        assert_eq!(
            run_args(&["get", "missing", "-t", "bool", "-d", "false"], &[]).unwrap(),
            "false"
        );
        for (value_type, default) in [("int", "42abc"), ("float", "0.5x"), ("bool", "yes")] {
            assert!(matches!(
                run_args(&["get", "missing", "-t", value_type, "-d", default], &[]),
                Err(Failure::Invalid(_))
            ));
        }
    }

    #[test]
    fn test_get_json_format() {
        let out = run_args(
            &["get", "-s", "db.pool=5", "-s", "db.host=localhost", "db", "-f", "json"],
            &[],
        )
        .unwrap();
        assert_eq!(out, "{\n  \"pool\": 5,\n  \"host\": \"localhost\"\n}");
    }

    #[test]
    fn test_fetch_missing_reports_error() {
        let result = run_args(&["fetch", "-s", "a=1", "b.c"], &[]);
        match result {
            Err(Failure::Missing(message)) => {
                assert!(message.contains("Configuration missing"));
                assert!(message.contains("Path: b.c"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_present() {
        let out = run_args(&["fetch", "-s", "a=[system, A, fallback]", "a"], &[]).unwrap();
        assert_eq!(out, "fallback");
    }

    #[test]
    fn test_resolve_inline_value() {
        assert_eq!(
            run_args(&["resolve", "[system, HOME_DIR]"], &[("HOME_DIR", "/home/op")]).unwrap(),
            "/home/op"
        );
        assert_eq!(run_args(&["resolve", "plain"], &[]).unwrap(), "plain");
        assert!(matches!(
            run_args(&["resolve", "[system, NOPE]"], &[]),
            Err(Failure::Missing(_))
        ));
    }

    #[test]
    fn test_bad_set_entries() {
        assert!(matches!(
            run_args(&["get", "-s", "novalue", "x"], &[]),
            Err(Failure::Invalid(_))
        ));
        assert!(matches!(
            run_args(&["get", "-s", "a=1", "-s", "a.b=2", "x"], &[]),
            Err(Failure::Invalid(_))
        ));
        assert!(matches!(
            run_args(&["get", "-s", "a=[unclosed", "a"], &[]),
            Err(Failure::Invalid(_))
        ));
    }
}
