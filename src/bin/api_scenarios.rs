//! api-scenarios command line entry point
//!
//! ```text
//! api-scenarios run suites/ --server http://localhost:8088 \
//!     --set last_org_owner_email=owner@example.com
//! ```
//!
//! Exit status is 0 when every scenario passed, 1 when any failed and 2 when
//! the suite, environment or configuration could not be loaded.

use api_scenarios::config::{load_config, load_config_file, RunnerConfig};
use api_scenarios::environment::{discover_environments, load_environment_file, EnvError};
use api_scenarios::executor::{ExecutionConfig, ReqwestClient};
use api_scenarios::runner::SuiteRunner;
use api_scenarios::suite::{discover_scenario_files, load_suite};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "api-scenarios", about = "Run ordered HTTP API scenarios")]
#[command(version, long_about = None)]
struct Cli {
    /// Log request and response details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario under a suite directory, in path order
    Run(RunArgs),

    /// List the scenario files of a suite in run order
    List {
        suite_dir: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    suite_dir: PathBuf,

    /// Runner configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Environment file; searched for from the suite directory when omitted
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Environment to seed from
    #[arg(short, long)]
    environment: Option<String>,

    /// Value for the base-url variable
    #[arg(long)]
    server: Option<String>,

    /// Seed a variable (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();

    let result = match cli.command {
        Command::Run(args) => run(args).await,
        Command::List { suite_dir, config } => list(&suite_dir, config.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn read_config(path: Option<&Path>) -> Result<RunnerConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_config_file(path)?,
        None => load_config(None)?,
    })
}

fn list(suite_dir: &Path, config: Option<&Path>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = read_config(config)?;
    let ignore = ignored_files(&config, None);
    let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
    for file in discover_scenario_files(suite_dir, &ignore)? {
        println!("{}", file.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// File names discovery must not treat as scenarios: the configured
/// environment file name and, when given, the `--env-file` file itself.
fn ignored_files(config: &RunnerConfig, env_file: Option<&Path>) -> Vec<String> {
    let mut names = vec![config.environment_file.clone()];
    if let Some(name) = env_file.and_then(Path::file_name) {
        let name = name.to_string_lossy().into_owned();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

async fn run(args: RunArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = read_config(args.config.as_deref())?;

    let environments = match &args.env_file {
        Some(path) => load_environment_file(path)?,
        None => discover_environments(&args.suite_dir, &config.environment_file)?,
    };
    let selected = args.environment.as_deref().or(config.environment.as_deref());
    let seeds = environments
        .seed_values(selected)
        .ok_or_else(|| EnvError::UnknownEnvironment(selected.unwrap_or_default().to_string()))?;

    let ignore = ignored_files(&config, args.env_file.as_deref());
    let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
    let scenarios = load_suite(&args.suite_dir, &ignore)?;
    log::info!(
        "loaded {} scenario(s) from {}",
        scenarios.len(),
        args.suite_dir.display()
    );

    let client = ReqwestClient::new(ExecutionConfig::from(&config))?;
    let mut runner =
        SuiteRunner::new(client).with_base_url_variable(config.base_url_variable.clone());
    runner.seed_all(seeds);
    if let Some(server) = args.server {
        runner.seed(config.base_url_variable.clone(), server);
    }
    runner.seed_all(args.set);

    let report = runner.run(&scenarios).await;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render());
    }

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("last_org_owner_email=owner@example.com"),
            Ok(("last_org_owner_email".to_string(), "owner@example.com".to_string()))
        );
        assert_eq!(parse_key_value("token=a=b"), Ok(("token".to_string(), "a=b".to_string())));
        assert_eq!(parse_key_value("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_env_file_inside_suite_is_not_loaded_as_scenario() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("staging-env.json"),
            r#"{"staging": {"server": "http://staging"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("01 Login.yaml"),
            "name: Login\nrequest:\n  method: GET\n  url: /status\n",
        )
        .unwrap();

        let config = RunnerConfig::default();
        let env_file = dir.path().join("staging-env.json");
        let ignore = ignored_files(&config, Some(&env_file));
        assert_eq!(ignore, vec![config.environment_file.clone(), "staging-env.json".to_string()]);

        let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
        let scenarios = load_suite(dir.path(), &ignore).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "Login");
    }

    #[test]
    fn test_ignored_files_without_env_file() {
        let config = RunnerConfig::default();
        assert_eq!(ignored_files(&config, None), vec![config.environment_file.clone()]);
        let same = PathBuf::from("elsewhere").join(&config.environment_file);
        assert_eq!(ignored_files(&config, Some(&same)).len(), 1);
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "api-scenarios",
            "run",
            "suites",
            "--server",
            "http://localhost:8088",
            "--set",
            "a=1",
            "--set",
            "b=2",
            "--json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.suite_dir, PathBuf::from("suites"));
                assert_eq!(args.server.as_deref(), Some("http://localhost:8088"));
                assert_eq!(args.set.len(), 2);
                assert!(args.json);
            }
            Command::List { .. } => panic!("expected run"),
        }
    }
}
