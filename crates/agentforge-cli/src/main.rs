#![deny(unsafe_code)]

//! AgentForge CLI — drive the agent abstraction from the command line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentforge_core::{AgentFactory, AgentResponse, AgentType, CodingAgent, TaskContext};

/// AgentForge — a unified front end for coding-agent backends.
#[derive(Parser)]
#[command(name = "agentforge", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (default: search for .agentforge.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported agent backends.
    List,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },

    /// Process a coding task with the configured agent.
    Run {
        /// Task description.
        task: String,

        /// Extra context as a JSON object.
        #[arg(long)]
        context: Option<String>,
    },

    /// Review a diff with the configured agent.
    Review {
        /// File containing the diff to review.
        diff_file: PathBuf,
    },

    /// Analyse CI error logs and prepare fixes.
    FixCi {
        /// Branch the failures occurred on.
        branch: String,

        /// Log files; each file name becomes the error type.
        #[arg(required = true)]
        logs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing subscriber with verbosity level
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Config { show } => cmd_config(cli.config.as_deref(), show),
        Commands::Run { task, context } => {
            let agent = make_agent(cli.config.as_deref())?;
            let context = parse_context(context.as_deref())?;
            print_response(&agent.process_task(&task, context.as_ref()))
        }
        Commands::Review { diff_file } => {
            let agent = make_agent(cli.config.as_deref())?;
            let diff = std::fs::read_to_string(&diff_file)
                .with_context(|| format!("failed to read {}", diff_file.display()))?;
            print_response(&agent.review_code(&diff, None))
        }
        Commands::FixCi { branch, logs } => {
            let agent = make_agent(cli.config.as_deref())?;
            let error_logs = read_error_logs(&logs)?;
            print_response(&agent.fix_ci_errors(&error_logs, &branch))
        }
    }
}

fn cmd_list() -> Result<()> {
    let factory = AgentFactory::new();
    println!(
        "{:<12} {:<18} {:<28} {}",
        "type", "credential", "default model", "capabilities"
    );
    for agent_type in AgentType::ALL {
        // Construction only checks that a credential is present, so the
        // listing can use a placeholder.
        let agent = factory.create(agent_type, Some("unused".to_string()), None)?;
        let capabilities: Vec<String> = agent.capabilities().into_keys().collect();
        println!(
            "{:<12} {:<18} {:<28} {}",
            agent_type.as_str(),
            agent_type.credential_env(),
            agent.config().model.as_deref().unwrap_or("-"),
            capabilities.join(", ")
        );
    }
    Ok(())
}

fn cmd_config(path: Option<&Path>, show: bool) -> Result<()> {
    let config = load_config(path)?;
    if show {
        println!("{config:#?}");
    } else {
        println!("Configuration for '{}' is valid.", config.agent_type);
    }
    Ok(())
}

/// Load configuration from the given or discovered file, falling back to
/// environment variables when no file exists.
fn load_config(path: Option<&Path>) -> Result<agentforge_config::AgentConfig> {
    match agentforge_config::load_from_file(path) {
        Ok(config) => Ok(config),
        Err(agentforge_config::ConfigError::NotFound(p)) if path.is_none() => {
            info!(path = %p.display(), "no config file found, reading environment");
            agentforge_config::load_from_env().map_err(Into::into)
        }
        Err(e) => Err(e.into()),
    }
}

fn make_agent(path: Option<&Path>) -> Result<Box<dyn CodingAgent>> {
    let mut config = load_config(path)?;
    if config.api_key.is_none() {
        config.api_key = std::env::var(config.agent_type.credential_env()).ok();
    }
    let factory = AgentFactory::new();
    factory.create_from_config(config).map_err(Into::into)
}

fn parse_context(raw: Option<&str>) -> Result<Option<TaskContext>> {
    match raw {
        Some(s) => {
            let context: TaskContext =
                serde_json::from_str(s).context("--context must be a JSON object")?;
            Ok(Some(context))
        }
        None => Ok(None),
    }
}

fn read_error_logs(logs: &[PathBuf]) -> Result<BTreeMap<String, String>> {
    let mut error_logs = BTreeMap::new();
    for path in logs {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        error_logs.insert(name, content);
    }
    Ok(error_logs)
}

fn print_response(response: &AgentResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    if response.success { Ok(()) } else { anyhow::bail!("operation failed") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_context_accepts_json_object() {
        let context = parse_context(Some(r#"{"issue": 42}"#)).unwrap().unwrap();
        assert_eq!(context.get("issue"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_parse_context_rejects_non_object() {
        assert!(parse_context(Some("[1, 2]")).is_err());
    }

    #[test]
    fn test_parse_context_none() {
        assert!(parse_context(None).unwrap().is_none());
    }

    #[test]
    fn test_read_error_logs_uses_file_stem() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pytest.log");
        std::fs::write(&path, "assertion failed").unwrap();

        let logs = read_error_logs(&[path]).unwrap();
        assert_eq!(logs.get("pytest").map(String::as_str), Some("assertion failed"));
    }

    #[test]
    fn test_load_config_explicit_missing_path_errors() {
        let result = load_config(Some(Path::new("/nonexistent/.agentforge.toml")));
        assert!(result.is_err());
    }
}
