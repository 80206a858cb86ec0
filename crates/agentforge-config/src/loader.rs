//! File- and environment-based configuration loading.
//!
//! The on-disk format is a TOML file with a general `[agent]` section and an
//! optional per-agent section keyed by the identifier string:
//!
//! ```toml
//! [agent]
//! type = "claude_code"
//! max_tokens = 4096
//! temperature = 0.7
//!
//! [claude_code]
//! model = "claude-sonnet-4-5-20250929"
//! workspace_mode = "sandboxed"
//! ```
//!
//! The per-agent section's `model` overrides the general one; its full
//! contents become [`AgentConfig::custom_settings`]. The API credential is
//! never read from or written to the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AgentConfig, AgentType, ConfigError, default_max_tokens, default_temperature};

/// Default configuration file name, searched for in the working directory
/// and every ancestor.
pub const DEFAULT_CONFIG_FILE: &str = ".agentforge.toml";

/// Environment variable selecting the agent type.
pub const ENV_AGENT_TYPE: &str = "AGENTFORGE_AGENT_TYPE";
/// Environment variable selecting the model.
pub const ENV_MODEL: &str = "AGENTFORGE_MODEL";
/// Environment variable overriding `max_tokens`.
pub const ENV_MAX_TOKENS: &str = "AGENTFORGE_MAX_TOKENS";
/// Environment variable overriding `temperature`.
pub const ENV_TEMPERATURE: &str = "AGENTFORGE_TEMPERATURE";
/// Environment variable supplying a system prompt.
pub const ENV_SYSTEM_PROMPT: &str = "AGENTFORGE_SYSTEM_PROMPT";

/// On-disk representation of the configuration file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    agent: AgentSection,

    /// Any other top-level table is a per-agent settings section.
    #[serde(flatten)]
    agents: BTreeMap<String, toml::value::Table>,
}

/// The general `[agent]` section.
#[derive(Debug, Serialize, Deserialize)]
struct AgentSection {
    #[serde(rename = "type", default = "default_agent_type")]
    agent_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,

    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    #[serde(default = "default_temperature")]
    temperature: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    allowed_tools: Vec<String>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            agent_type: default_agent_type(),
            model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: None,
            allowed_tools: Vec::new(),
        }
    }
}

fn default_agent_type() -> String {
    AgentType::ALL[0].as_str().to_string()
}

/// Load configuration from a TOML file.
///
/// With an explicit `path` the file must exist at that location. Without
/// one, `.agentforge.toml` is searched for in the current working directory
/// and every parent.
pub fn load_from_file(path: Option<&Path>) -> Result<AgentConfig, ConfigError> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound(p.to_path_buf()));
            }
            p.to_path_buf()
        }
        None => find_config_file()?,
    };

    debug!(path = %path.display(), "loading agent configuration");
    let content = std::fs::read_to_string(&path)?;
    parse(&content)
}

/// Parse configuration from a TOML string.
pub fn parse(s: &str) -> Result<AgentConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(s)?;
    let agent_type: AgentType = file.agent.agent_type.parse()?;

    let section = file
        .agents
        .get(agent_type.as_str())
        .cloned()
        .unwrap_or_default();

    // The per-agent section's model wins over the general one.
    let model = section
        .get("model")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or(file.agent.model);

    let config = AgentConfig {
        agent_type,
        api_key: None, // resolved from the environment by the factory
        model,
        max_tokens: file.agent.max_tokens,
        temperature: file.agent.temperature,
        system_prompt: file.agent.system_prompt,
        allowed_tools: file.agent.allowed_tools,
        custom_settings: section,
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from `AGENTFORGE_*` environment variables.
///
/// `AGENTFORGE_AGENT_TYPE` defaults to `claude_code` when unset; an
/// unrecognised value is a validation error.
pub fn load_from_env() -> Result<AgentConfig, ConfigError> {
    let agent_type = match std::env::var(ENV_AGENT_TYPE) {
        Ok(s) => s.parse()?,
        Err(_) => AgentType::ALL[0],
    };

    let mut config = AgentConfig::new(agent_type);
    config.model = std::env::var(ENV_MODEL).ok();
    config.system_prompt = std::env::var(ENV_SYSTEM_PROMPT).ok();

    if let Ok(s) = std::env::var(ENV_MAX_TOKENS) {
        config.max_tokens = s.parse().map_err(|e| {
            ConfigError::Validation(format!("{ENV_MAX_TOKENS} must be an integer: {e}"))
        })?;
    }
    if let Ok(s) = std::env::var(ENV_TEMPERATURE) {
        config.temperature = s.parse().map_err(|e| {
            ConfigError::Validation(format!("{ENV_TEMPERATURE} must be a number: {e}"))
        })?;
    }

    config.validate()?;
    Ok(config)
}

/// Serialize a configuration back to the TOML file format.
///
/// General fields go under `[agent]`, custom settings under a section keyed
/// by the identifier string. Unset optional fields are omitted, and the
/// credential is never written.
pub fn save_to_file(config: &AgentConfig, path: Option<&Path>) -> Result<(), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?.join(DEFAULT_CONFIG_FILE),
    };

    let mut file = ConfigFile {
        agent: AgentSection {
            agent_type: config.agent_type.as_str().to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
            allowed_tools: config.allowed_tools.clone(),
        },
        agents: BTreeMap::new(),
    };
    if !config.custom_settings.is_empty() {
        file.agents.insert(
            config.agent_type.as_str().to_string(),
            config.custom_settings.clone(),
        );
    }

    let content = toml::to_string_pretty(&file)?;
    debug!(path = %path.display(), "saving agent configuration");
    std::fs::write(&path, content)?;
    Ok(())
}

/// Locate the default config file by walking from the working directory up
/// through every parent.
fn find_config_file() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir()?;
    find_config_in(&cwd)
}

fn find_config_in(start: &Path) -> Result<PathBuf, ConfigError> {
    for dir in start.ancestors() {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(ConfigError::NotFound(start.join(DEFAULT_CONFIG_FILE)))
}
