#![deny(unsafe_code)]

//! Configuration loading, validation, and persistence for AgentForge.
//!
//! Loads TOML configuration files and validates them against the expected
//! schema. Provides the [`AgentConfig`] type as the central configuration
//! structure and the [`loader`] module for file- and environment-based
//! loading.

/// File- and environment-based configuration loading.
pub mod loader;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use loader::{DEFAULT_CONFIG_FILE, load_from_env, load_from_file, save_to_file};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// The coding-agent backends AgentForge can drive.
///
/// The string form of each identifier (`claude_code`, `gemini`, ...) is what
/// appears in configuration files and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentType {
    ClaudeCode,
    Gemini,
    Codex,
    SweAgent,
    Copilot,
}

impl AgentType {
    /// All supported agent types, in declaration order.
    pub const ALL: [AgentType; 5] = [
        AgentType::ClaudeCode,
        AgentType::Gemini,
        AgentType::Codex,
        AgentType::SweAgent,
        AgentType::Copilot,
    ];

    /// The canonical string form used in config files and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::ClaudeCode => "claude_code",
            AgentType::Gemini => "gemini",
            AgentType::Codex => "codex",
            AgentType::SweAgent => "swe_agent",
            AgentType::Copilot => "copilot",
        }
    }

    /// The environment variable holding this agent's API credential.
    ///
    /// Several agents share `OPENAI_API_KEY`: Codex talks to OpenAI
    /// directly, while SWE-agent and Copilot use an OpenAI-backed model.
    pub fn credential_env(&self) -> &'static str {
        match self {
            AgentType::ClaudeCode => "ANTHROPIC_API_KEY",
            AgentType::Gemini => "GOOGLE_API_KEY",
            AgentType::Codex => "OPENAI_API_KEY",
            AgentType::SweAgent => "OPENAI_API_KEY",
            AgentType::Copilot => "OPENAI_API_KEY",
        }
    }

    /// Comma-separated list of all supported identifier strings.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "invalid agent type {s:?} (supported: {})",
                    Self::supported_list()
                ))
            })
    }
}

/// Configuration for a coding agent.
///
/// Built by the [`loader`], or directly by callers that assemble a config in
/// code. The credential is never persisted; it is resolved from the
/// environment by the factory in `agentforge-core`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Which agent backend this configuration targets.
    pub agent_type: AgentType,

    /// API credential. Resolved from the environment when absent.
    pub api_key: Option<String>,

    /// Model name. Agents fill in their own default when unset.
    pub model: Option<String>,

    /// Maximum tokens the agent may generate per operation.
    pub max_tokens: u32,

    /// Sampling temperature (0.0–2.0).
    pub temperature: f32,

    /// Optional system prompt prepended to every operation.
    pub system_prompt: Option<String>,

    /// Names of tools the agent is allowed to invoke.
    pub allowed_tools: Vec<String>,

    /// Agent-specific settings from the per-agent config file section.
    pub custom_settings: toml::value::Table,
}

pub(crate) fn default_max_tokens() -> u32 {
    4096
}

pub(crate) fn default_temperature() -> f32 {
    0.7
}

impl AgentConfig {
    /// Create a configuration with default settings for the given agent type.
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            agent_type,
            api_key: None,
            model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: None,
            allowed_tools: Vec::new(),
            custom_settings: toml::value::Table::new(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "max_tokens must be non-zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature must be in [0.0, 2.0], got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_agent_type_roundtrip() {
        for t in AgentType::ALL {
            assert_eq!(t.as_str().parse::<AgentType>().unwrap(), t);
        }
    }

    #[test]
    fn test_agent_type_display() {
        assert_eq!(AgentType::ClaudeCode.to_string(), "claude_code");
        assert_eq!(AgentType::SweAgent.to_string(), "swe_agent");
    }

    #[test]
    fn test_agent_type_rejects_unknown() {
        let err = "gpt_code".parse::<AgentType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gpt_code"), "{msg}");
        // The error must enumerate every supported identifier.
        for t in AgentType::ALL {
            assert!(msg.contains(t.as_str()), "{msg}");
        }
    }

    #[test]
    fn test_credential_env_mapping() {
        assert_eq!(AgentType::ClaudeCode.credential_env(), "ANTHROPIC_API_KEY");
        assert_eq!(AgentType::Gemini.credential_env(), "GOOGLE_API_KEY");
        // Codex, SWE-agent, and Copilot intentionally share one backend key.
        assert_eq!(AgentType::Codex.credential_env(), "OPENAI_API_KEY");
        assert_eq!(AgentType::SweAgent.credential_env(), "OPENAI_API_KEY");
        assert_eq!(AgentType::Copilot.credential_env(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_default_config() {
        let config = AgentConfig::new(AgentType::Gemini);
        assert_eq!(config.agent_type, AgentType::Gemini);
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, None);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.7);
        assert!(config.allowed_tools.is_empty());
        assert!(config.custom_settings.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_zero_max_tokens() {
        let mut config = AgentConfig::new(AgentType::Codex);
        config.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_out_of_range_temperature() {
        let mut config = AgentConfig::new(AgentType::Codex);
        config.temperature = 2.5;
        assert!(config.validate().is_err());
        config.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}
