//! Factory and constructor registry for agent types.
//!
//! The [`AgentFactory`] owns the mapping from [`AgentType`] to the
//! constructor for that backend. It is created at startup with all
//! built-ins registered and may be extended (entries added or replaced,
//! never removed) via [`AgentFactory::register`]. There is no global
//! instance; hosts create one and thread it through explicitly.

use std::collections::HashMap;

use tracing::debug;

use agentforge_config::{AgentConfig, AgentType, ConfigError};

use crate::agent::{AgentError, CodingAgent};
use crate::agents::{ClaudeCodeAgent, CodexAgent, CopilotAgent, GeminiAgent, SweAgent};

/// Constructor signature every registered backend must provide.
///
/// The signature itself enforces the contract: a registered constructor
/// can only produce a [`CodingAgent`] implementation, checked at compile
/// time rather than on registration.
pub type AgentConstructor = fn(AgentConfig) -> Result<Box<dyn CodingAgent>, AgentError>;

/// Factory for creating coding agents from a type tag or configuration.
///
/// The factory itself does no locking; wrap it in a `Mutex` if `register`
/// and `create` may race across threads.
pub struct AgentFactory {
    constructors: HashMap<AgentType, AgentConstructor>,
}

impl AgentFactory {
    /// A factory with every built-in backend registered.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register(AgentType::ClaudeCode, |c| Ok(Box::new(ClaudeCodeAgent::new(c)?)));
        factory.register(AgentType::Gemini, |c| Ok(Box::new(GeminiAgent::new(c)?)));
        factory.register(AgentType::Codex, |c| Ok(Box::new(CodexAgent::new(c)?)));
        factory.register(AgentType::SweAgent, |c| Ok(Box::new(SweAgent::new(c)?)));
        factory.register(AgentType::Copilot, |c| Ok(Box::new(CopilotAgent::new(c)?)));
        factory
    }

    /// A factory with nothing registered. Useful for hosts that want full
    /// control over the available backends.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create an agent of the given type.
    ///
    /// When `api_key` is `None`, the credential is resolved from the
    /// type's environment variable ([`AgentType::credential_env`]).
    pub fn create(
        &self,
        agent_type: AgentType,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Box<dyn CodingAgent>, AgentError> {
        self.create_with_settings(agent_type, api_key, model, toml::value::Table::new())
    }

    /// Create an agent with additional settings.
    ///
    /// Recognised keys (`max_tokens`, `temperature`, `system_prompt`,
    /// `allowed_tools`) override the corresponding config fields; everything
    /// else lands in [`AgentConfig::custom_settings`]. A recognised key with
    /// the wrong value type is a validation error.
    pub fn create_with_settings(
        &self,
        agent_type: AgentType,
        api_key: Option<String>,
        model: Option<String>,
        settings: toml::value::Table,
    ) -> Result<Box<dyn CodingAgent>, AgentError> {
        let mut config = AgentConfig::new(agent_type);
        config.api_key = api_key.or_else(|| std::env::var(agent_type.credential_env()).ok());
        config.model = model;
        apply_settings(&mut config, settings)?;
        self.create_from_config(config)
    }

    /// Create an agent from its identifier string (e.g. `"claude_code"`).
    pub fn create_by_name(
        &self,
        name: &str,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Box<dyn CodingAgent>, AgentError> {
        let agent_type: AgentType =
            name.parse().map_err(|_| AgentError::UnsupportedType {
                requested: name.to_string(),
                supported: AgentType::supported_list(),
            })?;
        self.create(agent_type, api_key, model)
    }

    /// Create an agent from an already-assembled configuration. The
    /// config's credential is used as-is; no environment lookup happens.
    pub fn create_from_config(
        &self,
        config: AgentConfig,
    ) -> Result<Box<dyn CodingAgent>, AgentError> {
        let constructor = self
            .constructors
            .get(&config.agent_type)
            .ok_or(AgentError::NotRegistered(config.agent_type))?;
        debug!(agent_type = %config.agent_type, "creating agent");
        constructor(config)
    }

    /// All supported agent types, in enumeration order.
    pub fn supported(&self) -> Vec<AgentType> {
        AgentType::ALL
            .into_iter()
            .filter(|t| self.constructors.contains_key(t))
            .collect()
    }

    /// Register a constructor for an agent type, replacing any existing
    /// entry. Entries can never be removed.
    pub fn register(&mut self, agent_type: AgentType, constructor: AgentConstructor) {
        debug!(agent_type = %agent_type, "registering agent constructor");
        self.constructors.insert(agent_type, constructor);
    }

    /// Whether a constructor is registered for the given type.
    pub fn is_registered(&self, agent_type: AgentType) -> bool {
        self.constructors.contains_key(&agent_type)
    }
}

impl Default for AgentFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold a free-form settings table into a config: known keys map onto the
/// typed fields, unknown keys become custom settings.
fn apply_settings(
    config: &mut AgentConfig,
    settings: toml::value::Table,
) -> Result<(), AgentError> {
    for (key, value) in settings {
        match key.as_str() {
            "max_tokens" => {
                config.max_tokens = value
                    .as_integer()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "max_tokens must be a non-negative integer, got {value}"
                        ))
                    })?;
            }
            "temperature" => {
                config.temperature = match value {
                    toml::Value::Float(f) => f as f32,
                    toml::Value::Integer(n) => n as f32,
                    other => {
                        return Err(ConfigError::Validation(format!(
                            "temperature must be a number, got {other}"
                        ))
                        .into());
                    }
                };
            }
            "system_prompt" => {
                config.system_prompt = Some(
                    value
                        .as_str()
                        .ok_or_else(|| {
                            ConfigError::Validation(format!(
                                "system_prompt must be a string, got {value}"
                            ))
                        })?
                        .to_string(),
                );
            }
            "allowed_tools" => {
                let tools = value
                    .as_array()
                    .map(|a| {
                        a.iter()
                            .map(|v| v.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "allowed_tools must be an array of strings, got {value}"
                        ))
                    })?
                    .ok_or_else(|| {
                        ConfigError::Validation(
                            "allowed_tools must contain only strings".to_string(),
                        )
                    })?;
                config.allowed_tools = tools;
            }
            _ => {
                config.custom_settings.insert(key, value);
            }
        }
    }
    Ok(())
}
