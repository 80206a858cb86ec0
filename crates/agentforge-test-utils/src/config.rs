//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AgentConfig`] values
//! without repeating boilerplate across crate boundaries.

use agentforge_config::{AgentConfig, AgentType};

/// Fluent builder for [`AgentConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new(AgentType::ClaudeCode)
///     .api_key("test_key")
///     .model("claude-sonnet-4-5-20250929")
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AgentConfig,
}

impl TestConfigBuilder {
    pub fn new(agent_type: AgentType) -> Self {
        Self {
            config: AgentConfig::new(agent_type),
        }
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.config.api_key = Some(key.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.config.model = Some(model.to_string());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn system_prompt(mut self, prompt: &str) -> Self {
        self.config.system_prompt = Some(prompt.to_string());
        self
    }

    pub fn allowed_tool(mut self, tool: &str) -> Self {
        self.config.allowed_tools.push(tool.to_string());
        self
    }

    pub fn custom_setting(mut self, key: &str, value: toml::Value) -> Self {
        self.config.custom_settings.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> AgentConfig {
        self.config
    }
}
