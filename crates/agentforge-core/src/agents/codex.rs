//! Codex backend.
//!
//! Stand-in for OpenAI's Codex coding agent.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::debug;

use agentforge_config::{AgentConfig, AgentType};

use crate::agent::{AgentError, CodingAgent, base_capabilities};
use crate::types::{AgentResponse, TaskContext, context_value, preview};

use super::{finalize_config, run_operation};

/// Codex agent.
#[derive(Debug)]
pub struct CodexAgent {
    config: AgentConfig,
}

impl CodexAgent {
    /// Model used when the configuration does not name one.
    pub const DEFAULT_MODEL: &'static str = "gpt-4-turbo";

    /// Create the agent, validating the configuration.
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let config = finalize_config(config, AgentType::Codex, Self::DEFAULT_MODEL)?;
        debug!(model = config.model.as_deref(), "created codex agent");
        Ok(Self { config })
    }
}

impl CodingAgent for CodexAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::Codex
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn process_task(&self, task: &str, context: Option<&TaskContext>) -> AgentResponse {
        run_operation("failed to process task", || {
            Ok(AgentResponse::ok(format!(
                "Task processed by Codex: {}",
                preview(task, 50)
            ))
            .with_change("implementation prepared via the OpenAI API")
            .with_metadata("model", json!(self.config.model))
            .with_metadata("context", context_value(context)?))
        })
    }

    fn fix_ci_errors(
        &self,
        error_logs: &BTreeMap<String, String>,
        branch: &str,
    ) -> AgentResponse {
        run_operation("failed to fix CI errors", || {
            let error_types: Vec<&str> = error_logs.keys().map(String::as_str).collect();
            Ok(AgentResponse::ok("CI errors analyzed by Codex")
                .with_change(format!(
                    "analysis of {} error types completed",
                    error_logs.len()
                ))
                .with_metadata("branch", json!(branch))
                .with_metadata("error_count", json!(error_logs.len()))
                .with_metadata("error_types", serde_json::to_value(error_types)?))
        })
    }

    fn review_code(&self, diff: &str, context: Option<&TaskContext>) -> AgentResponse {
        run_operation("failed to review code", || {
            Ok(AgentResponse::ok("Code review completed by Codex")
                .with_change("review findings recorded")
                .with_metadata("diff_size", json!(diff.len()))
                .with_metadata("context", context_value(context)?))
        })
    }

    fn capabilities(&self) -> BTreeMap<String, bool> {
        let mut caps = base_capabilities();
        for name in ["function_calling", "json_mode", "vision"] {
            caps.insert(name.to_string(), true);
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentforge_test_utils::config::TestConfigBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_model() {
        let config = TestConfigBuilder::new(AgentType::Codex).api_key("k").build();
        let agent = CodexAgent::new(config).unwrap();
        assert_eq!(agent.config().model.as_deref(), Some("gpt-4-turbo"));
    }

    #[test]
    fn test_requires_api_key() {
        let config = TestConfigBuilder::new(AgentType::Codex).build();
        let err = CodexAgent::new(config).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"), "{err}");
    }

    #[test]
    fn test_capabilities() {
        let config = TestConfigBuilder::new(AgentType::Codex).api_key("k").build();
        let agent = CodexAgent::new(config).unwrap();
        let caps = agent.capabilities();
        assert_eq!(caps.get("ci_fix"), Some(&true));
        assert_eq!(caps.get("function_calling"), Some(&true));
        assert_eq!(caps.get("json_mode"), Some(&true));
        assert_eq!(caps.get("vision"), Some(&true));
    }

    #[test]
    fn test_operations_return_responses() {
        let config = TestConfigBuilder::new(AgentType::Codex).api_key("k").build();
        let agent = CodexAgent::new(config).unwrap();
        assert!(agent.process_task("refactor the parser", None).success);
        assert!(agent.fix_ci_errors(&BTreeMap::new(), "main").success);
        assert!(agent.review_code("", None).success);
    }
}
