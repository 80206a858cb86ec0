//! Copilot backend.
//!
//! Stand-in for GitHub Copilot. Copilot rides on an OpenAI backend, so it
//! shares `OPENAI_API_KEY` with Codex and SWE-agent.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::debug;

use agentforge_config::{AgentConfig, AgentType};

use crate::agent::{AgentError, CodingAgent, base_capabilities};
use crate::types::{AgentResponse, TaskContext, context_value, preview};

use super::{finalize_config, run_operation};

/// Copilot agent.
#[derive(Debug)]
pub struct CopilotAgent {
    config: AgentConfig,
}

impl CopilotAgent {
    /// Model used when the configuration does not name one.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

    /// Create the agent, validating the configuration.
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let config = finalize_config(config, AgentType::Copilot, Self::DEFAULT_MODEL)?;
        debug!(model = config.model.as_deref(), "created copilot agent");
        Ok(Self { config })
    }
}

impl CodingAgent for CopilotAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::Copilot
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn process_task(&self, task: &str, context: Option<&TaskContext>) -> AgentResponse {
        run_operation("failed to process task", || {
            Ok(AgentResponse::ok(format!(
                "Task processed by Copilot: {}",
                preview(task, 50)
            ))
            .with_change("suggestions prepared for the Copilot workspace")
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
            Ok(AgentResponse::ok("CI errors analyzed by Copilot")
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
            Ok(AgentResponse::ok("Code review completed by Copilot")
                .with_change("review findings recorded")
                .with_metadata("diff_size", json!(diff.len()))
                .with_metadata("context", context_value(context)?))
        })
    }

    fn capabilities(&self) -> BTreeMap<String, bool> {
        let mut caps = base_capabilities();
        for name in ["ide_integration", "inline_completion", "pr_summaries"] {
            caps.insert(name.to_string(), true);
        }
        caps
    }
}
