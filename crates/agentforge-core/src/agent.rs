//! The [`CodingAgent`] trait — the uniform operation set every agent
//! backend implements.
//!
//! Construction validates the configuration exactly once, before any
//! operation can be called. The operations themselves never fail at the
//! call site: anything that goes wrong while assembling a response is
//! captured and surfaced as a failed [`AgentResponse`].

use std::collections::BTreeMap;

use agentforge_config::{AgentConfig, AgentType, ConfigError};

use crate::types::{AgentResponse, TaskContext};

/// Errors from agent construction and factory dispatch.
///
/// Operation calls never return these; configuration and construction
/// problems do, and the caller must handle them.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("unsupported agent type: {requested} (supported: {supported})")]
    UnsupportedType { requested: String, supported: String },

    #[error("no implementation registered for agent type: {0}")]
    NotRegistered(AgentType),

    #[error("{env} is required for {agent}")]
    MissingCredential { agent: AgentType, env: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Capabilities every agent backend supports.
pub const BASE_CAPABILITIES: [&str; 5] = [
    "task_processing",
    "ci_fix",
    "code_review",
    "test_generation",
    "documentation",
];

/// The base capability map shared by all backends, every entry `true`.
///
/// Backends extend this map with their own capabilities; they never remove
/// base entries.
pub fn base_capabilities() -> BTreeMap<String, bool> {
    BASE_CAPABILITIES
        .iter()
        .map(|name| (name.to_string(), true))
        .collect()
}

/// A coding agent that can process tasks, fix CI failures, and review
/// diffs.
///
/// All implementations in this crate are offline stand-ins: each operation
/// always returns a computed [`AgentResponse`] and never blocks on I/O.
pub trait CodingAgent: std::fmt::Debug + Send + Sync {
    /// The agent type this implementation handles.
    fn agent_type(&self) -> AgentType;

    /// The configuration the agent was constructed with.
    fn config(&self) -> &AgentConfig;

    /// Process a coding task described in free text.
    fn process_task(&self, task: &str, context: Option<&TaskContext>) -> AgentResponse;

    /// Analyse CI error logs (log name → content) for a branch and prepare
    /// fixes.
    fn fix_ci_errors(
        &self,
        error_logs: &BTreeMap<String, String>,
        branch: &str,
    ) -> AgentResponse;

    /// Review a diff and report findings.
    fn review_code(&self, diff: &str, context: Option<&TaskContext>) -> AgentResponse;

    /// Capability names this backend supports.
    fn capabilities(&self) -> BTreeMap<String, bool> {
        base_capabilities()
    }
}
