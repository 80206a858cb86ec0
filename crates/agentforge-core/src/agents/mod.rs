//! Agent backend implementations — one module per supported backend.
//!
//! Every backend implements the unified [`CodingAgent`] trait. Currently
//! supported:
//!
//! - **Claude Code** — Anthropic's coding agent
//! - **Gemini** — Google's Gemini CLI
//! - **Codex** — OpenAI's Codex
//! - **SWE-agent** — autonomous issue fixing on an OpenAI backend
//! - **Copilot** — GitHub Copilot on an OpenAI backend
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │ AgentFactory │────▶│ CodingAgent  │  (trait)
//! └──────────────┘     └──────┬───────┘
//!                             │
//!          ┌─────────┬────────┼─────────┬─────────┐
//!          ▼         ▼        ▼         ▼         ▼
//!     claude_code  gemini   codex   swe_agent  copilot
//! ```
//!
//! All implementations are offline stand-ins that answer with canned,
//! input-derived responses. The shape — per-backend validation, default
//! models, capability reporting — is the part that matters.

pub mod claude_code;
pub mod codex;
pub mod copilot;
pub mod gemini;
pub mod swe_agent;

pub use claude_code::ClaudeCodeAgent;
pub use codex::CodexAgent;
pub use copilot::CopilotAgent;
pub use gemini::GeminiAgent;
pub use swe_agent::SweAgent;

use agentforge_config::{AgentConfig, AgentType};

use crate::agent::AgentError;
use crate::types::AgentResponse;

/// Shared construction path for all backends: auto-tag the config with the
/// backend's own type, require a credential, validate, and fill in the
/// backend default model. Runs before the config is stored, so the stored
/// value is final.
pub(crate) fn finalize_config(
    mut config: AgentConfig,
    agent_type: AgentType,
    default_model: &str,
) -> Result<AgentConfig, AgentError> {
    // Callers need not pre-tag hand-built configs.
    config.agent_type = agent_type;

    if config.api_key.as_deref().is_none_or(str::is_empty) {
        return Err(AgentError::MissingCredential {
            agent: agent_type,
            env: agent_type.credential_env(),
        });
    }
    config.validate()?;

    if config.model.is_none() {
        config.model = Some(default_model.to_string());
    }
    Ok(config)
}

/// Run an operation body, converting any failure while assembling the
/// response into a failed [`AgentResponse`]. Operations never propagate
/// errors past the trait boundary.
pub(crate) fn run_operation(
    fallback_message: &str,
    op: impl FnOnce() -> Result<AgentResponse, serde_json::Error>,
) -> AgentResponse {
    op().unwrap_or_else(|e| AgentResponse::failure(fallback_message, e.to_string()))
}
