#![deny(unsafe_code)]

//! AgentForge core — a unified abstraction over coding-agent backends.
//!
//! Provides the [`CodingAgent`] trait, one implementation per supported
//! backend (Claude Code, Gemini, Codex, SWE-agent, Copilot), and the
//! [`AgentFactory`] that maps agent types to constructors. All
//! implementations are offline stand-ins: every operation computes its
//! response in memory without touching the network.

/// The [`CodingAgent`] trait and agent-level errors.
pub mod agent;
/// Per-backend agent implementations.
pub mod agents;
/// Factory and constructor registry for agent types.
pub mod factory;
/// Response and context types shared by all operations.
pub mod types;

pub use agent::{AgentError, CodingAgent, base_capabilities};
pub use agentforge_config::{AgentConfig, AgentType, ConfigError};
pub use agents::{ClaudeCodeAgent, CodexAgent, CopilotAgent, GeminiAgent, SweAgent};
pub use factory::{AgentConstructor, AgentFactory};
pub use types::{AgentResponse, TaskContext};
