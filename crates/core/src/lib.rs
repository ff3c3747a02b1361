//! # tickerchat Core
//!
//! Domain types, traits, and error definitions for the tickerchat
//! conversational stock-screening agent. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! The model backend (`Provider`) and each capability (`Tool`) are traits
//! here; implementations live in their own crates and the agent loop calls
//! them without knowing which backend or tool is behind the trait.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, ProviderError, Result, SessionError, ToolError};
pub use message::{Conversation, Message, MessageToolCall, Role, SessionId};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition, Usage};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
