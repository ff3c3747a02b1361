//! The tickerchat agent: routing, the loop driver, and the chat service.
//!
//! The loop driver (`AgentLoop`) runs one user turn to completion: invoke
//! the model, execute any tools it requests, feed results back, repeat until
//! the model answers in text or the round-trip bound fires. The chat service
//! (`ChatService`) wraps the loop with session lookup and locking, and is
//! the one entry point the channels call.

pub mod loop_runner;
pub mod router;
pub mod service;
pub mod testing;

pub use loop_runner::AgentLoop;
pub use router::{route, TurnDecision};
pub use service::{AssistantReply, ChatService};
