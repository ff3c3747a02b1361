//! LLM provider implementations for tickerchat.
//!
//! All providers implement the `tickerchat_core::Provider` trait. The
//! factory builds the right provider from configuration; the default is a
//! local Ollama endpoint, so the agent works with no API key at all.

pub mod factory;
pub mod openai_compat;

pub use factory::build_from_config;
pub use openai_compat::OpenAiCompatProvider;
