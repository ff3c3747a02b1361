//! Error types for the tickerchat domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The split mirrors the
//! propagation policy: provider failures and the round-trip bound are fatal
//! to the current turn and reach the caller typed; tool failures are absorbed
//! into the conversation as diagnostic tool results and never surface here.

use thiserror::Error;

use crate::message::SessionId;

/// The top-level error type returned by the agent to its caller.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model backend failed — unreachable, rejected the request, or
    /// produced output we could not parse. The session log is left at the
    /// last committed turn boundary.
    #[error("Model invocation failed: {0}")]
    Provider(#[from] ProviderError),

    /// The model kept requesting tools without converging. The partial log
    /// is preserved for inspection.
    #[error("Round-trip limit exceeded: {limit} model invocations in one turn")]
    RoundTripLimitExceeded { limit: u32 },

    /// Session-level contention or lookup failure.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our top-level error.
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Tool failures. These are recovered locally by the loop driver: the
/// executor converts them to an error-bearing tool result so the model can
/// adapt, rather than aborting the turn.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Another run is in flight for this session. At most one loop execution
    /// may hold a session at a time; the second caller fails fast.
    #[error("Session '{0}' is busy with another request")]
    Busy(SessionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_status() {
        let err = AgentError::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn round_trip_limit_displays_limit() {
        let err = AgentError::RoundTripLimitExceeded { limit: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn busy_session_names_the_session() {
        let err = AgentError::Session(SessionError::Busy(SessionId::from("desk-7")));
        assert!(err.to_string().contains("desk-7"));
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn tool_error_displays_tool_name() {
        let err = ToolError::ExecutionFailed {
            tool_name: "simple_screener".into(),
            reason: "upstream data source unavailable".into(),
        };
        assert!(err.to_string().contains("simple_screener"));
    }
}
