//! The agent loop implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tickerchat_core::error::AgentError;
use tickerchat_core::message::{Conversation, Message, MessageToolCall};
use tickerchat_core::provider::{Provider, ProviderRequest};
use tickerchat_core::tool::{ToolCall, ToolRegistry};

use crate::router::{self, TurnDecision};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful stock market assistant. \
You can answer general questions directly. When the user asks about market \
movers, gainers, losers, or screening stocks, use the simple_screener tool \
and summarize its results concisely. Do not invent prices or tickers.";

/// The loop's position between model and tool invocations.
enum LoopState {
    /// The next step is a model invocation.
    AwaitingModel,
    /// The model requested these tools; execute them before invoking again.
    AwaitingTools(Vec<MessageToolCall>),
    /// The turn is complete with this final answer.
    Done(String),
}

/// The core agent loop that orchestrates LLM calls and tool execution.
///
/// One `run` call handles one user turn: it alternates model invocations
/// and tool executions against the session log until the model produces a
/// plain text answer. Every committed step is appended to the log before
/// the next await, so a failed or cancelled run never leaves a half-written
/// turn behind.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,

    /// Maximum model invocations per user turn.
    max_round_trips: u32,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_round_trips: 10,
        }
    }

    /// Set the maximum number of model invocations per turn.
    pub fn with_max_round_trips(mut self, max: u32) -> Self {
        self.max_round_trips = max;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Override the built-in system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// The model's input context: the system prompt prefixed onto the log.
    /// The prompt is loop configuration, not conversation — it is never
    /// stored in the log itself.
    fn context_messages(&self, log: &Conversation) -> Vec<Message> {
        let mut messages = Vec::with_capacity(log.len() + 1);
        messages.push(Message::system(&self.system_prompt));
        messages.extend(log.messages.iter().cloned());
        messages
    }

    /// Run one user turn to completion against the given log.
    ///
    /// Expects the user's message to already be the last entry. Returns the
    /// final answer text; the log ends with the matching assistant message.
    /// A provider failure or the round-trip bound surfaces as a typed error
    /// with the log left at the last committed message.
    pub async fn run(&self, log: &mut Conversation) -> Result<String, AgentError> {
        info!(
            session_id = %log.id,
            messages = log.len(),
            "Running agent turn"
        );

        let tool_definitions = self.tools.definitions();
        let mut round_trips: u32 = 0;
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    if round_trips >= self.max_round_trips {
                        warn!(
                            session_id = %log.id,
                            limit = self.max_round_trips,
                            "Round-trip limit exceeded"
                        );
                        return Err(AgentError::RoundTripLimitExceeded {
                            limit: self.max_round_trips,
                        });
                    }
                    round_trips += 1;
                    debug!(session_id = %log.id, round_trip = round_trips, "Invoking model");

                    let request = ProviderRequest {
                        model: self.model.clone(),
                        messages: self.context_messages(log),
                        temperature: self.temperature,
                        max_tokens: self.max_tokens,
                        tools: tool_definitions.clone(),
                    };

                    let response = self.provider.complete(request).await?;

                    // Drop malformed (blank-name) call markers before the
                    // message is logged, so every logged tool call gets a
                    // matching tool result.
                    let mut message = response.message;
                    message.tool_calls.retain(|c| !c.name.trim().is_empty());

                    match router::route(&message) {
                        TurnDecision::Finish => {
                            let text = message.content.clone();
                            log.push(message);
                            LoopState::Done(text)
                        }
                        TurnDecision::Continue(calls) => {
                            log.push(message);
                            LoopState::AwaitingTools(calls)
                        }
                    }
                }

                LoopState::AwaitingTools(calls) => {
                    debug!(tool_count = calls.len(), "Executing tool calls");

                    for tc in &calls {
                        let call = ToolCall::from_message_call(tc);
                        match self.tools.execute(&call).await {
                            Ok(result) => {
                                log.push(Message::tool_result(&tc.id, &result.output));
                            }
                            Err(e) => {
                                // Report the failure back to the model so it
                                // can recover; the turn itself continues.
                                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                                log.push(Message::tool_result(&tc.id, format!("Error: {e}")));
                            }
                        }
                    }
                    LoopState::AwaitingModel
                }

                LoopState::Done(text) => return Ok(text),
            };
        }
    }
}
