//! The routing decision after each model response.
//!
//! Pure function of the assistant message: the model signals "I need tools"
//! by attaching tool call requests, and "I'm done" by attaching none. There
//! is no text-based heuristic — content is never inspected.

use tickerchat_core::{Message, MessageToolCall};

/// What the loop does next after a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnDecision {
    /// Execute these tool calls, then invoke the model again.
    Continue(Vec<MessageToolCall>),

    /// The assistant message is the final answer for this turn.
    Finish,
}

/// Decide the next step from an assistant message.
///
/// Tool calls with a blank name are malformed and dropped; a message whose
/// requests are all malformed terminates like a plain text answer.
pub fn route(message: &Message) -> TurnDecision {
    let calls: Vec<MessageToolCall> = message
        .tool_calls
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .cloned()
        .collect();

    if calls.is_empty() {
        TurnDecision::Finish
    } else {
        TurnDecision::Continue(calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str) -> MessageToolCall {
        MessageToolCall {
            id: "c1".into(),
            name: name.into(),
            arguments: "{}".into(),
        }
    }

    #[test]
    fn plain_text_finishes() {
        let msg = Message::assistant("Hello there");
        assert_eq!(route(&msg), TurnDecision::Finish);
    }

    #[test]
    fn empty_content_still_finishes() {
        let msg = Message::assistant("");
        assert_eq!(route(&msg), TurnDecision::Finish);
    }

    #[test]
    fn tool_calls_continue() {
        let mut msg = Message::assistant("");
        msg.tool_calls = vec![call("simple_screener")];
        match route(&msg) {
            TurnDecision::Continue(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].name, "simple_screener");
            }
            TurnDecision::Finish => panic!("expected Continue"),
        }
    }

    #[test]
    fn content_alongside_tool_calls_still_continues() {
        let mut msg = Message::assistant("Let me check that for you.");
        msg.tool_calls = vec![call("simple_screener")];
        assert!(matches!(route(&msg), TurnDecision::Continue(_)));
    }

    #[test]
    fn blank_name_calls_are_dropped() {
        let mut msg = Message::assistant("");
        msg.tool_calls = vec![call(""), call("  ")];
        assert_eq!(route(&msg), TurnDecision::Finish);

        msg.tool_calls = vec![call(""), call("simple_screener")];
        match route(&msg) {
            TurnDecision::Continue(calls) => assert_eq!(calls.len(), 1),
            TurnDecision::Finish => panic!("expected Continue"),
        }
    }
}
