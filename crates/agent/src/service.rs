//! The chat service: sessions plus the agent loop behind one call.

use std::sync::Arc;

use tracing::debug;

use tickerchat_core::error::AgentError;
use tickerchat_core::message::{Conversation, Message, SessionId};
use tickerchat_session::SessionStore;

use crate::loop_runner::AgentLoop;

/// The assistant's final answer for one user turn.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub session_id: SessionId,
    pub text: String,
}

/// The entry point the channels call: one free-text question in, one
/// assistant reply out, with session state handled internally.
///
/// Reusing a session id resumes its conversation; a fresh id starts an
/// isolated one. At most one turn per session runs at a time — a concurrent
/// caller gets `SessionError::Busy` rather than interleaving logs.
pub struct ChatService {
    agent: AgentLoop,
    store: Arc<SessionStore>,
}

impl ChatService {
    pub fn new(agent: AgentLoop, store: Arc<SessionStore>) -> Self {
        Self { agent, store }
    }

    /// Run one user turn against the given session.
    ///
    /// On failure the session's log keeps every fully-committed message and
    /// nothing else; the session itself stays usable for the next turn.
    pub async fn send(
        &self,
        session: &SessionId,
        text: impl Into<String>,
    ) -> Result<AssistantReply, AgentError> {
        let handle = self.store.get_or_create(session).await;
        let mut log = handle.try_acquire()?;

        debug!(session_id = %session, "Accepted user turn");
        log.push(Message::user(text));

        let answer = self.agent.run(&mut log).await?;
        Ok(AssistantReply {
            session_id: session.clone(),
            text: answer,
        })
    }

    /// A point-in-time copy of a session's log, if the session exists.
    pub async fn history(&self, session: &SessionId) -> Option<Conversation> {
        match self.store.get(session).await {
            Some(handle) => Some(handle.snapshot().await),
            None => None,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_text_response, SequentialMockProvider};
    use tickerchat_core::error::SessionError;
    use tickerchat_core::message::Role;
    use tickerchat_core::tool::ToolRegistry;

    fn service(provider: SequentialMockProvider) -> ChatService {
        let agent = AgentLoop::new(
            Arc::new(provider),
            "mock-model",
            0.7,
            Arc::new(ToolRegistry::new()),
        );
        ChatService::new(agent, Arc::new(SessionStore::new()))
    }

    #[tokio::test]
    async fn send_returns_reply_and_records_history() {
        let svc = service(SequentialMockProvider::single_text("Hi!"));
        let id = SessionId::from("desk-1");

        let reply = svc.send(&id, "Hello").await.unwrap();
        assert_eq!(reply.text, "Hi!");
        assert_eq!(reply.session_id, id);

        let history = svc.history(&id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.messages[0].role, Role::User);
        assert_eq!(history.messages[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn same_session_resumes_context() {
        let svc = service(SequentialMockProvider::new(vec![
            make_text_response("Nice to meet you, Sam."),
            make_text_response("Your name is Sam."),
        ]));
        let id = SessionId::from("desk-2");

        svc.send(&id, "My name is Sam").await.unwrap();
        svc.send(&id, "What's my name?").await.unwrap();

        // Both user/assistant pairs, in order.
        let history = svc.history(&id).await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.messages[0].content, "My name is Sam");
        assert_eq!(history.messages[2].content, "What's my name?");
    }

    #[tokio::test]
    async fn distinct_sessions_are_isolated() {
        let svc = service(SequentialMockProvider::new(vec![
            make_text_response("reply a"),
            make_text_response("reply b"),
        ]));

        svc.send(&SessionId::from("a"), "question a").await.unwrap();
        svc.send(&SessionId::from("b"), "question b").await.unwrap();

        let ha = svc.history(&SessionId::from("a")).await.unwrap();
        let hb = svc.history(&SessionId::from("b")).await.unwrap();
        assert!(ha.messages.iter().all(|m| m.content != "question b"));
        assert!(hb.messages.iter().all(|m| m.content != "question a"));
    }

    #[tokio::test]
    async fn busy_session_rejects_concurrent_turn() {
        let svc = service(SequentialMockProvider::single_text("unused"));
        let id = SessionId::from("contended");

        let handle = svc.store().get_or_create(&id).await;
        let _guard = handle.try_acquire().unwrap();

        let err = svc.send(&id, "second caller").await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Session(SessionError::Busy(ref s)) if s == &id
        ));
    }

    #[tokio::test]
    async fn history_of_unknown_session_is_none() {
        let svc = service(SequentialMockProvider::single_text("unused"));
        assert!(svc.history(&SessionId::from("nobody")).await.is_none());
    }

    #[tokio::test]
    async fn cancelled_turn_stops_at_last_committed_message() {
        use crate::testing::{make_tool_call, make_tool_call_response, StallingProvider};
        use std::time::Duration;

        // One tool-call response, then the provider hangs on the follow-up
        // invocation mid-turn.
        let provider = StallingProvider::new(vec![make_tool_call_response(
            vec![make_tool_call("crystal_ball", serde_json::json!({}))],
            "",
        )]);
        let agent = AgentLoop::new(
            Arc::new(provider),
            "mock-model",
            0.7,
            Arc::new(ToolRegistry::new()),
        );
        let svc = ChatService::new(agent, Arc::new(SessionStore::new()));
        let id = SessionId::from("dropped");

        // Dropping the timed-out future cancels the in-flight turn.
        let result =
            tokio::time::timeout(Duration::from_millis(50), svc.send(&id, "gaze ahead")).await;
        assert!(result.is_err());

        // The session lock is released and the log ends exactly at the last
        // committed message: user, assistant(call), tool result.
        let handle = svc.store().get(&id).await.unwrap();
        let log = handle.try_acquire().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.messages[0].role, Role::User);
        assert!(log.messages[1].requests_tools());
        assert_eq!(log.messages[2].role, Role::Tool);
    }
}
