//! User-facing channels for tickerchat.
//!
//! A channel relays user text to the chat service and replies back out.
//! There is one implementation today:
//! - **CLI** — interactive terminal chat (stdin/stdout)

pub mod cli;

pub use cli::CliChannel;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// One inbound user message from a channel.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub sender: String,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}

/// A source of user messages and a sink for replies.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Start receiving. The stream ends when the user quits or the channel
    /// disconnects.
    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError>;

    /// Deliver a reply to the user.
    async fn send(&self, content: &str) -> Result<(), ChannelError>;
}
