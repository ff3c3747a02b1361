//! CLI channel — interactive terminal-based chat.
//!
//! This is the simplest channel: reads from stdin, writes to stdout. Used
//! for `tickerchat chat` interactive mode.

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::{Channel, ChannelError, ChannelMessage};

/// Interactive CLI channel for terminal-based chat.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }

    /// Whether a line is one of the recognized quit commands.
    pub fn is_exit_command(line: &str) -> bool {
        matches!(line.trim(), "exit" | "quit" | "/exit" | "/quit" | ":q")
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        if CliChannel::is_exit_command(&line) {
                            break;
                        }

                        let msg = ChannelMessage {
                            sender: "local_user".into(),
                            content: line,
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx
                            .send(Err(ChannelError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, content: &str) -> Result<(), ChannelError> {
        println!("{content}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_channel_properties() {
        let ch = CliChannel::new();
        assert_eq!(ch.name(), "cli");
    }

    #[test]
    fn exit_commands_recognized() {
        for cmd in ["exit", "quit", "/exit", "/quit", ":q", "  exit  "] {
            assert!(CliChannel::is_exit_command(cmd), "{cmd}");
        }
        assert!(!CliChannel::is_exit_command("exit now"));
        assert!(!CliChannel::is_exit_command("hello"));
    }
}
