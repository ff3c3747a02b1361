//! `tickerchat chat` — Interactive or single-message chat mode.

use std::sync::Arc;

use tickerchat_agent::{AgentLoop, ChatService};
use tickerchat_channels::{Channel, CliChannel};
use tickerchat_config::AppConfig;
use tickerchat_core::error::AgentError;
use tickerchat_core::message::SessionId;
use tickerchat_session::SessionStore;
use tickerchat_tools::screener::ScreenerKind;

pub async fn run(
    message: Option<String>,
    session: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = tickerchat_providers::build_from_config(&config)?;
    let tools = Arc::new(tickerchat_tools::default_registry());

    let mut agent = AgentLoop::new(
        provider,
        config.provider_model(&config.default_provider),
        config.default_temperature,
        tools,
    )
    .with_max_tokens(config.default_max_tokens)
    .with_max_round_trips(config.max_round_trips);

    if let Some(prompt) = &config.system_prompt {
        agent = agent.with_system_prompt(prompt.clone());
    }

    let service = ChatService::new(agent, Arc::new(SessionStore::new()));
    let session_id = session.map(SessionId::from).unwrap_or_else(SessionId::new);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let result = service.send(&session_id, &msg).await;
        eprint!("\r              \r");
        match result {
            Ok(reply) => println!("{}", reply.text),
            Err(e) => return Err(e.into()),
        }
    } else {
        interactive(&service, &session_id, &config).await?;
    }

    Ok(())
}

async fn interactive(
    service: &ChatService,
    session_id: &SessionId,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║       tickerchat — Stock Screener Chat       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", config.provider_model(&config.default_provider));
    println!("  Session:   {session_id}");
    println!();
    println!("  Ask anything, or try a screener:");
    for kind in ScreenerKind::ALL {
        println!("    • {}", kind.title());
    }
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let channel = CliChannel::new();
    let mut rx = channel
        .start()
        .await
        .map_err(|e| format!("Channel error: {e}"))?;

    print!("  You > ");
    use std::io::Write;
    std::io::stdout().flush()?;

    while let Some(result) = rx.recv().await {
        match result {
            Ok(chan_msg) => {
                eprint!("  ...");

                match service.send(session_id, &chan_msg.content).await {
                    Ok(reply) => {
                        eprint!("\r     \r");
                        println!();
                        for line in reply.text.lines() {
                            println!("  Assistant > {line}");
                        }
                        println!();
                    }
                    Err(e) => {
                        eprint!("\r     \r");
                        // A failed turn never kills the session; report it
                        // and keep reading.
                        report_turn_error(&e);
                        println!();
                    }
                }

                print!("  You > ");
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

/// Print a typed turn failure with a hint where one helps.
fn report_turn_error(err: &AgentError) {
    eprintln!("  [Error] {err}");
    if let AgentError::RoundTripLimitExceeded { .. } = err {
        eprintln!("  The conversation so far is preserved; try rephrasing your question.");
    }
}
