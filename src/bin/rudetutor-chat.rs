//! Interactive chat with the rude full-stack tutor.
//!
//! This binary provides a REPL interface for conversing with the tutor
//! persona via the Generative Language API.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! rudetutor-chat
//!
//! # Specify a model
//! rudetutor-chat --model gemini-2.5-pro
//!
//! # Disable colors (useful for piping output)
//! rudetutor-chat --no-color
//! ```
//!
//! The API key is read from RUDETUTOR_API_KEY, falling back to
//! GEMINI_API_KEY.
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use rudetutor::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, Submission,
    help_text, parse_command,
};
use rudetutor::{Gemini, Model, StderrLogger};

/// Main entry point for the rudetutor-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("rudetutor-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Gemini::new(None)?;
    let mut session = ChatSession::new(client, config);
    session.set_logger(Box::new(StderrLogger));
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Rude Tutor (model: {})", session.model());
    println!("Ask about full-stack development. Anything else is at your own risk.");
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Finally. Goodbye.");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            session.set_model(model);
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the tutor
                println!("Tutor:");
                renderer.begin_thinking();
                let outcome = session.submit(line).await;
                renderer.end_thinking();

                match outcome {
                    Submission::Completed => {
                        if let Some(reply) = session.messages().last() {
                            renderer.print_reply(&reply.content);
                        }
                    }
                    Submission::Busy => {
                        renderer.print_error("A request is already in flight.");
                    }
                    Submission::IgnoredEmpty => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nFinally. Goodbye.");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats<B: rudetutor::chat::GenerationBackend>(session: &ChatSession<B>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Requests: {} ({} fell back to a canned reply)",
        stats.total_requests, stats.total_failures
    );
}
