//! Chat application module for conversations with the rude tutor.
//!
//! This module provides the session controller behind the REPL binary. It
//! supports:
//!
//! - An append-only session log with one user and one assistant message per
//!   accepted submission
//! - Strictly serialized submissions guarded by an outstanding-request flag
//! - Persona-flavored fallback replies when the service fails or returns
//!   nothing usable
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`message`]: Session-log message types
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod message;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use message::{ChatRole, Message};
pub use session::{ChatSession, GenerationBackend, SessionStats, Submission};
