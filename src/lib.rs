// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod persona;
pub mod render;
pub mod types;

// Re-exports
pub use client::Gemini;
pub use client_logger::{ClientLogger, StderrLogger};
pub use error::{Error, Result};
pub use types::*;
