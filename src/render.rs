//! Output rendering for the chat REPL.
//!
//! This module provides a renderer trait and a plain-text implementation so
//! the binary can style output without the session controller knowing
//! anything about terminals.

use std::io::{self, Write};

/// ANSI escape code for dim text (used for the thinking indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for info lines).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for error lines).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies: plain text
/// with ANSI styling, plain text without styling (for piping/redirecting),
/// or a TUI.
pub trait Renderer: Send {
    /// Render an assistant reply.
    fn print_reply(&mut self, text: &str);

    /// Render an informational line.
    fn print_info(&mut self, info: &str);

    /// Render an error line.
    fn print_error(&mut self, error: &str);

    /// Called when a request goes out; renders a waiting indicator.
    fn begin_thinking(&mut self) {}

    /// Called when the request resolves, before the reply is rendered.
    fn end_thinking(&mut self) {}
}

/// A plain-text renderer writing to stdout, with optional ANSI styling.
#[derive(Debug, Default)]
pub struct PlainTextRenderer {
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a renderer with the given color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Renderer for PlainTextRenderer {
    fn print_reply(&mut self, text: &str) {
        println!("{}", text);
        let _ = io::stdout().flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{}", self.styled(ANSI_CYAN, info));
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("{}", self.styled(ANSI_RED, error));
    }

    fn begin_thinking(&mut self) {
        print!("{}", self.styled(ANSI_DIM, "(thinking...)"));
        let _ = io::stdout().flush();
    }

    fn end_thinking(&mut self) {
        if self.use_color {
            // Erase the indicator and return to column zero.
            print!("\r\x1b[2K");
        } else {
            println!();
        }
        let _ = io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_with_color() {
        let renderer = PlainTextRenderer::with_color(true);
        assert_eq!(
            renderer.styled(ANSI_RED, "bad"),
            format!("{ANSI_RED}bad{ANSI_RESET}")
        );
    }

    #[test]
    fn styled_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert_eq!(renderer.styled(ANSI_RED, "bad"), "bad");
    }
}
