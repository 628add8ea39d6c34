//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the session log
//! and runs the submission lifecycle against the generation API.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chat::config::ChatConfig;
use crate::chat::message::{ChatRole, Message};
use crate::client_logger::ClientLogger;
use crate::error::Result;
use crate::persona::{EMPTY_REPLY_FALLBACK, ERROR_REPLY_FALLBACK, TUTOR_SYSTEM_INSTRUCTION};
use crate::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Model};
use crate::Gemini;

/// The generation service as seen by the session.
///
/// `Gemini` is the production implementation; tests substitute scripted
/// backends to exercise the submission lifecycle without a network.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Runs one generation call.
    async fn generate(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[async_trait::async_trait]
impl GenerationBackend for Gemini {
    async fn generate(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        Gemini::generate(self, model, request).await
    }
}

/// Outcome of a `submit` call, for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The submission ran to completion; the log gained a user message and
    /// an assistant message (real or synthetic).
    Completed,

    /// The input trimmed to nothing; the session is unchanged.
    IgnoredEmpty,

    /// A request was already outstanding; the session is unchanged.
    Busy,
}

/// Clears the outstanding-request flag when dropped, so every exit path of a
/// submission, success or failure, returns the session to idle.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn set(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag: Arc::clone(flag) }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// A chat session that owns the message log and drives the generation API.
///
/// The log is append-only and display-ordered. Submissions are strictly
/// serialized: while one is outstanding, further `submit` calls are no-ops.
pub struct ChatSession<B: GenerationBackend> {
    backend: B,
    config: ChatConfig,
    messages: Vec<Message>,
    input: String,
    in_flight: Arc<AtomicBool>,
    next_id: u64,
    request_count: u64,
    failure_count: u64,
    logger: Option<Box<dyn ClientLogger>>,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The number of messages in the log.
    pub message_count: usize,
    /// Total number of generation requests dispatched.
    pub total_requests: u64,
    /// Requests that ended in a synthetic fallback reply.
    pub total_failures: u64,
}

impl ChatSession<Gemini> {
    /// Creates a new chat session backed by the live API client.
    pub fn new(client: Gemini, config: ChatConfig) -> Self {
        Self::with_backend(client, config)
    }
}

impl<B: GenerationBackend> ChatSession<B> {
    /// Creates a new chat session with a custom backend.
    pub fn with_backend(backend: B, config: ChatConfig) -> Self {
        Self {
            backend,
            config,
            messages: Vec::new(),
            input: String::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            next_id: 0,
            request_count: 0,
            failure_count: 0,
            logger: None,
        }
    }

    /// Installs a diagnostics logger for generation calls.
    pub fn set_logger(&mut self, logger: Box<dyn ClientLogger>) {
        self.logger = Some(logger);
    }

    /// Submits user text to the tutor.
    ///
    /// Rejected as a no-op if the trimmed text is empty or a request is
    /// already outstanding. On acceptance, the user message is appended
    /// before any network activity, the input buffer is cleared, and the
    /// outstanding-request flag is held for the duration of the call.
    ///
    /// Exactly one assistant message is appended per accepted submission:
    /// the service's reply text, or a fixed fallback when the reply carries
    /// no text or the call fails. The underlying error goes to the logger
    /// only.
    ///
    /// # Example
    ///
    /// ```
    /// use rudetutor::chat::{ChatConfig, ChatSession, GenerationBackend, Submission};
    /// use rudetutor::{GenerateContentRequest, GenerateContentResponse, Model};
    ///
    /// struct CannedReply;
    ///
    /// #[async_trait::async_trait]
    /// impl GenerationBackend for CannedReply {
    ///     async fn generate(
    ///         &self,
    ///         _: &Model,
    ///         _: &GenerateContentRequest,
    ///     ) -> rudetutor::Result<GenerateContentResponse> {
    ///         Ok(GenerateContentResponse::from_text("Use a database."))
    ///     }
    /// }
    ///
    /// let mut session = ChatSession::with_backend(CannedReply, ChatConfig::default());
    /// let outcome = tokio_test::block_on(session.submit("What is REST?"));
    /// assert_eq!(outcome, Submission::Completed);
    /// assert_eq!(session.messages().len(), 2);
    /// assert_eq!(session.messages()[1].content, "Use a database.");
    /// ```
    pub async fn submit(&mut self, text: &str) -> Submission {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Submission::IgnoredEmpty;
        }
        if self.in_flight.load(Ordering::SeqCst) {
            return Submission::Busy;
        }

        // Synchronous portion: the log reflects the user's input even if
        // everything after this point fails.
        self.push_message(ChatRole::User, trimmed.to_string());
        self.input.clear();
        let _guard = InFlightGuard::set(&self.in_flight);

        let request = self.build_request(trimmed);
        self.request_count += 1;

        let reply = match self.backend.generate(&self.config.model, &request).await {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(&response);
                }
                match response.text() {
                    Some(text) => text.to_string(),
                    None => {
                        self.failure_count += 1;
                        EMPTY_REPLY_FALLBACK.to_string()
                    }
                }
            }
            Err(err) => {
                if let Some(logger) = &self.logger {
                    logger.log_failure(&err);
                }
                self.failure_count += 1;
                ERROR_REPLY_FALLBACK.to_string()
            }
        };

        self.push_message(ChatRole::Assistant, reply);
        Submission::Completed
    }

    /// Returns the session log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns true while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns a handle to the outstanding-request flag, for presentation
    /// layers that render a busy indicator from another task.
    pub fn in_flight_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_flight)
    }

    /// Returns the pending input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the pending input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Clears the session log. Message ids are not reused.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Returns a reference to the generation backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a mutable reference to the generation backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            message_count: self.message_count(),
            total_requests: self.request_count,
            total_failures: self.failure_count,
        }
    }

    fn push_message(&mut self, role: ChatRole, content: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message::new(id, role, content));
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        let mut request = GenerateContentRequest::from_prompt(prompt)
            .with_system_instruction(TUTOR_SYSTEM_INSTRUCTION);
        if self.config.temperature.is_some() || self.config.max_output_tokens.is_some() {
            request = request.with_generation_config(GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                ..GenerationConfig::default()
            });
        }
        request
    }
}
