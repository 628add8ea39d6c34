//! Integration tests for the chat session controller.
//!
//! These exercise the submission lifecycle against scripted backends, so no
//! API key or network is required.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rudetutor::chat::{ChatConfig, ChatRole, ChatSession, GenerationBackend, Submission};
use rudetutor::persona::{EMPTY_REPLY_FALLBACK, ERROR_REPLY_FALLBACK};
use rudetutor::{
    Candidate, ClientLogger, Error, GenerateContentRequest, GenerateContentResponse, Model,
};

/// What a scripted backend should do with each request.
enum Script {
    Reply(String),
    EmptyText,
    NoCandidates,
    Fail,
}

struct ScriptedBackend {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn reply(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        _: &Model,
        request: &GenerateContentRequest,
    ) -> rudetutor::Result<GenerateContentResponse> {
        let prompt = request.contents[0]
            .first_text()
            .unwrap_or_default()
            .to_string();
        self.prompts.lock().unwrap().push(prompt);
        match &self.script {
            Script::Reply(text) => Ok(GenerateContentResponse::from_text(text.clone())),
            Script::EmptyText => Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: None,
                    finish_reason: Some("SAFETY".to_string()),
                }],
                model_version: None,
            }),
            Script::NoCandidates => Ok(GenerateContentResponse::default()),
            Script::Fail => Err(Error::connection("connection refused", None)),
        }
    }
}

fn session(backend: ScriptedBackend) -> ChatSession<ScriptedBackend> {
    ChatSession::with_backend(backend, ChatConfig::default())
}

#[tokio::test]
async fn successful_submission_appends_user_then_assistant() {
    let mut session = session(ScriptedBackend::reply("Use a database."));
    let outcome = session.submit("What is REST?").await;

    assert_eq!(outcome, Submission::Completed);
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "What is REST?");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert_eq!(messages[1].content, "Use a database.");
    assert!(!session.is_busy());
}

#[tokio::test]
async fn submission_trims_input_before_dispatch() {
    let backend = ScriptedBackend::reply("ok");
    let mut session = session(backend);
    session.submit("  What is REST?  ").await;

    assert_eq!(session.messages()[0].content, "What is REST?");
    assert_eq!(session.backend().prompts(), vec!["What is REST?"]);
}

#[tokio::test]
async fn empty_and_whitespace_submissions_are_noops() {
    let mut session = session(ScriptedBackend::reply("unreachable"));
    session.set_input("draft");

    assert_eq!(session.submit("").await, Submission::IgnoredEmpty);
    assert_eq!(session.submit("   \t\n").await, Submission::IgnoredEmpty);
    assert_eq!(session.message_count(), 0);
    assert_eq!(session.input(), "draft");
    assert!(session.backend().prompts().is_empty());
}

#[tokio::test]
async fn acceptance_clears_input_buffer() {
    let mut session = session(ScriptedBackend::reply("ok"));
    session.set_input("What is REST?");
    session.submit("What is REST?").await;
    assert_eq!(session.input(), "");
}

#[tokio::test]
async fn busy_flag_rejects_submissions() {
    let mut session = session(ScriptedBackend::reply("unreachable"));
    session.in_flight_handle().store(true, Ordering::SeqCst);

    assert_eq!(session.submit("hello").await, Submission::Busy);
    assert_eq!(session.submit("hello again").await, Submission::Busy);
    assert_eq!(session.message_count(), 0);
    assert!(session.backend().prompts().is_empty());
}

#[tokio::test]
async fn empty_text_response_becomes_fixed_fallback() {
    let mut session = session(ScriptedBackend::new(Script::EmptyText));
    session.submit("How's the weather?").await;

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, EMPTY_REPLY_FALLBACK);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn missing_candidates_become_fixed_fallback() {
    let mut session = session(ScriptedBackend::new(Script::NoCandidates));
    session.submit("hello").await;
    assert_eq!(session.messages()[1].content, EMPTY_REPLY_FALLBACK);
}

#[tokio::test]
async fn failed_call_becomes_error_fallback_and_clears_flag() {
    let mut session = session(ScriptedBackend::new(Script::Fail));
    let outcome = session.submit("What is REST?").await;

    assert_eq!(outcome, Submission::Completed);
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    // The user message was appended before the call failed.
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "What is REST?");
    assert_eq!(messages[1].role, ChatRole::Assistant);
    assert_eq!(messages[1].content, ERROR_REPLY_FALLBACK);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn session_accepts_submissions_after_failure() {
    let mut session = session(ScriptedBackend::new(Script::Fail));
    session.submit("first").await;
    assert_eq!(session.submit("second").await, Submission::Completed);
    assert_eq!(session.message_count(), 4);
}

#[tokio::test]
async fn insult_replies_pass_through_verbatim() {
    let insult = "A weather question? Come back when you have a real \
                  programming question, keyboard tourist.";
    let mut session = session(ScriptedBackend::reply(insult));
    session.submit("How's the weather?").await;
    assert_eq!(session.messages()[1].content, insult);
}

#[tokio::test]
async fn message_ids_are_unique_across_submissions() {
    let mut session = session(ScriptedBackend::reply("ok"));
    session.submit("one").await;
    session.submit("two").await;
    session.submit("three").await;

    let mut ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 6);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[tokio::test]
async fn flag_is_set_while_request_is_outstanding() {
    struct ProbeBackend {
        flag: Arc<AtomicBool>,
        observed: AtomicBool,
    }

    #[async_trait::async_trait]
    impl GenerationBackend for ProbeBackend {
        async fn generate(
            &self,
            _: &Model,
            _: &GenerateContentRequest,
        ) -> rudetutor::Result<GenerateContentResponse> {
            self.observed
                .store(self.flag.load(Ordering::SeqCst), Ordering::SeqCst);
            Ok(GenerateContentResponse::from_text("ok"))
        }
    }

    let mut session = ChatSession::with_backend(
        ProbeBackend {
            flag: Arc::new(AtomicBool::new(false)),
            observed: AtomicBool::new(false),
        },
        ChatConfig::default(),
    );
    let handle = session.in_flight_handle();
    // Point the probe at the session's real flag.
    session.backend_mut().flag = handle;

    session.submit("hello").await;
    assert!(session.backend().observed.load(Ordering::SeqCst));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn failures_reach_the_diagnostics_logger() {
    #[derive(Default)]
    struct RecordingLogger {
        failures: Mutex<Vec<String>>,
    }

    impl ClientLogger for RecordingLogger {
        fn log_failure(&self, error: &Error) {
            self.failures.lock().unwrap().push(error.to_string());
        }
    }

    let logger = Arc::new(RecordingLogger::default());
    struct SharedLogger(Arc<RecordingLogger>);
    impl ClientLogger for SharedLogger {
        fn log_failure(&self, error: &Error) {
            self.0.log_failure(error);
        }
    }

    let mut session = session(ScriptedBackend::new(Script::Fail));
    session.set_logger(Box::new(SharedLogger(Arc::clone(&logger))));
    session.submit("hello").await;

    let failures = logger.failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("connection refused"));
    // The fallback shown to the user carries none of the error detail.
    assert!(!session.messages()[1].content.contains("connection refused"));
}

#[tokio::test]
async fn stats_track_requests_and_failures() {
    let mut session = session(ScriptedBackend::new(Script::Fail));
    session.submit("one").await;
    session.submit("two").await;

    let stats = session.stats();
    assert_eq!(stats.message_count, 4);
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.total_failures, 2);
}
