//! Diagnostics logging for generation calls.
//!
//! This module provides the [`ClientLogger`] trait that allows callers to
//! capture what actually happened on the wire. Failures are recorded here and
//! never shown verbatim to the end user; the session substitutes a fixed
//! fallback reply instead.

use crate::Error;
use crate::types::GenerateContentResponse;

/// A trait for logging generation client operations.
///
/// Implement this trait to capture responses and failures for diagnostics.
///
/// # Example
///
/// ```rust,ignore
/// use rudetutor::{ClientLogger, Error, GenerateContentResponse};
///
/// struct StderrLogger;
///
/// impl ClientLogger for StderrLogger {
///     fn log_response(&self, response: &GenerateContentResponse) {
///         eprintln!("response: {}", serde_json::to_string(response).unwrap());
///     }
///
///     fn log_failure(&self, error: &Error) {
///         eprintln!("generation failed: {}", error);
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a complete response from a successful generation call.
    fn log_response(&self, response: &GenerateContentResponse) {
        _ = response;
    }

    /// Log a failed generation call.
    ///
    /// Called once per failure with the underlying [`Error`], before the
    /// session converts it into a synthetic fallback reply.
    fn log_failure(&self, error: &Error);
}

/// A [`ClientLogger`] that writes failures to stderr.
#[derive(Debug, Default)]
pub struct StderrLogger;

impl ClientLogger for StderrLogger {
    fn log_failure(&self, error: &Error) {
        eprintln!("rudetutor: generation failed: {error}");
    }
}
