//! Caller Generator Port - interface for LLM backends.
//!
//! Abstracts whatever produces raw caller speech (a local model, a hosted
//! API, a test double) so the simulation logic never couples to a specific
//! provider. Implementations return the model's raw text; cleaning it up is
//! the compliance pipeline's job.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::prompt::GenerationRequest;

/// Port for generating raw caller responses.
#[async_trait]
pub trait CallerGenerator: Send + Sync {
    /// Generates one raw caller turn for the request.
    ///
    /// The returned text is untrusted model output and must go through the
    /// compliance pipeline before anyone sees it.
    async fn generate(&mut self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Identifies the backend, for logs.
    fn backend_info(&self) -> BackendInfo;
}

/// Identifying information about a generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    /// Backend name ("mock", "llama-cpp", ...).
    pub name: String,
    /// Model identifier the backend runs.
    pub model: String,
}

impl BackendInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Failure modes a generation backend can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Generation did not finish in time.
    #[error("generation timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured budget.
        timeout_ms: u64,
    },

    /// Backend is down or overloaded.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Backend answered with something unusable.
    #[error("malformed backend response: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        GenerationError::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        GenerationError::Malformed {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        GenerationError::Network(message.into())
    }

    /// True for failures where an immediate retry can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Timeout { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
        )
    }
}
