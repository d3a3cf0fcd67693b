//! Mock caller generator for testing.
//!
//! Configurable test double for the CallerGenerator port: queued responses,
//! injected errors, simulated latency, and call recording, so session logic
//! and the compliance pipeline can be exercised without a model.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::prompt::GenerationRequest;
use crate::ports::{BackendInfo, CallerGenerator, GenerationError};

/// A configured mock outcome, consumed in order.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Error(GenerationError),
}

/// Mock generation backend.
#[derive(Debug, Clone)]
pub struct MockCallerGenerator {
    /// Pre-configured outcomes (consumed front to back).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Requests seen, for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for MockCallerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCallerGenerator {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a raw response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Success(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of generate calls seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests, in order.
    pub fn recorded_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Exhausted queues fall back to an echo so tests that don't care about
    /// content keep working.
    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Success("I'm still here, please hurry.".to_string()))
    }
}

#[async_trait]
impl CallerGenerator for MockCallerGenerator {
    async fn generate(&mut self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Success(content) => Ok(content),
            MockOutcome::Error(error) => Err(error),
        }
    }

    fn backend_info(&self) -> BackendInfo {
        BackendInfo::new("mock", "mock-caller-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::ChatMessage;

    fn request(content: &str) -> GenerationRequest {
        GenerationRequest {
            system_prompt: "You are a 911 caller.".to_string(),
            messages: vec![ChatMessage::user(content)],
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let mut generator = MockCallerGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate(request("a")).await.unwrap(), "first");
        assert_eq!(generator.generate(request("b")).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn errors_are_injected_in_order() {
        let mut generator = MockCallerGenerator::new()
            .with_error(GenerationError::Timeout { timeout_ms: 10 })
            .with_response("recovered");

        assert!(generator.generate(request("a")).await.is_err());
        assert_eq!(generator.generate(request("b")).await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let mut generator = MockCallerGenerator::new().with_response("ok");
        generator.generate(request("Where are you?")).await.unwrap();

        assert_eq!(generator.call_count(), 1);
        assert_eq!(
            generator.recorded_calls()[0].messages[0].content,
            "Where are you?"
        );
    }

    #[tokio::test]
    async fn exhausted_queue_yields_a_default_line() {
        let mut generator = MockCallerGenerator::new();
        let out = generator.generate(request("a")).await.unwrap();
        assert!(!out.is_empty());
    }
}
