//! Mock AI provider for testing.
//!
//! Queues scripted responses, injects errors, and captures every request
//! so tests can assert on prompt contents without calling a real API.
//! An exhausted queue answers with a provider-unavailable error.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Kraków")
//!     .with_error(AIError::rate_limited(30));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

/// A scripted provider reaction.
#[derive(Debug)]
enum MockResponse {
    /// Return a successful completion with this content.
    Success(String),
    /// Return this error.
    Error(AIError),
}

/// Mock AI provider; responses are consumed in queue order.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAIProvider {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Error(error));
        self
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }

    /// Snapshot of every request received.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        let next = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front();

        match next {
            Some(MockResponse::Success(content)) => {
                Ok(CompletionResponse::new(content, "mock-model"))
            }
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(AIError::unavailable("no scripted response queued")),
        }
    }
}
