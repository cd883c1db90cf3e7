//! Scripted in-memory verifier for tests.
//!
//! Plays back a fixed sequence of verifier replies and records every
//! message the client sends, so session tests can assert on the exact
//! wire traffic.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::TurnMessage;
use crate::ports::{TransportError, VerifierTransport};

/// In-memory verifier playing back scripted replies in order.
#[derive(Debug, Default)]
pub struct ScriptedVerifier {
    replies: Mutex<VecDeque<TurnMessage>>,
    received: Mutex<Vec<TurnMessage>>,
    fail_always: bool,
}

impl ScriptedVerifier {
    /// Creates a verifier that answers with `replies` in order.
    pub fn new(replies: Vec<TurnMessage>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            received: Mutex::new(Vec::new()),
            fail_always: false,
        }
    }

    /// Creates a verifier whose every exchange fails with a connection
    /// error.
    pub fn failing() -> Self {
        Self {
            fail_always: true,
            ..Self::default()
        }
    }

    /// Everything the client has sent, in order.
    pub fn received(&self) -> Vec<TurnMessage> {
        self.received.lock().expect("scripted lock poisoned").clone()
    }
}

#[async_trait]
impl VerifierTransport for ScriptedVerifier {
    async fn exchange(&self, message: TurnMessage) -> Result<TurnMessage, TransportError> {
        if self.fail_always {
            return Err(TransportError::connection("scripted failure"));
        }

        self.received
            .lock()
            .expect("scripted lock poisoned")
            .push(message);

        self.replies
            .lock()
            .expect("scripted lock poisoned")
            .pop_front()
            .ok_or_else(|| TransportError::connection("script exhausted"))
    }
}
