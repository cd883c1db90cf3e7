//! Verifier Transport Port - one JSON exchange per conversation turn.

use async_trait::async_trait;

use crate::domain::TurnMessage;

/// Port for the verification transport.
///
/// One call performs one request/response exchange: the client's turn goes
/// out, the verifier's next turn comes back. The core never retries a
/// failed exchange; retry-at-session-granularity is the caller's choice.
#[async_trait]
pub trait VerifierTransport: Send + Sync {
    /// Sends one turn and returns the verifier's reply turn.
    async fn exchange(&self, message: TurnMessage) -> Result<TurnMessage, TransportError>;
}

/// Transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The verifier answered with a non-success status.
    #[error("verifier returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body was not a valid turn message.
    #[error("malformed verifier response: {0}")]
    MalformedBody(String),

    /// Connectivity or protocol failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// The exchange timed out.
    #[error("exchange timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl TransportError {
    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a malformed body error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody(message.into())
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            TransportError::status(502, "bad gateway").to_string(),
            "verifier returned status 502: bad gateway"
        );
        assert_eq!(
            TransportError::malformed("missing msgID").to_string(),
            "malformed verifier response: missing msgID"
        );
    }
}
