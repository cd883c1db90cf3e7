//! Conversation turns and the verifier wire format.

use serde::{Deserialize, Serialize};

/// Which party sent a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Received from the verifier.
    Inbound,
    /// Sent by this client.
    Outbound,
}

/// One message of the verification conversation, as recorded in the
/// session's turn log.
///
/// Message ids are assigned by the verifier, except the opening handshake
/// which the client originates with id 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Protocol message id. Outbound turns echo the id of the inbound
    /// turn they answer; the handshake uses 0.
    pub message_id: u64,
    /// Message text.
    pub text: String,
    /// Who sent the turn.
    pub direction: Direction,
}

impl ConversationTurn {
    /// Records a turn received from the verifier.
    pub fn inbound(message_id: u64, text: impl Into<String>) -> Self {
        Self {
            message_id,
            text: text.into(),
            direction: Direction::Inbound,
        }
    }

    /// Records a turn sent to the verifier.
    pub fn outbound(message_id: u64, text: impl Into<String>) -> Self {
        Self {
            message_id,
            text: text.into(),
            direction: Direction::Outbound,
        }
    }
}

/// The JSON body exchanged with the verifier, one per turn.
///
/// The verifier's wire format names the id field `msgID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMessage {
    /// Protocol message id.
    #[serde(rename = "msgID")]
    pub msg_id: u64,
    /// Message text.
    pub text: String,
}

impl TurnMessage {
    /// Creates a wire message.
    pub fn new(msg_id: u64, text: impl Into<String>) -> Self {
        Self {
            msg_id,
            text: text.into(),
        }
    }
}
