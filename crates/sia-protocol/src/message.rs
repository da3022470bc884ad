use serde::{Deserialize, Serialize};
use sia_core::AccountId;
use sia_core::constants::{ACK_ENCRYPTED, ACK_PLAIN, MARKER_ENCRYPTED, MARKER_PLAIN};

/// Session type announced by the line marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// `"SIA-DCS"`
    Plain,
    /// `"*SIA-DCS"`
    Encrypted,
}

impl MessageType {
    /// Marker as it appears on the wire, quotes included.
    pub fn marker(self) -> &'static str {
        match self {
            MessageType::Plain => MARKER_PLAIN,
            MessageType::Encrypted => MARKER_ENCRYPTED,
        }
    }

    /// ACK marker answering this session type.
    pub fn ack_marker(self) -> &'static str {
        match self {
            MessageType::Plain => ACK_PLAIN,
            MessageType::Encrypted => ACK_ENCRYPTED,
        }
    }

    pub fn is_encrypted(self) -> bool {
        self == MessageType::Encrypted
    }
}

/// Event fields pulled out of the content block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventData {
    /// Zone or record number, 0 when the line carries none.
    pub zone: u32,
    /// Two-letter event code, uppercased.
    pub code: String,
    /// Free text between the code and the timestamp.
    pub message: String,
    /// Panel timestamp, `HH:MM:SS,MM-DD-YYYY` shaped, possibly empty.
    pub timestamp: String,
}

/// One parsed inbound line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiaMessage {
    /// Claimed checksum, 4 hex digits.
    pub checksum: String,
    /// Claimed body length, 4 hex digits.
    pub length: String,
    pub message_type: MessageType,
    /// Sequence number, echoed back in the ACK.
    pub sequence: String,
    /// Receiver number (`R` field), if present.
    pub receiver: Option<String>,
    /// Line prefix (`L` field) without the `L`.
    pub line_prefix: String,
    pub account: AccountId,
    /// Everything after `[`: cipher text for encrypted lines, event data
    /// otherwise.
    pub content: String,
    /// Event fields. Always `None` for encrypted lines until the content has
    /// been decrypted and parsed.
    pub event: Option<EventData>,
}

impl SiaMessage {
    /// Length of the checksummed body, from the marker to the end of the line.
    pub fn body_len(&self) -> usize {
        let receiver = self.receiver.as_ref().map_or(0, |r| r.len() + 1);
        self.message_type.marker().len()
            + self.sequence.len()
            + receiver
            + 1
            + self.line_prefix.len()
            + 1
            + self.account.as_str().len()
            + 1
            + self.content.len()
    }

    /// Returns `true` if the claimed length header matches the body.
    pub fn length_matches(&self) -> bool {
        usize::from_str_radix(&self.length, 16).is_ok_and(|claimed| claimed == self.body_len())
    }

    /// Hex cipher text of an encrypted line.
    ///
    /// Some panels close the encrypted block with a plaintext `]`; it is not
    /// part of the cipher text.
    pub fn cipher_text(&self) -> &str {
        self.content.strip_suffix(']').unwrap_or(&self.content)
    }

    /// Code of the event, if any.
    pub fn code(&self) -> Option<&str> {
        self.event.as_ref().map(|e| e.code.as_str())
    }
}
