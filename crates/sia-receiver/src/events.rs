//! Output of the receiver.
//!
//! Collaborators consume a single channel of [`ReceiverEvent`]s: one
//! [`Event`] per accepted line, and one [`AvailabilityChange`] per
//! availability transition of an account or one of its devices.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sia_core::AccountId;
use sia_protocol::EventCode;

use crate::devices::DeviceKey;
use crate::reactions::Reaction;

/// One accepted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub account: AccountId,
    /// Zone or record number, 0 when the line carries none.
    pub zone: u32,
    /// Two-letter code, `None` for lines without event data.
    pub code: Option<String>,
    pub message: String,
    /// Panel timestamp as sent, possibly empty.
    pub timestamp: String,
    /// Plaintext content block (decrypted for encrypted lines).
    pub content: String,
    /// Sequence number echoed in the ACK.
    pub sequence: String,
    pub encrypted: bool,
    pub received_at: DateTime<Utc>,
    /// Dictionary entry of the code, if known.
    pub info: Option<&'static EventCode>,
    pub reaction: Reaction,
    /// Device the reaction updated, `None` if its zone is not configured.
    pub device: Option<DeviceKey>,
}

impl Event {
    /// Event type from the code dictionary, e.g. `"Burglary Alarm"`.
    pub fn kind(&self) -> Option<&'static str> {
        self.info.map(|info| info.kind)
    }

    pub fn description(&self) -> Option<&'static str> {
        self.info.map(|info| info.description)
    }

    /// What the number in the message refers to, e.g. `"Zone or point"`.
    pub fn concerns(&self) -> Option<&'static str> {
        self.info.map(|info| info.concerns)
    }

    /// Returns `true` if the code has an entry in the code dictionary.
    pub fn is_known_code(&self) -> bool {
        self.info.is_some()
    }
}

/// Availability transition.
///
/// `device` is `None` for the account itself. The heartbeat device never
/// appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityChange {
    pub account: AccountId,
    pub device: Option<DeviceKey>,
    pub available: bool,
}

/// Everything the receiver reports to collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReceiverEvent {
    Event(Event),
    Availability(AvailabilityChange),
}
