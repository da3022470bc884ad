//! Line dispatcher.
//!
//! Turns one framed line into exactly one [`Reply`]:
//!
//! ```text
//! Frame -> checksum -> parse -> account lookup -> [decrypt -> parse content]
//!       -> reaction -> devices -> availability -> event channel -> ACK
//! ```
//!
//! Any failure along the way produces a NAK. The NAK body is fixed, so the
//! peer learns nothing about which step rejected the line; the detail is
//! logged instead. Nothing is applied until the event channel has room, so a
//! NAKed line leaves devices and availability untouched and the panel's
//! retransmission is processed from scratch.

use chrono::Utc;
use sia_core::{Error, Result};
use sia_protocol::{EventData, Frame, MessageParser, MessageType, Reply, SiaMessage, codes};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info, trace, warn};

use crate::availability::AvailabilityTracker;
use crate::devices::Update;
use crate::events::{Event, ReceiverEvent};
use crate::reactions::Reaction;
use crate::registry::{AccountRegistry, Session};

/// Result of dispatching one line.
#[derive(Debug)]
pub struct Outcome {
    /// Reply to send back, always present.
    pub reply: Reply,
    /// Event emitted for an accepted line.
    pub event: Option<Event>,
    /// Why the line was NAKed.
    pub error: Option<Error>,
}

impl Outcome {
    fn accepted(event: Event, reply: Reply) -> Self {
        Self {
            reply,
            event: Some(event),
            error: None,
        }
    }

    fn rejected(error: Error) -> Self {
        Self {
            reply: Reply::nak(),
            event: None,
            error: Some(error),
        }
    }

    pub fn is_ack(&self) -> bool {
        self.reply.is_ack()
    }

    /// Returns `true` if the line failed with an internal error.
    pub fn is_internal_error(&self) -> bool {
        self.error.as_ref().is_some_and(Error::is_internal)
    }
}

/// Routes lines to their account session.
///
/// Cloning is cheap; every connection task holds its own clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<AccountRegistry>,
    availability: AvailabilityTracker,
    events: mpsc::Sender<ReceiverEvent>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<AccountRegistry>,
        availability: AvailabilityTracker,
        events: mpsc::Sender<ReceiverEvent>,
    ) -> Self {
        Self {
            registry,
            availability,
            events,
        }
    }

    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    pub fn availability(&self) -> &AvailabilityTracker {
        &self.availability
    }

    /// Dispatch a line as produced by the codec, framing errors included.
    pub fn handle_line(&self, line: Result<Frame>) -> Outcome {
        let outcome = match line {
            Ok(frame) => match self.process(&frame) {
                Ok((event, reply)) => Outcome::accepted(event, reply),
                Err(e) => Outcome::rejected(e),
            },
            Err(e) => Outcome::rejected(e),
        };

        if let Some(e) = &outcome.error {
            if e.is_internal() || !e.is_line_recoverable() {
                error!(error = %e, "Line rejected");
            } else {
                warn!(error = %e, "Line rejected");
            }
        }

        outcome
    }

    /// Process one framed line.
    ///
    /// Returns the emitted event and the ACK for it.
    ///
    /// # Errors
    /// - `Error::ChecksumMismatch` / `Error::MalformedMessage` for a line that
    ///   fails the checksum or the line grammar
    /// - `Error::UnknownAccount` if no session exists for the account
    /// - `Error::DecryptionFailed` / `Error::MalformedContent` if the content
    ///   cannot be recovered
    /// - `Error::Internal` if the event channel cannot take the event
    pub fn process(&self, frame: &Frame) -> Result<(Event, Reply)> {
        trace!(line = %frame, "Processing line");
        frame.verify_checksum()?;

        let message = MessageParser::parse_frame(frame)?;
        if !message.length_matches() {
            debug!(
                account = %message.account,
                claimed = %message.length,
                actual = message.body_len(),
                "Length header does not match body"
            );
        }

        let session = self
            .registry
            .get(&message.account)
            .ok_or_else(|| Error::UnknownAccount(message.account.to_string()))?;

        let (data, content) = recover_content(session, &message)?;

        // Reserve before applying anything.
        let permit = self.events.try_reserve().map_err(|e| match e {
            TrySendError::Full(()) => Error::Internal("event channel full".to_string()),
            TrySendError::Closed(()) => Error::Internal("event channel closed".to_string()),
        })?;

        let code = data.as_ref().map(|d| d.code.as_str());
        let zone = data.as_ref().map_or(0, |d| d.zone);
        let message_text = data.as_ref().map_or("", |d| d.message.as_str());
        let reaction = Reaction::for_code(code);
        let received_at = Utc::now();

        let device = session.devices()?.apply(
            reaction,
            &Update {
                zone,
                code,
                message: message_text,
                content: &content,
                at: received_at,
            },
        );

        match (device, code) {
            (None, _) => warn!(
                account = %message.account,
                zone,
                code = code.unwrap_or("-"),
                "No device for zone, reaction not applied"
            ),
            (Some(_), Some(code)) if Reaction::lookup(code).is_none() => info!(
                account = %message.account,
                code,
                "Unhandled event code recorded as last message"
            ),
            _ => {}
        }

        self.availability.mark_seen(&message.account);

        let info = code.and_then(codes::lookup);
        let event = Event {
            account: message.account.clone(),
            zone,
            code: code.map(str::to_string),
            message: message_text.to_string(),
            timestamp: data.as_ref().map(|d| d.timestamp.clone()).unwrap_or_default(),
            content,
            sequence: message.sequence.clone(),
            encrypted: message.message_type.is_encrypted(),
            received_at,
            info,
            reaction,
            device,
        };

        debug!(
            account = %event.account,
            zone = event.zone,
            code = event.code.as_deref().unwrap_or("-"),
            sequence = %event.sequence,
            "Event accepted"
        );
        permit.send(ReceiverEvent::Event(event.clone()));

        let reply = Reply::ack(
            message.sequence,
            message.account,
            session.ack_terminator().clone(),
        );
        Ok((event, reply))
    }
}

/// Event data and plaintext content of a line, decrypting if needed.
///
/// An encrypted account only accepts encrypted lines and vice versa.
fn recover_content(session: &Session, message: &SiaMessage) -> Result<(Option<EventData>, String)> {
    match (message.message_type, session.cipher()) {
        (MessageType::Plain, None) => Ok((message.event.clone(), message.content.clone())),
        (MessageType::Encrypted, Some(cipher)) => {
            let plaintext = cipher.decrypt_hex(message.cipher_text())?;
            let data = MessageParser::parse_decrypted(&plaintext)?;
            let text = String::from_utf8_lossy(&plaintext);
            let content = match text.split_once('|') {
                Some((_, content)) => content.to_string(),
                None => text.into_owned(),
            };
            Ok((data, content))
        }
        (MessageType::Plain, Some(_)) => Err(Error::MalformedMessage(format!(
            "plaintext line for encrypted account {}",
            message.account
        ))),
        (MessageType::Encrypted, None) => Err(Error::DecryptionFailed(format!(
            "encrypted line for account {} without a key",
            message.account
        ))),
    }
}
