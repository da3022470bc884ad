//! SIA DC-09 line grammar.
//!
//! Two grammars are applied. The line grammar splits a framed line into its
//! header fields and the content block:
//!
//! ```text
//! CRC4 0LLL "SIA-DCS"|"*SIA-DCS" SEQ4 [R<hex 1-6>] L<hex 1-6> #ACCT [ CONTENT
//! ```
//!
//! The content grammar then pulls the event out of the (decrypted) content:
//!
//! ```text
//! [<padding>|] N[ri<zone>]/<CODE><message>]_<timestamp>
//! ```
//!
//! Both are anchored and hand-written; neither backtracks.
//!
//! # Examples
//!
//! ```
//! use sia_protocol::{MessageParser, MessageType};
//!
//! let line = "58270033\"SIA-DCS\"0002L0#ABC123[N/CL501]_14:12:04,09-25-2019";
//! let msg = MessageParser::parse(line).unwrap();
//!
//! assert_eq!(msg.message_type, MessageType::Plain);
//! assert_eq!(msg.sequence, "0002");
//! assert_eq!(msg.account.as_str(), "ABC123");
//!
//! let event = msg.event.unwrap();
//! assert_eq!(event.zone, 0);
//! assert_eq!(event.code, "CL");
//! assert_eq!(event.message, "501");
//! assert_eq!(event.timestamp, "14:12:04,09-25-2019");
//! ```
//!
//! Garbage is rejected:
//!
//! ```
//! use sia_protocol::MessageParser;
//!
//! assert!(MessageParser::parse("GET / HTTP/1.1").is_err());
//! ```

use sia_core::constants::{
    CHECKSUM_LENGTH, MARKER_ENCRYPTED, MARKER_PLAIN, MAX_ACCOUNT_LENGTH, PAD_SEPARATOR,
    SEQUENCE_LENGTH,
};
use sia_core::{AccountId, Error, Result};

use crate::frame::Frame;
use crate::message::{EventData, MessageType, SiaMessage};

/// Maximum length of the receiver and line prefix fields.
const MAX_PREFIX_LENGTH: usize = 6;

/// Parser for SIA DC-09 lines and their content blocks.
pub struct MessageParser;

impl MessageParser {
    /// Parse a framed line.
    ///
    /// # Errors
    /// - `Error::MalformedMessage` if the line is not UTF-8 or does not match the
    ///   line grammar
    /// - `Error::MalformedContent` if a plaintext line carries content that does
    ///   not match the content grammar
    pub fn parse_frame(frame: &Frame) -> Result<SiaMessage> {
        Self::parse(frame.to_str()?)
    }

    /// Parse one line, without its `<LF>` and `<CR>`.
    ///
    /// For plaintext lines the content is parsed too. Encrypted lines come back
    /// with `event: None`; decrypt [`SiaMessage::cipher_text`] and hand the
    /// result to [`parse_decrypted`](Self::parse_decrypted).
    ///
    /// # Errors
    /// See [`parse_frame`](Self::parse_frame).
    pub fn parse(line: &str) -> Result<SiaMessage> {
        let mut cursor = Cursor::new(line);

        let checksum = cursor
            .take_exact(CHECKSUM_LENGTH, |c| c.is_ascii_hexdigit())
            .ok_or_else(|| malformed("checksum"))?;

        let length = cursor
            .take_exact(4, |c| c.is_ascii_hexdigit())
            .filter(|l| l.starts_with('0'))
            .ok_or_else(|| malformed("length header"))?;

        let message_type = if cursor.eat(MARKER_PLAIN) {
            MessageType::Plain
        } else if cursor.eat(MARKER_ENCRYPTED) {
            MessageType::Encrypted
        } else {
            return Err(malformed("message type marker"));
        };

        let sequence = cursor
            .take_exact(SEQUENCE_LENGTH, |c| c.is_ascii_digit())
            .ok_or_else(|| malformed("sequence"))?;

        let receiver = if cursor.eat("R") {
            Some(
                cursor
                    .take_between(1, MAX_PREFIX_LENGTH, |c| c.is_ascii_hexdigit())
                    .ok_or_else(|| malformed("receiver"))?,
            )
        } else {
            None
        };

        if !cursor.eat("L") {
            return Err(malformed("line prefix"));
        }
        let line_prefix = cursor
            .take_between(1, MAX_PREFIX_LENGTH, |c| c.is_ascii_hexdigit())
            .ok_or_else(|| malformed("line prefix"))?;

        if !cursor.eat("#") {
            return Err(malformed("account marker"));
        }
        let account = cursor
            .take_between(1, MAX_ACCOUNT_LENGTH, |c| c.is_ascii_hexdigit())
            .ok_or_else(|| malformed("account"))?;
        let account = AccountId::new(account).map_err(|e| Error::MalformedMessage(e.to_string()))?;

        if !cursor.eat("[") {
            return Err(malformed("content block"));
        }
        let content = cursor.rest();

        let event = match message_type {
            MessageType::Plain => Self::parse_content(content)?,
            MessageType::Encrypted => None,
        };

        Ok(SiaMessage {
            checksum: checksum.to_string(),
            length: length.to_string(),
            message_type,
            sequence: sequence.to_string(),
            receiver: receiver.map(str::to_string),
            line_prefix: line_prefix.to_string(),
            account,
            content: content.to_string(),
            event,
        })
    }

    /// Parse a content block.
    ///
    /// Anything up to and including the first `|` is padding and is skipped.
    /// Returns `Ok(None)` if nothing but an optional `]` remains.
    ///
    /// # Errors
    /// Returns `Error::MalformedContent` if content is present but carries no
    /// `N[ri<zone>]/<CODE>` group.
    pub fn parse_content(content: &str) -> Result<Option<EventData>> {
        let data = match content.find(PAD_SEPARATOR) {
            Some(pos) => &content[pos + PAD_SEPARATOR.len_utf8()..],
            None => content,
        };

        if data.is_empty() || data == "]" {
            return Ok(None);
        }

        let (zone, code, rest) = data
            .match_indices('N')
            .find_map(|(pos, _)| parse_event_head(&data[pos + 1..]))
            .ok_or_else(|| Error::MalformedContent(format!("no event code in {data:?}")))?;
        let zone = zone?;

        let (message, timestamp) = match rest.rfind("]_") {
            Some(pos) => {
                let after = &rest[pos + 2..];
                let end = after
                    .find(|c: char| !(c.is_ascii_digit() || matches!(c, ':' | ',' | '-')))
                    .unwrap_or(after.len());
                (&rest[..pos], &after[..end])
            }
            None => (rest.strip_suffix(']').unwrap_or(rest), ""),
        };

        Ok(Some(EventData {
            zone,
            code,
            message: message.to_string(),
            timestamp: timestamp.to_string(),
        }))
    }

    /// Parse decrypted content.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so only the content
    /// grammar decides. Padding followed by a bare `]` is a line without an
    /// event, same as plaintext `[]`.
    ///
    /// # Errors
    /// Returns `Error::MalformedContent` if the plaintext is neither empty nor
    /// an event.
    pub fn parse_decrypted(plaintext: &[u8]) -> Result<Option<EventData>> {
        let text = String::from_utf8_lossy(plaintext);
        Self::parse_content(&text)
    }
}

fn malformed(field: &str) -> Error {
    Error::MalformedMessage(format!("invalid or missing {field}"))
}

/// Match `[ri<digits>]/<two letters>` right after an `N`.
///
/// Returns the zone, the uppercased code and the remaining text. The zone is
/// itself a `Result` so that an out-of-range zone is reported instead of
/// silently moving on to the next `N`.
fn parse_event_head(after_n: &str) -> Option<(Result<u32>, String, &str)> {
    let mut cursor = Cursor::new(after_n);

    let zone = if cursor.eat("ri") {
        let digits = cursor.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            Ok(0)
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| Error::MalformedContent(format!("zone {digits} out of range")))
        }
    } else {
        Ok(0)
    };

    if !cursor.eat("/") {
        return None;
    }
    let code = cursor.take_exact(2, |c| c.is_ascii_alphabetic())?;

    Some((zone, code.to_ascii_uppercase(), cursor.rest()))
}

/// Forward-only cursor over a line.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn rest(&self) -> &'a str {
        self.rest
    }

    fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    /// Take between `min` and `max` matching chars. The match must stop at a
    /// non-matching char or the end of input; it is never truncated.
    fn take_between(&mut self, min: usize, max: usize, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        if end < min || end > max {
            return None;
        }
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(taken)
    }

    /// Take exactly `n` matching chars, regardless of what follows.
    fn take_exact(&mut self, n: usize, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let taken = self.rest.get(..n)?;
        if !taken.chars().all(pred) {
            return None;
        }
        self.rest = &self.rest[n..];
        Some(taken)
    }
}
