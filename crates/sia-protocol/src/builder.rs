use bytes::{BufMut, Bytes, BytesMut};
use chrono::Utc;
use sia_core::Result;
use sia_core::constants::{
    AES_BLOCK_SIZE, LINE_START, LINE_TERMINATOR, PAD_SEPARATOR, ZERO_IV,
};

use crate::{SessionCipher, checksum, message::MessageType};

/// Panel timestamp format (UTC).
const PANEL_TIMESTAMP_FORMAT: &str = "%H:%M:%S,%m-%d-%Y";

/// Builder for inbound SIA DC-09 lines, as a panel would send them.
///
/// Used to drive the receiver from tests, benchmarks and tooling.
///
/// # Example
/// ```
/// use sia_protocol::{LineBuilder, MessageParser};
///
/// let line = LineBuilder::new("ABC123")
///     .sequence(2)
///     .event(None, "CL", "501")
///     .timestamp("14:12:04,09-25-2019")
///     .build();
///
/// assert_eq!(line, "58270033\"SIA-DCS\"0002L0#ABC123[N/CL501]_14:12:04,09-25-2019");
/// assert!(MessageParser::parse(&line).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LineBuilder {
    account: String,
    sequence: u16,
    receiver: Option<String>,
    line_prefix: String,
    zone: Option<u32>,
    code: Option<String>,
    message: String,
    timestamp: Option<String>,
}

impl LineBuilder {
    pub fn new(account: impl Into<String>) -> Self {
        LineBuilder {
            account: account.into(),
            sequence: 1,
            receiver: None,
            line_prefix: "0".to_string(),
            zone: None,
            code: None,
            message: String::new(),
            timestamp: None,
        }
    }

    /// Sequence number, rendered as 4 decimal digits.
    pub fn sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence % 10_000;
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn line_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.line_prefix = prefix.into();
        self
    }

    /// Event group. A `None` zone is written as `N/<code>`, otherwise as
    /// `Nri<zone>/<code>`.
    pub fn event(mut self, zone: Option<u32>, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.zone = zone;
        self.code = Some(code.into());
        self.message = message.into();
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Stamp the line with the current UTC time.
    pub fn with_current_timestamp(mut self) -> Self {
        self.timestamp = Some(Utc::now().format(PANEL_TIMESTAMP_FORMAT).to_string());
        self
    }

    /// Plaintext content block, without the opening `[`.
    pub fn content(&self) -> String {
        let mut content = String::new();
        if let Some(code) = &self.code {
            match self.zone {
                Some(zone) => content.push_str(&format!("Nri{zone}/{code}")),
                None => content.push_str(&format!("N/{code}")),
            }
            content.push_str(&self.message);
        }
        content.push(']');
        if let Some(timestamp) = &self.timestamp {
            content.push('_');
            content.push_str(timestamp);
        }
        content
    }

    /// Build a plaintext line, checksum and length header included.
    pub fn build(&self) -> String {
        self.assemble(MessageType::Plain, &self.content())
    }

    /// Build an encrypted line.
    ///
    /// The content is prefixed with `|` and padded at the front with `0` up to
    /// a whole number of blocks, then encrypted with the all-zero IV.
    ///
    /// # Errors
    /// Propagates cipher errors.
    pub fn build_encrypted(&self, cipher: &SessionCipher) -> Result<String> {
        let data = format!("{PAD_SEPARATOR}{}", self.content());
        let pad = (AES_BLOCK_SIZE - data.len() % AES_BLOCK_SIZE) % AES_BLOCK_SIZE;
        let plaintext = format!("{}{data}", "0".repeat(pad));

        let encrypted = cipher.encrypt(plaintext.as_bytes(), &ZERO_IV)?;
        Ok(self.assemble(MessageType::Encrypted, &hex::encode_upper(encrypted)))
    }

    fn assemble(&self, message_type: MessageType, content: &str) -> String {
        let receiver = self
            .receiver
            .as_ref()
            .map(|r| format!("R{r}"))
            .unwrap_or_default();
        let body = format!(
            "{}{:04}{receiver}L{}#{}[{content}",
            message_type.marker(),
            self.sequence,
            self.line_prefix,
            self.account
        );
        format!("{}{:04X}{body}", checksum::compute(body.as_bytes()), body.len())
    }
}

/// Put a line on the wire: `<LF> line <CR>`.
pub fn to_wire(line: &str) -> Bytes {
    let mut out = BytesMut::with_capacity(line.len() + 2);
    out.put_u8(LINE_START);
    out.put_slice(line.as_bytes());
    out.put_u8(LINE_TERMINATOR);
    out.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Frame, MessageParser};
    use sia_core::EncryptionKey;

    #[test]
    fn test_known_plain_line() {
        let line = LineBuilder::new("ABC123")
            .sequence(3)
            .event(Some(1), "OP", "501")
            .timestamp("14:12:04,09-25-2019")
            .build();

        assert_eq!(&line[8..17], "\"SIA-DCS\"");
        assert!(Frame::new(line.clone().into_bytes()).verify_checksum().is_ok());

        let msg = MessageParser::parse(&line).unwrap();
        assert!(msg.length_matches());
        let event = msg.event.unwrap();
        assert_eq!((event.zone, event.code.as_str()), (1, "OP"));
    }

    #[test]
    fn test_content_without_event() {
        let builder = LineBuilder::new("ABC");
        assert_eq!(builder.content(), "]");

        let msg = MessageParser::parse(&builder.build()).unwrap();
        assert_eq!(msg.event, None);
    }

    #[test]
    fn test_receiver_is_written() {
        let line = LineBuilder::new("ABC").receiver("12").event(None, "RP", "").build();
        let msg = MessageParser::parse(&line).unwrap();
        assert_eq!(msg.receiver.as_deref(), Some("12"));
    }

    #[test]
    fn test_sequence_wraps_to_four_digits() {
        let line = LineBuilder::new("ABC").sequence(12345).build();
        let msg = MessageParser::parse(&line).unwrap();
        assert_eq!(msg.sequence, "2345");
    }

    #[test]
    fn test_current_timestamp_shape() {
        let builder = LineBuilder::new("ABC").event(None, "RP", "").with_current_timestamp();
        let msg = MessageParser::parse(&builder.build()).unwrap();
        assert_eq!(msg.event.unwrap().timestamp.len(), 19);
    }

    #[test]
    fn test_encrypted_line_decrypts_back() {
        let key = EncryptionKey::parse("AAAAAAAAAAAAAAAA").unwrap();
        let cipher = SessionCipher::new(&key).unwrap();
        let builder = LineBuilder::new("ABC123")
            .event(Some(4), "BA", "04")
            .timestamp("01:02:03,04-05-2024");

        let line = builder.build_encrypted(&cipher).unwrap();
        assert!(Frame::new(line.clone().into_bytes()).verify_checksum().is_ok());

        let msg = MessageParser::parse(&line).unwrap();
        assert_eq!(msg.message_type, MessageType::Encrypted);
        assert_eq!(msg.cipher_text().len() % (2 * AES_BLOCK_SIZE), 0);

        let plaintext = cipher.decrypt_hex(msg.cipher_text()).unwrap();
        let event = MessageParser::parse_decrypted(&plaintext).unwrap().unwrap();
        assert_eq!(event.zone, 4);
        assert_eq!(event.code, "BA");
        assert_eq!(event.message, "04");
    }

    #[test]
    fn test_to_wire() {
        assert_eq!(&to_wire("X")[..], b"\nX\r");
    }
}
