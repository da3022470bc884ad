//! Reply encoder.
//!
//! Every inbound line gets exactly one reply: an ACK echoing the sequence
//! number and account, or a NAK with a fixed body. Both are wrapped as
//!
//! ```text
//! <LF> CRC4 LEN4 BODY <CR>
//! ```
//!
//! ```
//! use chrono::NaiveDate;
//! use sia_protocol::Reply;
//!
//! let at = NaiveDate::from_ymd_opt(2019, 9, 25)
//!     .unwrap()
//!     .and_hms_opt(14, 12, 4)
//!     .unwrap();
//! let nak = Reply::nak_at(at);
//!
//! assert_eq!(nak.body(), "\"NAK\"0000L0R0A0[]_14:12:04,09-25-2019");
//! assert_eq!(&nak.encode()[..], b"\n84510025\"NAK\"0000L0R0A0[]_14:12:04,09-25-2019\r");
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use chrono::{Local, NaiveDateTime};
use sia_core::AccountId;
use sia_core::constants::{
    ACK_ACCOUNT_PREFIX, ACK_PLAIN_TERMINATOR, CHECKSUM_LENGTH, LENGTH_HEADER_LENGTH, LINE_START,
    LINE_TERMINATOR, NAK_BODY, NAK_TIMESTAMP_FORMAT,
};

use crate::checksum;
use crate::message::MessageType;

/// How an ACK body ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckTerminator {
    /// `]`, answering a `"SIA-DCS"` line.
    Plain,
    /// Cached hex terminator of an encrypted account, answering `"*SIA-DCS"`.
    Encrypted(String),
}

impl AckTerminator {
    /// ACK marker matching this terminator.
    pub fn message_type(&self) -> MessageType {
        match self {
            AckTerminator::Plain => MessageType::Plain,
            AckTerminator::Encrypted(_) => MessageType::Encrypted,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            AckTerminator::Plain => ACK_PLAIN_TERMINATOR,
            AckTerminator::Encrypted(hex) => hex,
        }
    }
}

/// Outbound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ack {
        sequence: String,
        account: AccountId,
        terminator: AckTerminator,
    },
    Nak {
        timestamp: NaiveDateTime,
    },
}

impl Reply {
    pub fn ack(sequence: impl Into<String>, account: AccountId, terminator: AckTerminator) -> Self {
        Reply::Ack {
            sequence: sequence.into(),
            account,
            terminator,
        }
    }

    /// NAK stamped with the current local time.
    pub fn nak() -> Self {
        Self::nak_at(Local::now().naive_local())
    }

    pub fn nak_at(timestamp: NaiveDateTime) -> Self {
        Reply::Nak { timestamp }
    }

    pub fn is_ack(&self) -> bool {
        matches!(self, Reply::Ack { .. })
    }

    /// Reply body, without checksum, length header and line delimiters.
    pub fn body(&self) -> String {
        match self {
            Reply::Ack {
                sequence,
                account,
                terminator,
            } => format!(
                "{}{sequence}{ACK_ACCOUNT_PREFIX}{account}[{}",
                terminator.message_type().ack_marker(),
                terminator.as_str()
            ),
            Reply::Nak { timestamp } => {
                format!("{NAK_BODY}{}", timestamp.format(NAK_TIMESTAMP_FORMAT))
            }
        }
    }

    /// Complete wire form of the reply.
    pub fn encode(&self) -> Bytes {
        wrap(&self.body())
    }
}

/// Wrap a body as `<LF> CRC4 LEN4 body <CR>`.
pub fn wrap(body: &str) -> Bytes {
    let mut out =
        BytesMut::with_capacity(body.len() + CHECKSUM_LENGTH + LENGTH_HEADER_LENGTH + 2);
    out.put_u8(LINE_START);
    out.put_slice(checksum::compute(body.as_bytes()).as_bytes());
    out.put_slice(format!("{:04X}", body.len()).as_bytes());
    out.put_slice(body.as_bytes());
    out.put_u8(LINE_TERMINATOR);
    out.freeze()
}
