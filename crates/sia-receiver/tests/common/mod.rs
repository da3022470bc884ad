//! Shared helpers for sia-receiver integration tests.
//!
//! Every test binds its own server on `127.0.0.1:0` and talks raw bytes to
//! it, the way a panel would.

#![allow(dead_code)]

use sia_core::{AccountId, EncryptionKey};
use sia_protocol::{LineBuilder, SessionCipher, builder};
use sia_receiver::{AccountConfig, ReceiverConfig, ReceiverEvent, ServerConfig, SiaServer, Transport};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::time::timeout;

pub const PLAIN_ACCOUNT: &str = "ABC123";
pub const ENCRYPTED_ACCOUNT: &str = "1234";
pub const KEY: &str = "AAAAAAAAAAAAAAAA";
pub const TIMESTAMP: &str = "14:12:04,09-25-2019";
pub const WAIT: Duration = Duration::from_secs(5);

pub fn key() -> EncryptionKey {
    EncryptionKey::parse(KEY).unwrap()
}

pub fn cipher() -> SessionCipher {
    SessionCipher::new(&key()).unwrap()
}

/// One plaintext account with two zones and one encrypted account.
pub fn config(protocol: Transport) -> ReceiverConfig {
    ReceiverConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            protocol,
            ..ServerConfig::default()
        },
        accounts: vec![
            AccountConfig::new(AccountId::new(PLAIN_ACCOUNT).unwrap()).with_zones(2),
            AccountConfig::new(AccountId::new(ENCRYPTED_ACCOUNT).unwrap()).with_key(key()),
        ],
    }
}

/// Bind and start a server, returning it with its event channel.
pub async fn start(config: ReceiverConfig) -> (SiaServer, mpsc::Receiver<ReceiverEvent>) {
    let mut server = SiaServer::bind(config).await.unwrap();
    let events = server.take_events().unwrap();
    server.start().unwrap();
    (server, events)
}

pub fn plain_line(sequence: u16, zone: Option<u32>, code: &str, message: &str) -> String {
    LineBuilder::new(PLAIN_ACCOUNT)
        .sequence(sequence)
        .event(zone, code, message)
        .timestamp(TIMESTAMP)
        .build()
}

pub fn encrypted_line(sequence: u16, zone: Option<u32>, code: &str, message: &str) -> String {
    LineBuilder::new(ENCRYPTED_ACCOUNT)
        .sequence(sequence)
        .event(zone, code, message)
        .timestamp(TIMESTAMP)
        .build_encrypted(&cipher())
        .unwrap()
}

/// Replace the claimed checksum with one that differs in the first digit.
pub fn flip_checksum(line: &str) -> String {
    let flipped = if line.starts_with('0') { '1' } else { '0' };
    format!("{flipped}{}", &line[1..])
}

/// Minimal panel: writes lines, reads `<LF>...<CR>` replies.
pub struct Panel {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Panel {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = timeout(WAIT, TcpStream::connect(addr))
            .await
            .expect("connect timeout")
            .unwrap();
        let (read, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer,
        }
    }

    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.unwrap();
    }

    pub async fn send(&mut self, line: &str) {
        self.send_raw(&builder::to_wire(line)).await;
    }

    /// Next reply, `None` once the server closed the connection.
    pub async fn reply(&mut self) -> Option<Vec<u8>> {
        let mut reply = Vec::new();
        let read = timeout(WAIT, self.reader.read_until(b'\r', &mut reply))
            .await
            .expect("reply timeout");
        match read {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(reply),
        }
    }

    /// Next reply body, without checksum, length header and delimiters.
    pub async fn reply_body(&mut self) -> String {
        let reply = self.reply().await.expect("connection closed");
        assert_reply_is_consistent(&reply);
        String::from_utf8(reply[9..reply.len() - 1].to_vec()).unwrap()
    }
}

/// Checksum and length header of a reply match its body.
pub fn assert_reply_is_consistent(reply: &[u8]) {
    assert_eq!(reply[0], b'\n');
    assert_eq!(reply[reply.len() - 1], b'\r');

    let body = &reply[9..reply.len() - 1];
    assert_eq!(&reply[1..5], sia_protocol::checksum::compute(body).as_bytes());
    assert_eq!(&reply[5..9], format!("{:04X}", body.len()).as_bytes());
}

/// Next event on the channel, skipping availability changes.
pub async fn next_event(events: &mut mpsc::Receiver<ReceiverEvent>) -> sia_receiver::Event {
    loop {
        let event = timeout(WAIT, events.recv())
            .await
            .expect("event timeout")
            .expect("event channel closed");
        if let ReceiverEvent::Event(event) = event {
            return event;
        }
    }
}
