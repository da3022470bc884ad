//! Shared helpers for sia-protocol integration tests.
//!
//! Lines are built with [`LineBuilder`] so every test works on checksummed,
//! correctly sized lines unless it deliberately breaks them.

#![allow(dead_code)]

use sia_core::EncryptionKey;
use sia_protocol::{LineBuilder, SessionCipher};

pub const ACCOUNT: &str = "ABC123";
pub const TIMESTAMP: &str = "14:12:04,09-25-2019";
pub const KEY_128: &str = "AAAAAAAAAAAAAAAA";
pub const KEY_192: &str = "AAAAAAAAAAAAAAAAAAAAAAAA";
pub const KEY_256: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn cipher(key: &str) -> SessionCipher {
    SessionCipher::new(&EncryptionKey::parse(key).unwrap()).unwrap()
}

/// Plaintext line for `code` in `zone`, with the standard timestamp.
pub fn plain_line(sequence: u16, zone: u32, code: &str, message: &str) -> String {
    LineBuilder::new(ACCOUNT)
        .sequence(sequence)
        .event(Some(zone), code, message)
        .timestamp(TIMESTAMP)
        .build()
}

/// Encrypted line for `code` in `zone`.
pub fn encrypted_line(cipher: &SessionCipher, sequence: u16, zone: u32, code: &str) -> String {
    LineBuilder::new(ACCOUNT)
        .sequence(sequence)
        .event(Some(zone), code, "")
        .timestamp(TIMESTAMP)
        .build_encrypted(cipher)
        .unwrap()
}

/// Replace the claimed checksum with one that differs in the last digit.
pub fn flip_checksum(line: &str) -> String {
    let last = line.as_bytes()[3];
    let flipped = if last == b'0' { '1' } else { '0' };
    format!("{}{flipped}{}", &line[..3], &line[4..])
}
