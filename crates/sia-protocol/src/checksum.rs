//! CRC-16 checksum used by SIA DC-09 lines and replies.
//!
//! The checksum is a bit-reflected CRC-16 with polynomial `0xA001`, a zero
//! initial register and no final XOR (the "CRC-16/ARC" parameter set). It is
//! rendered as four zero-padded uppercase hex digits.
//!
//! Panels verify replies byte for byte, so this must stay bit-identical to
//! what they compute.
//!
//! ```
//! use sia_protocol::checksum;
//!
//! assert_eq!(checksum::compute(b"123456789"), "BB3D");
//! assert!(checksum::verify("BB3D", b"123456789"));
//! ```

use sia_core::constants::CRC_POLYNOMIAL;

/// Compute the raw 16-bit CRC register over `bytes`.
pub fn crc16(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in bytes {
        let mut temp = u16::from(byte);
        for _ in 0..8 {
            temp ^= crc & 1;
            crc >>= 1;
            if temp & 1 != 0 {
                crc ^= CRC_POLYNOMIAL;
            }
            temp >>= 1;
        }
    }
    crc
}

/// Compute the checksum of `bytes` as 4 uppercase hex digits.
pub fn compute(bytes: &[u8]) -> String {
    format!("{:04X}", crc16(bytes))
}

/// Check a claimed checksum against the one computed over `body`.
///
/// The comparison is on the string form, exactly as it appears on the wire.
/// A lowercase claim therefore does not match.
pub fn verify(expected: &str, body: &[u8]) -> bool {
    expected == compute(body)
}
