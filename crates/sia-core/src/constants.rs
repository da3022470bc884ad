//! Core constants for the SIA DC-09 receiver.
//!
//! This module defines the protocol-level constants shared by the codec and
//! the receiver. Panels compare replies byte for byte, so most of these values
//! are fixed by the wire format and must not be changed.
//!
//! # Line Structure
//!
//! An inbound line as it appears on the wire:
//!
//! ```text
//! <LF>CRC4 LEN4 "SIA-DCS" SEQ4 [Rrcvr] Lpref # ACCT [ CONTENT ] _HH:MM:SS,MM-DD-YYYY <CR>
//! ```
//!
//! Where:
//! - `<LF>` - Leading line feed (0x0A), stripped by the framer
//! - `CRC4` - CRC-16/ARC of everything from the first `"` onwards, 4 uppercase hex digits
//! - `LEN4` - Body length, 4 hex digits (`0` followed by three hex digits)
//! - `"SIA-DCS"` / `"*SIA-DCS"` - Plaintext or encrypted marker
//! - `SEQ4` - Sequence number, echoed in the ACK
//! - `Rrcvr` - Optional receiver number
//! - `Lpref` - Line/account prefix
//! - `ACCT` - Account id (3-16 hex digits)
//! - `CONTENT` - Event data, or hex cipher text for encrypted lines
//! - `<CR>` - Line terminator (0x0D)
//!
//! # Usage
//!
//! ```
//! use sia_core::constants::*;
//!
//! assert_eq!(LINE_TERMINATOR, b'\r');
//! assert_eq!(MARKER_ENCRYPTED, "\"*SIA-DCS\"");
//! assert_eq!(CRC_POLYNOMIAL, 0xA001);
//! ```

// ============================================================================
// Line Framing
// ============================================================================

/// Line terminator (CR).
///
/// Every inbound line and every outbound reply ends with this byte.
pub const LINE_TERMINATOR: u8 = b'\r';

/// Leading line feed (LF).
///
/// Panels start each line with a line feed; the framer strips it before the
/// line reaches the parser. Replies start with it as well.
pub const LINE_START: u8 = b'\n';

/// Length of the checksum prefix in hex digits.
pub const CHECKSUM_LENGTH: usize = 4;

/// Length of the body length header in hex digits.
pub const LENGTH_HEADER_LENGTH: usize = 4;

/// Length of the sequence number in digits.
pub const SEQUENCE_LENGTH: usize = 4;

// ============================================================================
// Message Markers
// ============================================================================

/// Message type marker for plaintext events.
pub const MARKER_PLAIN: &str = "\"SIA-DCS\"";

/// Message type marker for encrypted events.
pub const MARKER_ENCRYPTED: &str = "\"*SIA-DCS\"";

/// Acknowledgment marker for plaintext sessions.
pub const ACK_PLAIN: &str = "\"ACK\"";

/// Acknowledgment marker for encrypted sessions.
pub const ACK_ENCRYPTED: &str = "\"*ACK\"";

/// Account prefix written into every ACK between the sequence and the account.
pub const ACK_ACCOUNT_PREFIX: &str = "L0#";

/// Plaintext session ACK terminator.
pub const ACK_PLAIN_TERMINATOR: &str = "]";

/// Fixed NAK body. A local timestamp is appended to it.
///
/// The body is identical for every failure so that an unauthenticated peer
/// cannot tell which validation step rejected its line.
pub const NAK_BODY: &str = "\"NAK\"0000L0R0A0[]";

/// `chrono` format of the timestamp suffix appended to NAK bodies.
pub const NAK_TIMESTAMP_FORMAT: &str = "_%H:%M:%S,%m-%d-%Y";

// ============================================================================
// Checksum
// ============================================================================

/// Reflected CRC-16 polynomial (CRC-16/ARC).
pub const CRC_POLYNOMIAL: u16 = 0xA001;

// ============================================================================
// Encryption
// ============================================================================

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Initialization vector used to decrypt inbound event content.
///
/// The DC-09 standard fixes the decryption IV to all zeros. The reply
/// terminator, by contrast, is encrypted with a random IV.
pub const ZERO_IV: [u8; AES_BLOCK_SIZE] = [0u8; AES_BLOCK_SIZE];

/// Plaintext block encrypted once per account to build the ACK terminator.
pub const ENCRYPTED_TERMINATOR_PLAINTEXT: &[u8; AES_BLOCK_SIZE] = b"00000000000000|]";

/// Separator between the random padding and the event data in decrypted content.
pub const PAD_SEPARATOR: char = '|';

/// Valid AES key lengths in bytes (AES-128, AES-192, AES-256).
pub const VALID_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

// ============================================================================
// Accounts
// ============================================================================

/// Minimum account id length in characters.
pub const MIN_ACCOUNT_LENGTH: usize = 3;

/// Maximum account id length in characters.
pub const MAX_ACCOUNT_LENGTH: usize = 16;

/// Minimum ping interval in minutes.
pub const MIN_PING_INTERVAL_MINUTES: u32 = 1;

/// Maximum ping interval in minutes (one day).
pub const MAX_PING_INTERVAL_MINUTES: u32 = 1440;

/// Default ping interval in minutes.
pub const DEFAULT_PING_INTERVAL_MINUTES: u32 = 1;

/// Grace period added to the ping interval before an account is flagged
/// unavailable.
pub const PING_INTERVAL_MARGIN_SECS: u64 = 30;

/// Zone number of the account-level (heartbeat) device.
pub const HUB_ZONE: u32 = 0;

/// Maximum number of zones per account.
pub const MAX_ZONES: u32 = 999;

// ============================================================================
// Receiver Defaults
// ============================================================================

/// Default listening port. The receiver binds all interfaces by default.
pub const DEFAULT_PORT: u16 = 7777;

/// Default zone count of a configured account.
pub const DEFAULT_ZONES: u32 = 1;

/// Default maximum simultaneous connections.
pub const DEFAULT_MAX_CONNECTIONS: usize = 100;

/// Default maximum line length in bytes.
///
/// DC-09 lines are well under 1 KB. Anything larger is discarded as a framing
/// error.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;

/// Default capacity of the event channel handed to collaborators.
pub const DEFAULT_EVENT_BUFFER: usize = 1024;

/// Number of internal errors tolerated on one connection within
/// [`INTERNAL_ERROR_WINDOW_MS`] before the connection is closed.
pub const INTERNAL_ERROR_BURST_LIMIT: usize = 5;

/// Window for [`INTERNAL_ERROR_BURST_LIMIT`] in milliseconds.
pub const INTERNAL_ERROR_WINDOW_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_quoted() {
        for marker in [MARKER_PLAIN, MARKER_ENCRYPTED, ACK_PLAIN, ACK_ENCRYPTED] {
            assert!(marker.starts_with('"'));
            assert!(marker.ends_with('"'));
        }
    }

    #[test]
    fn test_terminator_plaintext_is_one_block() {
        assert_eq!(ENCRYPTED_TERMINATOR_PLAINTEXT.len(), AES_BLOCK_SIZE);
        assert_eq!(ZERO_IV.len(), AES_BLOCK_SIZE);
    }

    #[test]
    fn test_ping_interval_range() {
        assert!(MIN_PING_INTERVAL_MINUTES <= DEFAULT_PING_INTERVAL_MINUTES);
        assert!(DEFAULT_PING_INTERVAL_MINUTES <= MAX_PING_INTERVAL_MINUTES);
    }
}
