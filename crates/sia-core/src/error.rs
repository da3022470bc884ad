use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Framing errors
    #[error("Framing error: {0}")]
    Framing(String),

    #[error("Frame too large: {size} bytes (max {max_size})")]
    FrameTooLarge { size: usize, max_size: usize },

    // Line errors (answered with a NAK, connection continues)
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Malformed content: {0}")]
    MalformedContent(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    // Configuration errors
    #[error("Invalid account id: {0}")]
    InvalidAccount(String),

    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Invalid ping interval: {minutes} minutes (allowed {min}-{max})")]
    InvalidPingInterval { minutes: u32, min: u32, max: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the error only affects the current line.
    ///
    /// Line-level errors are answered with a NAK and the connection keeps
    /// reading. Everything else (I/O, configuration) ends the connection or
    /// never reaches the line loop in the first place.
    pub fn is_line_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Framing(_)
                | Error::FrameTooLarge { .. }
                | Error::ChecksumMismatch { .. }
                | Error::UnknownAccount(_)
                | Error::MalformedMessage(_)
                | Error::MalformedContent(_)
                | Error::DecryptionFailed(_)
                | Error::Internal(_)
        )
    }

    /// Returns `true` for [`Error::Internal`].
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_errors_are_recoverable() {
        assert!(Error::UnknownAccount("ABC".into()).is_line_recoverable());
        assert!(Error::MalformedMessage("x".into()).is_line_recoverable());
        assert!(
            Error::ChecksumMismatch {
                expected: "0000".into(),
                actual: "FFFF".into(),
            }
            .is_line_recoverable()
        );
    }

    #[test]
    fn test_io_is_not_recoverable() {
        let err = Error::from(std::io::Error::other("reset"));
        assert!(!err.is_line_recoverable());
        assert!(!err.is_internal());
    }

    #[test]
    fn test_checksum_display() {
        let err = Error::ChecksumMismatch {
            expected: "1A2B".into(),
            actual: "3C4D".into(),
        };
        assert_eq!(err.to_string(), "Checksum mismatch: expected 1A2B, got 3C4D");
    }
}
