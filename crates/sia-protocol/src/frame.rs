//! Inbound line frame.
//!
//! A [`Frame`] is one complete line as cut by the
//! [`StreamParser`](crate::StreamParser): the bytes between two `<CR>`
//! terminators with the leading `<LF>` already removed.
//!
//! ```text
//! CRC4 LEN4 "SIA-DCS" ...
//! ^^^^      ^----------------- body (checksummed)
//! ```

use bytes::Bytes;
use sia_core::constants::CHECKSUM_LENGTH;
use sia_core::{Error, Result};
use std::fmt;

use crate::checksum;

/// One framed inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Bytes,
}

impl Frame {
    /// Wrap raw line bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Raw line bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Line length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the line has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The claimed checksum: the first four bytes of the line.
    ///
    /// Returns `None` if the line is shorter than that.
    pub fn claimed_checksum(&self) -> Option<&[u8]> {
        self.data.get(..CHECKSUM_LENGTH)
    }

    /// Checksummed body: everything from the first `"` to the end of the line.
    ///
    /// Returns `None` if the line contains no `"`.
    pub fn body(&self) -> Option<&[u8]> {
        let start = self.data.iter().position(|&b| b == b'"')?;
        Some(&self.data[start..])
    }

    /// Check the claimed checksum against the body.
    ///
    /// # Errors
    /// - `Error::MalformedMessage` if the line has no checksum or no body
    /// - `Error::ChecksumMismatch` if the checksums differ
    pub fn verify_checksum(&self) -> Result<()> {
        let claimed = self
            .claimed_checksum()
            .ok_or_else(|| Error::MalformedMessage("line too short for checksum".to_string()))?;
        let body = self
            .body()
            .ok_or_else(|| Error::MalformedMessage("line has no quoted marker".to_string()))?;

        let actual = checksum::compute(body);
        if claimed != actual.as_bytes() {
            return Err(Error::ChecksumMismatch {
                expected: String::from_utf8_lossy(claimed).into_owned(),
                actual,
            });
        }
        Ok(())
    }

    /// View the line as text.
    ///
    /// # Errors
    /// Returns `Error::MalformedMessage` if the line is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.data)
            .map_err(|e| Error::MalformedMessage(format!("line is not valid UTF-8: {e}")))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl From<&'static [u8]> for Frame {
    fn from(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }
}
