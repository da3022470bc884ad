use crate::{
    Result,
    constants::{
        DEFAULT_PING_INTERVAL_MINUTES, MAX_ACCOUNT_LENGTH, MAX_PING_INTERVAL_MINUTES,
        MIN_ACCOUNT_LENGTH, MIN_PING_INTERVAL_MINUTES, PING_INTERVAL_MARGIN_SECS,
        VALID_KEY_LENGTHS,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Alarm panel account identifier (3-16 hex digits, uppercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account id with validation.
    ///
    /// The id is normalized (trimmed and converted to uppercase) before validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidAccount` if:
    /// - The length is not between 3-16 characters
    /// - The id contains anything other than hex digits
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim().to_ascii_uppercase();

        let len = id.len();
        if !(MIN_ACCOUNT_LENGTH..=MAX_ACCOUNT_LENGTH).contains(&len) {
            return Err(Error::InvalidAccount(format!(
                "account id must be {MIN_ACCOUNT_LENGTH}-{MAX_ACCOUNT_LENGTH} chars, got {len}"
            )));
        }

        if !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidAccount(format!(
                "account id must be hexadecimal, got {id:?}"
            )));
        }

        Ok(AccountId(id))
    }

    /// Get the account id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AccountId::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        AccountId::new(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// AES key size, derived from the key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Key length in bytes.
    #[must_use]
    pub fn byte_len(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AES-{}", self.byte_len() * 8)
    }
}

/// Symmetric account key for encrypted (`*SIA-DCS`) sessions.
///
/// Panels are configured with a 16, 24 or 32 character ASCII key, which is
/// used as raw key bytes. A 48 or 64 character hex string is decoded into a
/// 24 or 32 byte key instead, since no ASCII key of that length is valid.
///
/// # Security
/// Comparison is constant-time and `Debug` never prints the key material.
#[derive(Clone, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct EncryptionKey {
    bytes: Vec<u8>,
    size: KeySize,
}

impl EncryptionKey {
    /// Parse a key from its configured text form.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the text does not yield 16, 24 or 32 bytes.
    pub fn parse(text: &str) -> Result<Self> {
        let len = text.len();

        if VALID_KEY_LENGTHS.contains(&len) {
            if !text.is_ascii() {
                return Err(Error::InvalidKey("key must be ASCII".to_string()));
            }
            return Self::from_bytes(text.as_bytes());
        }

        if (len == 48 || len == 64) && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes = hex::decode(text).map_err(|e| Error::InvalidKey(e.to_string()))?;
            return Self::from_bytes(&bytes);
        }

        Err(Error::InvalidKey(format!(
            "key must be 16, 24 or 32 ASCII chars (or 48/64 hex digits), got {len}"
        )))
    }

    /// Create a key from raw bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the length is not 16, 24 or 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let size = KeySize::from_len(bytes.len()).ok_or_else(|| {
            Error::InvalidKey(format!("key must be 16, 24 or 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self {
            bytes: bytes.to_vec(),
            size,
        })
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// AES variant selected by this key.
    #[must_use]
    pub fn size(&self) -> KeySize {
        self.size
    }
}

impl PartialEq for EncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).into()
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl std::str::FromStr for EncryptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EncryptionKey::parse(s)
    }
}

impl TryFrom<String> for EncryptionKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        EncryptionKey::parse(&value)
    }
}

/// Expected reporting interval of an account, in minutes (1-1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PingInterval(u32);

impl PingInterval {
    /// Create a ping interval with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidPingInterval` if minutes is outside 1-1440.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if !(MIN_PING_INTERVAL_MINUTES..=MAX_PING_INTERVAL_MINUTES).contains(&minutes) {
            return Err(Error::InvalidPingInterval {
                minutes,
                min: MIN_PING_INTERVAL_MINUTES,
                max: MAX_PING_INTERVAL_MINUTES,
            });
        }
        Ok(PingInterval(minutes))
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }

    /// Time without traffic after which the account is considered unavailable.
    ///
    /// This is the ping interval plus a fixed 30 second margin.
    #[must_use]
    pub fn unavailable_after(self) -> Duration {
        self.as_duration() + Duration::from_secs(PING_INTERVAL_MARGIN_SECS)
    }
}

impl Default for PingInterval {
    fn default() -> Self {
        PingInterval(DEFAULT_PING_INTERVAL_MINUTES)
    }
}

impl TryFrom<u32> for PingInterval {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        PingInterval::from_minutes(value)
    }
}

impl From<PingInterval> for u32 {
    fn from(interval: PingInterval) -> Self {
        interval.0
    }
}

impl fmt::Display for PingInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
