//! Receiver configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0:7777"
//! protocol = "tcp"
//! max_connections = 100
//!
//! [[accounts]]
//! account = "ABC123"
//! encryption_key = "AAAAAAAAAAAAAAAA"
//! ping_interval = 1
//! zones = 4
//! ```
//!
//! Every field except `accounts[].account` has a default. Account ids, keys
//! and ping intervals are validated while deserializing; [`ReceiverConfig::validate`]
//! checks what needs the whole document.

use serde::Deserialize;
use sia_core::constants::{
    DEFAULT_EVENT_BUFFER, DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_LINE_LENGTH, DEFAULT_PORT,
    DEFAULT_ZONES, MAX_ZONES,
};
use sia_core::{AccountId, EncryptionKey, Error, PingInterval, Result};
use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

/// Transport the receiver listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Tcp,
    Udp,
}

/// Listener settings.
///
/// # Example
///
/// ```
/// use sia_receiver::{ServerConfig, Transport};
///
/// let config = ServerConfig {
///     bind_addr: "127.0.0.1:0".parse().unwrap(),
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.protocol, Transport::Tcp);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    #[serde(default)]
    pub protocol: Transport,

    /// Maximum number of simultaneous TCP connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Lines longer than this are discarded
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Capacity of the event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            protocol: Transport::default(),
            max_connections: default_max_connections(),
            max_line_length: default_max_line_length(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}
fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}
fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}
fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}
fn default_zones() -> u32 {
    DEFAULT_ZONES
}

/// One alarm panel account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub account: AccountId,

    /// Absent for plaintext-only accounts.
    #[serde(default)]
    pub encryption_key: Option<EncryptionKey>,

    /// Minutes between expected reports.
    #[serde(default)]
    pub ping_interval: PingInterval,

    /// Number of zones, each with an alarm, moisture and smoke device.
    #[serde(default = "default_zones")]
    pub zones: u32,
}

impl AccountConfig {
    /// Plaintext account with one zone and the default ping interval.
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            encryption_key: None,
            ping_interval: PingInterval::default(),
            zones: DEFAULT_ZONES,
        }
    }

    pub fn with_key(mut self, key: EncryptionKey) -> Self {
        self.encryption_key = Some(key);
        self
    }

    pub fn with_ping_interval(mut self, ping_interval: PingInterval) -> Self {
        self.ping_interval = ping_interval;
        self
    }

    pub fn with_zones(mut self, zones: u32) -> Self {
        self.zones = zones;
        self
    }
}

/// Complete receiver configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReceiverConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl ReceiverConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns `Error::Config` if the document does not deserialize or fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReceiverConfig =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be read, otherwise see
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check the invariants the receiver relies on.
    ///
    /// # Errors
    /// Returns `Error::Config` if:
    /// - No account is configured
    /// - An account id appears twice
    /// - An account has zero zones or more than 999
    /// - A server limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.accounts.is_empty() {
            return Err(Error::Config("no accounts configured".to_string()));
        }

        let mut seen = HashSet::new();
        for account in &self.accounts {
            if !seen.insert(&account.account) {
                return Err(Error::Config(format!(
                    "account {} is configured more than once",
                    account.account
                )));
            }
            if !(1..=MAX_ZONES).contains(&account.zones) {
                return Err(Error::Config(format!(
                    "account {}: zones must be 1-{MAX_ZONES}, got {}",
                    account.account, account.zones
                )));
            }
        }

        for (name, value) in [
            ("max_connections", self.server.max_connections),
            ("max_line_length", self.server.max_line_length),
            ("event_buffer", self.server.event_buffer),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("server.{name} must be positive")));
            }
        }

        Ok(())
    }
}
