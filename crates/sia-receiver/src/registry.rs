//! Account registry.
//!
//! One [`Session`] per configured account, built once at startup. A session
//! holds everything the dispatcher needs to answer that account's lines: the
//! cipher (if the account is encrypted), the cached ACK terminator and the
//! account's devices.

use sia_core::{AccountId, Error, PingInterval, Result};
use sia_protocol::{AckTerminator, SessionCipher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::config::AccountConfig;
use crate::devices::{Device, DeviceBank, DeviceKey};

/// Runtime state of one account.
#[derive(Debug)]
pub struct Session {
    account: AccountId,
    ping_interval: PingInterval,
    cipher: Option<SessionCipher>,
    terminator: AckTerminator,
    devices: Mutex<DeviceBank>,
}

impl Session {
    /// Build a session. For encrypted accounts the ACK terminator is
    /// encrypted here, with a fresh random IV, and reused for every ACK.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the cipher rejects the key.
    pub fn new(config: &AccountConfig) -> Result<Self> {
        let cipher = config
            .encryption_key
            .as_ref()
            .map(SessionCipher::new)
            .transpose()?;

        let terminator = match &cipher {
            Some(cipher) => AckTerminator::Encrypted(cipher.build_encrypted_terminator()?),
            None => AckTerminator::Plain,
        };

        Ok(Self {
            account: config.account.clone(),
            ping_interval: config.ping_interval,
            cipher,
            terminator,
            devices: Mutex::new(DeviceBank::new(config.zones)),
        })
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn ping_interval(&self) -> PingInterval {
        self.ping_interval
    }

    /// Cipher of an encrypted account.
    pub fn cipher(&self) -> Option<&SessionCipher> {
        self.cipher.as_ref()
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    pub fn ack_terminator(&self) -> &AckTerminator {
        &self.terminator
    }

    /// Lock the account's devices.
    ///
    /// # Errors
    /// Returns `Error::Internal` if a previous holder panicked.
    pub fn devices(&self) -> Result<MutexGuard<'_, DeviceBank>> {
        self.devices
            .lock()
            .map_err(|_| Error::Internal(format!("device bank of {} is poisoned", self.account)))
    }

    /// Snapshot of one device.
    ///
    /// # Errors
    /// See [`devices`](Self::devices).
    pub fn device(&self, key: DeviceKey) -> Result<Option<Device>> {
        Ok(self.devices()?.get(key).cloned())
    }
}

/// All configured accounts, by id.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    sessions: HashMap<AccountId, Arc<Session>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one session per account.
    ///
    /// # Errors
    /// Returns `Error::Config` on a duplicate account, or any session
    /// construction error.
    pub fn from_accounts(accounts: &[AccountConfig]) -> Result<Self> {
        let mut registry = Self::new();
        for account in accounts {
            registry.insert(account)?;
        }
        info!(accounts = registry.len(), "Account registry ready");
        Ok(registry)
    }

    /// Add an account.
    ///
    /// # Errors
    /// Returns `Error::Config` if the account is already registered.
    pub fn insert(&mut self, config: &AccountConfig) -> Result<Arc<Session>> {
        if self.sessions.contains_key(&config.account) {
            return Err(Error::Config(format!(
                "account {} is already registered",
                config.account
            )));
        }

        let session = Arc::new(Session::new(config)?);
        debug!(
            account = %config.account,
            encrypted = session.is_encrypted(),
            zones = config.zones,
            ping_interval = %config.ping_interval,
            "Registered account"
        );
        self.sessions.insert(config.account.clone(), Arc::clone(&session));
        Ok(session)
    }

    pub fn get(&self, account: &AccountId) -> Option<&Arc<Session>> {
        self.sessions.get(account)
    }

    pub fn contains(&self, account: &AccountId) -> bool {
        self.sessions.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Arc<Session>> {
        self.sessions.values()
    }
}
