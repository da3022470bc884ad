//! Logical devices of an account.
//!
//! Every account owns one heartbeat device on zone 0 and, for each configured
//! zone, an alarm, a moisture and a smoke device. Reactions update them; each
//! keeps one level of history so that "restore previous state" codes can undo
//! the last change.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sia_core::constants::HUB_ZONE;
use std::collections::BTreeMap;
use std::fmt;

use crate::reactions::{Reaction, StateValue};

/// Kind of logical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Last contact of the account, zone 0 only.
    Heartbeat,
    Alarm,
    Moisture,
    Smoke,
}

impl DeviceClass {
    /// Classes instantiated for every configured zone.
    pub const ZONE_CLASSES: [DeviceClass; 3] =
        [DeviceClass::Alarm, DeviceClass::Moisture, DeviceClass::Smoke];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Heartbeat => "heartbeat",
            DeviceClass::Alarm => "alarm",
            DeviceClass::Moisture => "moisture",
            DeviceClass::Smoke => "smoke",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device address within an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceKey {
    pub zone: u32,
    pub class: DeviceClass,
}

impl DeviceKey {
    pub fn new(zone: u32, class: DeviceClass) -> Self {
        Self { zone, class }
    }

    /// The account's heartbeat device.
    pub fn heartbeat() -> Self {
        Self::new(HUB_ZONE, DeviceClass::Heartbeat)
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.class, self.zone)
    }
}

/// State of an alarm device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmState {
    Disarmed,
    ArmedAway,
    ArmedNight,
    ArmedCustomBypass,
    Triggered,
}

/// Current or previous state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DeviceState {
    /// Nothing reported yet.
    #[default]
    Unknown,
    Alarm(AlarmState),
    /// Moisture or smoke detected.
    Binary(bool),
    /// Last routine report of the account.
    LastContact(DateTime<Utc>),
}

/// Attributes refreshed by every reaction that reaches the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceAttributes {
    pub last_message: Option<String>,
    pub last_code: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
    /// Full event content, set by message-recording reactions.
    pub last_sia_event: Option<String>,
}

/// One logical device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub key: DeviceKey,
    pub current: DeviceState,
    pub previous: DeviceState,
    pub attributes: DeviceAttributes,
}

impl Device {
    fn new(key: DeviceKey) -> Self {
        Self {
            key,
            current: DeviceState::Unknown,
            previous: DeviceState::Unknown,
            attributes: DeviceAttributes::default(),
        }
    }

    /// Move to `state`, remembering the state being replaced.
    fn transition(&mut self, state: DeviceState) {
        self.previous = std::mem::replace(&mut self.current, state);
    }

    /// Swap back to the remembered state.
    fn restore_previous(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }
}

/// What a reaction changes, taken from the event being applied.
#[derive(Debug, Clone, Copy)]
pub struct Update<'a> {
    pub zone: u32,
    pub code: Option<&'a str>,
    pub message: &'a str,
    /// Decrypted content block of the line.
    pub content: &'a str,
    pub at: DateTime<Utc>,
}

/// Devices of one account.
#[derive(Debug, Clone)]
pub struct DeviceBank {
    zones: u32,
    devices: BTreeMap<DeviceKey, Device>,
}

impl DeviceBank {
    /// Heartbeat device plus one device per class for zones `1..=zones`.
    pub fn new(zones: u32) -> Self {
        let heartbeat = DeviceKey::heartbeat();
        let mut devices = BTreeMap::new();
        devices.insert(heartbeat, Device::new(heartbeat));

        for zone in 1..=zones {
            for class in DeviceClass::ZONE_CLASSES {
                let key = DeviceKey::new(zone, class);
                devices.insert(key, Device::new(key));
            }
        }

        Self { zones, devices }
    }

    pub fn zones(&self) -> u32 {
        self.zones
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, key: DeviceKey) -> Option<&Device> {
        self.devices.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Keys of every device that takes part in availability signals.
    pub fn zone_device_keys(&self) -> Vec<DeviceKey> {
        self.devices
            .keys()
            .filter(|key| key.class != DeviceClass::Heartbeat)
            .copied()
            .collect()
    }

    /// Apply `reaction`.
    ///
    /// Returns the key of the updated device, or `None` if the reaction
    /// addresses a zone this account does not have.
    pub fn apply(&mut self, reaction: Reaction, update: &Update<'_>) -> Option<DeviceKey> {
        let key = reaction.target(update.zone);
        let device = self.devices.get_mut(&key)?;

        match reaction {
            Reaction::SetState { state, .. } => match state {
                StateValue::Alarm(alarm) => device.transition(DeviceState::Alarm(alarm)),
                StateValue::Binary(value) => device.transition(DeviceState::Binary(value)),
                StateValue::Previous => device.restore_previous(),
            },
            Reaction::StampNow => device.transition(DeviceState::LastContact(update.at)),
            Reaction::RecordMessage => {
                device.attributes.last_sia_event = Some(update.content.to_string());
            }
        }

        device.attributes.last_message = Some(update.message.to_string());
        device.attributes.last_code = update.code.map(str::to_string);
        device.attributes.last_update = Some(update.at);

        Some(key)
    }
}
