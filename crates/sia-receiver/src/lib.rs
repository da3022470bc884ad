//! SIA DC-09 alarm receiver.
//!
//! Listens for alarm panels, validates and decodes their lines, applies the
//! reaction table to per-account devices, tracks account availability and
//! reports everything on one event channel.

pub mod availability;
pub mod config;
pub mod devices;
pub mod dispatcher;
pub mod events;
pub mod reactions;
pub mod registry;
pub mod server;

pub use availability::{AvailabilityTracker, Liveness};
pub use config::{AccountConfig, ReceiverConfig, ServerConfig, Transport};
pub use devices::{
    AlarmState, Device, DeviceAttributes, DeviceBank, DeviceClass, DeviceKey, DeviceState,
};
pub use dispatcher::{Dispatcher, Outcome};
pub use events::{AvailabilityChange, Event, ReceiverEvent};
pub use reactions::{Reaction, StateValue};
pub use registry::{AccountRegistry, Session};
pub use server::{ServerError, SiaServer};
