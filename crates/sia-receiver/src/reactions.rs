//! Reaction table.
//!
//! Maps a two-letter event code onto one of a closed set of effects. Codes
//! without an entry take [`Reaction::FALLBACK`], which records the message on
//! the heartbeat device, so that no accepted line is silently dropped.
//!
//! | Codes | Reaction |
//! |-------|----------|
//! | `BA` `TA` | alarm triggered |
//! | `BR` | alarm back to its previous state |
//! | `CA` `CG` `CP` `CQ` | armed away |
//! | `CF` | armed custom bypass |
//! | `NL` | armed night |
//! | `CL` `OA` `OG` `OP` `OQ` `OR` | disarmed |
//! | `GA` / `GH` | smoke on / off |
//! | `WA` / `WH` | moisture on / off |
//! | `RP` | heartbeat stamped with the current time |
//! | `YG` and everything else | message recorded on the heartbeat |

use serde::Serialize;
use sia_core::constants::HUB_ZONE;

use crate::devices::{AlarmState, DeviceClass, DeviceKey};

/// Fixed value written by [`Reaction::SetState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StateValue {
    Alarm(AlarmState),
    Binary(bool),
    /// Swap back to the device's previous state.
    Previous,
}

/// Effect of an event code on the account's devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reaction {
    /// Set the state of the zone's device of `class`.
    SetState { class: DeviceClass, state: StateValue },
    /// Set the heartbeat device to the current time.
    StampNow,
    /// Attach the message to the heartbeat device without a state change.
    RecordMessage,
}

impl Reaction {
    /// Reaction for codes missing from the table.
    pub const FALLBACK: Reaction = Reaction::RecordMessage;

    /// Table entry for `code`, if any.
    ///
    /// ```
    /// use sia_receiver::{AlarmState, DeviceClass, Reaction, StateValue};
    ///
    /// assert_eq!(
    ///     Reaction::lookup("CL"),
    ///     Some(Reaction::SetState {
    ///         class: DeviceClass::Alarm,
    ///         state: StateValue::Alarm(AlarmState::Disarmed),
    ///     })
    /// );
    /// assert_eq!(Reaction::lookup("ZZ"), None);
    /// ```
    pub fn lookup(code: &str) -> Option<Reaction> {
        use AlarmState::*;

        let reaction = match code {
            "BA" | "TA" => alarm(Triggered),
            "BR" => Reaction::SetState {
                class: DeviceClass::Alarm,
                state: StateValue::Previous,
            },
            "CA" | "CG" | "CP" | "CQ" => alarm(ArmedAway),
            "CF" => alarm(ArmedCustomBypass),
            "NL" => alarm(ArmedNight),
            "CL" | "OA" | "OG" | "OP" | "OQ" | "OR" => alarm(Disarmed),
            "GA" => binary(DeviceClass::Smoke, true),
            "GH" => binary(DeviceClass::Smoke, false),
            "WA" => binary(DeviceClass::Moisture, true),
            "WH" => binary(DeviceClass::Moisture, false),
            "RP" => Reaction::StampNow,
            "YG" => Reaction::RecordMessage,
            _ => return None,
        };
        Some(reaction)
    }

    /// Table entry for `code`, or [`FALLBACK`](Self::FALLBACK).
    ///
    /// Lines without an event (`code` is `None`) take the fallback as well.
    pub fn for_code(code: Option<&str>) -> Reaction {
        code.and_then(Self::lookup).unwrap_or(Self::FALLBACK)
    }

    /// Device this reaction updates for an event on `zone`.
    ///
    /// Heartbeat reactions always address zone 0.
    pub fn target(self, zone: u32) -> DeviceKey {
        match self {
            Reaction::SetState { class, .. } => DeviceKey::new(zone, class),
            Reaction::StampNow | Reaction::RecordMessage => {
                DeviceKey::new(HUB_ZONE, DeviceClass::Heartbeat)
            }
        }
    }

    /// Returns `true` if the reaction changes a device state.
    pub fn changes_state(self) -> bool {
        !matches!(self, Reaction::RecordMessage)
    }
}

fn alarm(state: AlarmState) -> Reaction {
    Reaction::SetState {
        class: DeviceClass::Alarm,
        state: StateValue::Alarm(state),
    }
}

fn binary(class: DeviceClass, value: bool) -> Reaction {
    Reaction::SetState {
        class,
        state: StateValue::Binary(value),
    }
}
