//! Actuator policy: fan and pump flags derived from a single reading.
//!
//! The policy has no memory: readings hovering around a threshold toggle the
//! corresponding flag on every cycle.

use serde::Serialize;

use crate::reading::Reading;

/// The fan runs when the temperature is strictly above this value (°C).
pub const FAN_ON_ABOVE_CELSIUS: i64 = 30;
/// The pump runs when the humidity is strictly below this value (%).
pub const PUMP_ON_BELOW_PERCENT: i64 = 40;

/// Fan/pump flags for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActuatorState {
    pub fan_on: bool,
    pub pump_on: bool,
}

/// Derive the actuator flags for `reading`.
#[must_use]
pub fn derive(reading: Reading) -> ActuatorState {
    ActuatorState {
        fan_on: reading.temperature > FAN_ON_ABOVE_CELSIUS,
        pump_on: reading.humidity < PUMP_ON_BELOW_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_turn_both_on_past_thresholds() {
        let state = derive(Reading::new(31, 39));
        assert_eq!(
            state,
            ActuatorState {
                fan_on: true,
                pump_on: true,
            }
        );
    }

    #[test]
    fn should_keep_both_off_at_thresholds() {
        let state = derive(Reading::new(30, 40));
        assert_eq!(
            state,
            ActuatorState {
                fan_on: false,
                pump_on: false,
            }
        );
    }

    #[test]
    fn should_switch_flags_independently() {
        assert_eq!(
            derive(Reading::new(35, 80)),
            ActuatorState {
                fan_on: true,
                pump_on: false,
            }
        );
        assert_eq!(
            derive(Reading::new(-5, 10)),
            ActuatorState {
                fan_on: false,
                pump_on: true,
            }
        );
    }

    #[test]
    fn should_toggle_on_every_crossing() {
        let flags: Vec<bool> = [31, 30, 31, 30]
            .into_iter()
            .map(|temp| derive(Reading::new(temp, 50)).fan_on)
            .collect();
        assert_eq!(flags, [true, false, true, false]);
    }

    #[test]
    fn should_be_deterministic() {
        let reading = Reading::new(29, 41);
        assert_eq!(derive(reading), derive(reading));
    }
}
