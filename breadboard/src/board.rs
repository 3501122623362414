/**
 * @file board.rs
 * @author Nguyen Le Duy
 * @date 16/05/2025
 * @brief External board pin registry and its I/O API
 */
use crate::common::{
    ExternalPin, NodeKey, PowerRail, ANALOG_MAX, LOGIC_HIGH_VOLTS, PWM_MAX,
};
use api_types::{PinLevel, PinMode};
use std::collections::BTreeMap;

pub const DIGITAL_PIN_COUNT: usize = 14;
pub const ANALOG_PIN_COUNT: usize = 6;
/// Digital pins capable of PWM output.
pub const PWM_PINS: [u8; 6] = [3, 5, 6, 9, 10, 11];

#[derive(Debug, Clone, Copy)]
pub struct DigitalPin {
    pub index: u8,
    pub mode: PinMode,
    pub level: PinLevel,
    pub voltage: f32,
    pub is_pwm: bool,
    pub pwm_value: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalogPin {
    pub index: u8,
    /// Raw reading, 0..=1023.
    pub value: u16,
    pub voltage: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerPin {
    pub rail: PowerRail,
    pub voltage: f32,
}

/// The microcontroller-style board: 14 digital pins (6 PWM-capable), 6
/// analog inputs and 5 power rails. Purely a pin registry; the propagation
/// engine reads it through `voltage_snapshot` and never writes it.
#[derive(Debug, Clone)]
pub struct Board {
    digital: [DigitalPin; DIGITAL_PIN_COUNT],
    analog: [AnalogPin; ANALOG_PIN_COUNT],
    power: [PowerPin; 5],
}

impl Default for Board {
    fn default() -> Self {
        let digital = core::array::from_fn(|index| DigitalPin {
            index: index as u8,
            mode: PinMode::Input,
            level: PinLevel::Low,
            voltage: 0.0,
            is_pwm: PWM_PINS.contains(&(index as u8)),
            pwm_value: 0,
        });

        let analog = core::array::from_fn(|index| AnalogPin {
            index: index as u8,
            value: 0,
            voltage: 0.0,
        });

        let power = PowerRail::ALL.map(|rail| PowerPin {
            rail,
            voltage: rail.nominal_voltage(),
        });

        Self {
            digital,
            analog,
            power,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn pin_mode(&mut self, index: u8, mode: PinMode) {
        let Some(pin) = self.digital.get_mut(index as usize) else {
            log::warn!("pin_mode: digital pin {index} out of range");
            return;
        };

        pin.mode = mode;
        log::debug!("pin_mode({index}, {mode:?})");
    }

    pub fn digital_write(&mut self, index: u8, level: PinLevel) {
        let Some(pin) = self.digital.get_mut(index as usize) else {
            log::warn!("digital_write: digital pin {index} out of range");
            return;
        };

        pin.level = level;
        pin.voltage = if level.is_high() {
            LOGIC_HIGH_VOLTS
        } else {
            0.0
        };
        log::debug!("digital_write({index}, {level:?}) -> {}V", pin.voltage);
    }

    /// Out-of-range reads return the inert default LOW.
    pub fn digital_read(&self, index: u8) -> PinLevel {
        self.digital
            .get(index as usize)
            .map(|pin| pin.level)
            .unwrap_or_default()
    }

    /// Drive a PWM-capable pin with a duty of 0..=255; the pin carries the
    /// duty-scaled average voltage. Writes to non-PWM or out-of-range pins
    /// are ignored.
    pub fn analog_write(&mut self, index: u8, duty: u8) {
        let Some(pin) = self.digital.get_mut(index as usize) else {
            log::warn!("analog_write: digital pin {index} out of range");
            return;
        };

        if !pin.is_pwm {
            log::warn!("analog_write: digital pin {index} is not PWM-capable");
            return;
        }

        pin.pwm_value = duty;
        pin.voltage = f32::from(duty) / f32::from(PWM_MAX) * LOGIC_HIGH_VOLTS;
        log::debug!("analog_write({index}, {duty}) -> {:.2}V", pin.voltage);
    }

    /// Raw analog reading, 0..=1023. Out-of-range reads return 0.
    pub fn analog_read(&self, index: u8) -> u16 {
        self.analog
            .get(index as usize)
            .map(|pin| pin.value.min(ANALOG_MAX))
            .unwrap_or(0)
    }

    pub fn digital_pin_voltage(&self, index: u8) -> f32 {
        self.digital
            .get(index as usize)
            .map(|pin| pin.voltage)
            .unwrap_or(0.0)
    }

    pub fn analog_pin_voltage(&self, index: u8) -> f32 {
        self.analog
            .get(index as usize)
            .map(|pin| pin.voltage)
            .unwrap_or(0.0)
    }

    pub fn power_rail_voltage(&self, rail: PowerRail) -> f32 {
        self.power
            .iter()
            .find(|pin| pin.rail == rail)
            .map(|pin| pin.voltage)
            .unwrap_or(0.0)
    }

    pub fn digital_pins(&self) -> &[DigitalPin] {
        &self.digital
    }

    /// Voltage of every external pin, keyed by node. Ordered so that the
    /// propagation engine seeds deterministically: digital pins first, then
    /// analog, then power rails.
    pub fn voltage_snapshot(&self) -> BTreeMap<NodeKey, f32> {
        let mut snapshot = BTreeMap::new();

        for pin in &self.digital {
            snapshot.insert(
                NodeKey::External(ExternalPin::Digital(pin.index)),
                pin.voltage,
            );
        }

        for pin in &self.analog {
            snapshot.insert(
                NodeKey::External(ExternalPin::Analog(pin.index)),
                pin.voltage,
            );
        }

        for pin in &self.power {
            snapshot.insert(NodeKey::External(ExternalPin::Power(pin.rail)), pin.voltage);
        }

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_write_sets_level_and_voltage() {
        let mut board = Board::new();
        board.pin_mode(13, PinMode::Output);
        board.digital_write(13, PinLevel::High);

        assert_eq!(board.digital_read(13), PinLevel::High);
        assert_eq!(board.digital_pin_voltage(13), 5.0);

        board.digital_write(13, PinLevel::Low);
        assert_eq!(board.digital_read(13), PinLevel::Low);
        assert_eq!(board.digital_pin_voltage(13), 0.0);
    }

    #[test]
    fn test_analog_write_scales_voltage_on_pwm_pins() {
        let mut board = Board::new();
        board.analog_write(9, 255);
        assert_eq!(board.digital_pin_voltage(9), 5.0);

        board.analog_write(9, 0);
        assert_eq!(board.digital_pin_voltage(9), 0.0);

        board.analog_write(9, 128);
        assert!((board.digital_pin_voltage(9) - 128.0 / 255.0 * 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_analog_write_ignores_non_pwm_pins() {
        let mut board = Board::new();
        board.analog_write(13, 255);
        assert_eq!(board.digital_pin_voltage(13), 0.0);
    }

    #[test]
    fn test_out_of_range_reads_are_inert() {
        let board = Board::new();
        assert_eq!(board.digital_read(50), PinLevel::Low);
        assert_eq!(board.analog_read(50), 0);
        assert_eq!(board.digital_pin_voltage(50), 0.0);
    }

    #[test]
    fn test_power_rail_voltages() {
        let board = Board::new();
        assert_eq!(board.power_rail_voltage(PowerRail::FiveVolts), 5.0);
        assert_eq!(board.power_rail_voltage(PowerRail::ThreeVolts3), 3.3);
        assert_eq!(board.power_rail_voltage(PowerRail::Ground), 0.0);
    }

    #[test]
    fn test_snapshot_covers_every_external_pin() {
        let mut board = Board::new();
        board.digital_write(13, PinLevel::High);
        let snapshot = board.voltage_snapshot();

        assert_eq!(snapshot.len(), DIGITAL_PIN_COUNT + ANALOG_PIN_COUNT + 5);
        assert_eq!(
            snapshot[&NodeKey::External(ExternalPin::Digital(13))],
            5.0
        );
        assert_eq!(
            snapshot[&NodeKey::External(ExternalPin::Power(PowerRail::FiveVolts))],
            5.0
        );
        assert_eq!(
            snapshot[&NodeKey::External(ExternalPin::Power(PowerRail::Ground))],
            0.0
        );
    }
}
