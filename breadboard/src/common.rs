//! Common types and constants used in the library.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Voltage of a digital pin driven HIGH.
pub const LOGIC_HIGH_VOLTS: f32 = 5.0;
/// Largest raw reading of an analog pin.
pub const ANALOG_MAX: u16 = 1023;
/// Largest PWM duty value accepted by `analog_write`.
pub const PWM_MAX: u8 = 255;

/// A hole on the protoboard grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GridPos {
    pub row: u8,
    pub col: u8,
}

impl GridPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// Named power pins of the external board and their nominal voltages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PowerRail {
    FiveVolts,
    ThreeVolts3,
    Ground,
    Vin,
    Reset,
}

impl PowerRail {
    pub const ALL: [PowerRail; 5] = [
        PowerRail::FiveVolts,
        PowerRail::ThreeVolts3,
        PowerRail::Ground,
        PowerRail::Vin,
        PowerRail::Reset,
    ];

    pub const fn nominal_voltage(&self) -> f32 {
        match self {
            PowerRail::FiveVolts => 5.0,
            PowerRail::ThreeVolts3 => 3.3,
            PowerRail::Ground | PowerRail::Vin | PowerRail::Reset => 0.0,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PowerRail::FiveVolts => "5V",
            PowerRail::ThreeVolts3 => "3.3V",
            PowerRail::Ground => "GND",
            PowerRail::Vin => "VIN",
            PowerRail::Reset => "RESET",
        }
    }
}

/// One pin of the external microcontroller-style board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ExternalPin {
    Digital(u8),
    Analog(u8),
    Power(PowerRail),
}

impl fmt::Display for ExternalPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalPin::Digital(index) => write!(f, "D{index}"),
            ExternalPin::Analog(index) => write!(f, "A{index}"),
            ExternalPin::Power(rail) => write!(f, "PWR_{}", rail.label()),
        }
    }
}

/// Canonical identifier of a voltage equivalence class: either a protoboard
/// hole or an external board pin.
///
/// The `Display` form matches the node ids the diagnostics console prints
/// (`proto_0_5`, `arduino_D_13`, `arduino_PWR_GND`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum NodeKey {
    Proto(GridPos),
    External(ExternalPin),
}

impl NodeKey {
    pub const fn proto(row: u8, col: u8) -> Self {
        NodeKey::Proto(GridPos::new(row, col))
    }

    pub const fn grid_pos(&self) -> Option<GridPos> {
        match self {
            NodeKey::Proto(pos) => Some(*pos),
            NodeKey::External(_) => None,
        }
    }

    pub const fn is_external(&self) -> bool {
        matches!(self, NodeKey::External(_))
    }
}

impl From<GridPos> for NodeKey {
    fn from(pos: GridPos) -> Self {
        NodeKey::Proto(pos)
    }
}

impl From<ExternalPin> for NodeKey {
    fn from(pin: ExternalPin) -> Self {
        NodeKey::External(pin)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Proto(pos) => write!(f, "proto_{}_{}", pos.row, pos.col),
            NodeKey::External(ExternalPin::Digital(index)) => write!(f, "arduino_D_{index}"),
            NodeKey::External(ExternalPin::Analog(index)) => write!(f, "arduino_A_{index}"),
            NodeKey::External(ExternalPin::Power(rail)) => {
                write!(f, "arduino_PWR_{}", rail.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key_display() {
        assert_eq!(NodeKey::proto(0, 5).to_string(), "proto_0_5");
        assert_eq!(
            NodeKey::External(ExternalPin::Digital(13)).to_string(),
            "arduino_D_13"
        );
        assert_eq!(
            NodeKey::External(ExternalPin::Power(PowerRail::Ground)).to_string(),
            "arduino_PWR_GND"
        );
    }

    #[test]
    fn test_node_key_ordering_is_total() {
        // Seeding iterates keys in order; digital pins sort before analog,
        // analog before power.
        let digital = NodeKey::External(ExternalPin::Digital(13));
        let analog = NodeKey::External(ExternalPin::Analog(0));
        let power = NodeKey::External(ExternalPin::Power(PowerRail::FiveVolts));
        assert!(digital < analog);
        assert!(analog < power);
    }
}
