//! breadboard
//! Author: Nguyen Le Duy
//! Date: 12/05/2025
//! Description: This module defines the data structures and enums used for
//! interacting between a host UI and the breadboard simulation core.

use serde::{Deserialize, Serialize};

/// Available LED colors. The electrical constants associated with each color
/// (threshold and forward voltage) live in the simulation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Mode of a digital board pin, named after the wire format the original
/// board API uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinMode {
    #[default]
    #[serde(rename = "INPUT")]
    Input,
    #[serde(rename = "OUTPUT")]
    Output,
    #[serde(rename = "INPUT_PULLUP")]
    InputPullup,
}

/// Logic level of a digital board pin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinLevel {
    #[serde(rename = "HIGH")]
    High,
    #[default]
    #[serde(rename = "LOW")]
    Low,
}

impl PinLevel {
    pub fn is_high(&self) -> bool {
        matches!(self, PinLevel::High)
    }
}

/// Payload the placement layer attaches to a component-creation request.
/// Every field is optional; the core falls back to a red LED, a 1 kΩ
/// resistor and a red wire when a field is missing.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Display name of the toolbox entry, carried through for diagnostics.
    pub name: String,
    /// LED color, when the template describes an LED.
    pub color: Option<LedColor>,
    /// Resistance in ohms, when the template describes a resistor.
    pub resistance: Option<f32>,
    /// Hex color of the wire sleeve, when the template describes a wire.
    pub wire_color: Option<String>,
}
