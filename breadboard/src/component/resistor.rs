/**
 * @file component/resistor.rs
 * @author Nguyen Le Duy
 * @date 14/05/2025
 * @brief Resistor electrical model
 */
use super::{new_component_id, Pin};
use crate::common::GridPos;

/// Current assumed through a half-energized resistor, standing in for a
/// typical LED load in series, 15 mA.
const ESTIMATED_CURRENT_AMPS: f32 = 0.015;

/// A two-pin resistor. Pin 0 sits at the base position, pin 1 one column to
/// the right.
#[derive(Debug, Clone)]
pub struct Resistor {
    pub id: String,
    pub position: GridPos,
    /// Resistance in ohms, always positive.
    pub resistance: f32,
    pub voltage_drop: f32,
    pub current: f32,
    pub pins: [Pin; 2],
}

impl Resistor {
    pub fn new(resistance: f32, position: GridPos) -> Self {
        let id = new_component_id();
        let pin1 = Pin::new(format!("{id}-pin1"), Some(position), Some("P1"));
        let pin2 = Pin::new(
            format!("{id}-pin2"),
            Some(GridPos::new(position.row, position.col + 1)),
            Some("P2"),
        );

        Self {
            id,
            position,
            resistance,
            voltage_drop: 0.0,
            current: 0.0,
            pins: [pin1, pin2],
        }
    }

    /// Recompute drop and current, and propagate voltage across the body
    /// when only one side is energized.
    ///
    /// A resistor always conducts. It is the only component allowed to write
    /// a voltage onto one of its own pins: with a single energized side it
    /// assumes a fixed 15 mA load and drives the dead side with the source
    /// voltage minus the estimated drop. Propagation direction follows
    /// whichever pin is energized.
    pub fn compute_state(&mut self) {
        let pin1_voltage = self.pins[0].voltage;
        let pin2_voltage = self.pins[1].voltage;

        if pin1_voltage != 0.0 && pin2_voltage != 0.0 {
            self.voltage_drop = (pin1_voltage - pin2_voltage).abs();
            self.current = self.voltage_drop / self.resistance;
        } else if pin1_voltage != 0.0 {
            self.voltage_drop = ESTIMATED_CURRENT_AMPS * self.resistance;
            self.current = ESTIMATED_CURRENT_AMPS;
            self.pins[1].voltage = (pin1_voltage - self.voltage_drop).max(0.0);
            log::debug!(
                "Resistor {}: propagating P1 -> P2, {pin1_voltage:.2}V -> {:.2}V",
                self.id,
                self.pins[1].voltage
            );
        } else if pin2_voltage != 0.0 {
            self.voltage_drop = ESTIMATED_CURRENT_AMPS * self.resistance;
            self.current = ESTIMATED_CURRENT_AMPS;
            self.pins[0].voltage = (pin2_voltage - self.voltage_drop).max(0.0);
            log::debug!(
                "Resistor {}: propagating P2 -> P1, {pin2_voltage:.2}V -> {:.2}V",
                self.id,
                self.pins[0].voltage
            );
        } else {
            self.voltage_drop = 0.0;
            self.current = 0.0;
        }

        self.pins[0].current = self.current;
        self.pins[1].current = self.current;
    }

    /// Presentation form of the resistance, `220Ω` or `1.0kΩ`.
    pub fn resistance_label(&self) -> String {
        if self.resistance >= 1000.0 {
            format!("{:.1}kΩ", self.resistance / 1000.0)
        } else {
            format!("{}Ω", self.resistance)
        }
    }
}
