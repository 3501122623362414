/**
 * @file component/led.rs
 * @author Nguyen Le Duy
 * @date 14/05/2025
 * @brief LED electrical model
 */
use super::{new_component_id, Pin};
use crate::common::GridPos;
use api_types::LedColor;

/// Cathode voltages below this count as "connected to ground".
const GROUND_THRESHOLD_VOLTS: f32 = 0.5;
/// Series resistance assumed when deriving the on-current.
const SERIES_RESISTANCE_OHMS: f32 = 220.0;
/// Hard cap on the LED current, 20 mA.
const MAX_CURRENT_AMPS: f32 = 0.02;

/// Minimum anode-cathode difference for the diode to conduct at all.
pub fn threshold_voltage(color: LedColor) -> f32 {
    match color {
        LedColor::Red => 1.8,
        LedColor::Green | LedColor::Blue => 2.5,
        LedColor::Yellow => 2.0,
    }
}

/// Nominal forward voltage once conducting.
pub fn forward_voltage(color: LedColor) -> f32 {
    match color {
        LedColor::Red => 2.0,
        LedColor::Green | LedColor::Blue => 3.0,
        LedColor::Yellow => 2.2,
    }
}

/// A two-pin LED. Pin 0 is the anode at the base position, pin 1 the cathode
/// one column to the right.
#[derive(Debug, Clone)]
pub struct Led {
    pub id: String,
    pub position: GridPos,
    pub color: LedColor,
    pub is_on: bool,
    pub pins: [Pin; 2],
}

impl Led {
    pub fn new(color: LedColor, position: GridPos) -> Self {
        let id = new_component_id();
        let anode = Pin::new(format!("{id}-anode"), Some(position), Some("A+"));
        let cathode = Pin::new(
            format!("{id}-cathode"),
            Some(GridPos::new(position.row, position.col + 1)),
            Some("K-"),
        );

        Self {
            id,
            position,
            color,
            is_on: false,
            pins: [anode, cathode],
        }
    }

    pub fn anode(&self) -> &Pin {
        &self.pins[0]
    }

    pub fn cathode(&self) -> &Pin {
        &self.pins[1]
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn color(&self) -> LedColor {
        self.color
    }

    /// Settle the on/off state from the current pin voltages.
    ///
    /// The LED only lights when the whole circuit closes: the cathode must
    /// sit near ground, the diode must be forward-biased, and both the drop
    /// and the absolute anode voltage must clear the color threshold. The
    /// voltage fields of the pins are never modified, only the currents.
    pub fn compute_state(&mut self) {
        let anode_voltage = self.pins[0].voltage;
        let cathode_voltage = self.pins[1].voltage;
        let drop = anode_voltage - cathode_voltage;
        let threshold = threshold_voltage(self.color);

        let cathode_grounded = cathode_voltage < GROUND_THRESHOLD_VOLTS;
        if !cathode_grounded {
            log::debug!(
                "LED {}: cathode not grounded ({cathode_voltage:.2}V)",
                self.id
            );
            self.is_on = false;
            return;
        }

        if drop < 0.0 {
            log::debug!("LED {}: reverse polarity", self.id);
            self.is_on = false;
            return;
        }

        if drop < threshold {
            log::debug!(
                "LED {}: drop {drop:.2}V below threshold {threshold:.2}V",
                self.id
            );
            self.is_on = false;
            return;
        }

        if anode_voltage < threshold {
            log::debug!(
                "LED {}: anode {anode_voltage:.2}V below threshold {threshold:.2}V",
                self.id
            );
            self.is_on = false;
            return;
        }

        self.is_on = true;

        let current = ((drop - forward_voltage(self.color)) / SERIES_RESISTANCE_OHMS)
            .min(MAX_CURRENT_AMPS);
        self.pins[0].current = current;
        self.pins[1].current = current;

        log::debug!("LED {}: on, {:.2}mA", self.id, current * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn led_with(anode: f32, cathode: f32, color: LedColor) -> Led {
        let mut led = Led::new(color, GridPos::new(0, 0));
        led.pins[0].voltage = anode;
        led.pins[1].voltage = cathode;
        led.compute_state();
        led
    }

    #[test]
    fn test_off_when_cathode_not_grounded() {
        let led = led_with(5.0, 5.0, LedColor::Red);
        assert!(!led.is_on());
    }

    #[test]
    fn test_on_with_grounded_cathode_and_full_drive() {
        let led = led_with(5.0, 0.0, LedColor::Red);
        assert!(led.is_on());
        assert!(led.anode().current <= MAX_CURRENT_AMPS);
        assert!(led.anode().current > 0.0);
        assert_eq!(led.anode().current, led.cathode().current);
    }

    #[test]
    fn test_off_below_threshold() {
        // drop = 1.0V < 1.8V red threshold
        let led = led_with(1.0, 0.0, LedColor::Red);
        assert!(!led.is_on());
    }

    #[test]
    fn test_off_with_no_voltage() {
        let led = led_with(0.0, 0.0, LedColor::Red);
        assert!(!led.is_on());
    }

    #[test]
    fn test_off_on_reverse_polarity() {
        let led = led_with(-2.0, 0.4, LedColor::Red);
        assert!(!led.is_on());
    }

    #[test]
    fn test_green_needs_higher_drive_than_red() {
        assert!(led_with(2.0, 0.0, LedColor::Red).is_on());
        assert!(!led_with(2.0, 0.0, LedColor::Green).is_on());
        assert!(led_with(2.6, 0.0, LedColor::Green).is_on());
    }

    #[test]
    fn test_current_is_capped() {
        let led = led_with(50.0, 0.0, LedColor::Red);
        assert!(led.is_on());
        assert_eq!(led.anode().current, MAX_CURRENT_AMPS);
    }

    #[test]
    fn test_color_constants() {
        assert_eq!(threshold_voltage(LedColor::Red), 1.8);
        assert_eq!(forward_voltage(LedColor::Red), 2.0);
        assert_eq!(threshold_voltage(LedColor::Blue), 2.5);
        assert_eq!(forward_voltage(LedColor::Blue), 3.0);
        assert_eq!(threshold_voltage(LedColor::Yellow), 2.0);
        assert_eq!(forward_voltage(LedColor::Yellow), 2.2);
    }
}
