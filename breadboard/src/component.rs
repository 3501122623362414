/**
 * @file component.rs
 * @author Nguyen Le Duy
 * @date 14/05/2025
 * @brief Discrete components and their pins
 */
use crate::common::GridPos;
use std::fmt;

pub mod led;
pub mod resistor;
pub mod wire;

pub use led::Led;
pub use resistor::Resistor;
pub use wire::Wire;

/// One electrical terminal of a component. Pins are owned exclusively by
/// their component; the circuit graph only ever stores voltages keyed by
/// node, never the pins themselves.
#[derive(Debug, Clone)]
pub struct Pin {
    pub id: String,
    pub voltage: f32,
    pub current: f32,
    /// Protoboard hole this pin sits in, or `None` when the pin rides an
    /// external board pin.
    pub position: Option<GridPos>,
    pub label: Option<&'static str>,
}

impl Pin {
    pub fn new(id: String, position: Option<GridPos>, label: Option<&'static str>) -> Self {
        Self {
            id,
            voltage: 0.0,
            current: 0.0,
            position,
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Led,
    Resistor,
    Wire,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ComponentKind::Led => "LED",
            ComponentKind::Resistor => "RESISTOR",
            ComponentKind::Wire => "WIRE",
        };
        write!(f, "{tag}")
    }
}

/// Generate a fresh component identity. Uniqueness is the only property
/// callers may rely on.
pub(crate) fn new_component_id() -> String {
    nanoid::nanoid!(9)
}

/// A component placed on the workspace. Closed set: every dispatch is an
/// exhaustive match, so adding a variant is a compile-time event.
#[derive(Debug, Clone)]
pub enum Component {
    Led(Led),
    Resistor(Resistor),
    Wire(Wire),
}

impl Component {
    pub fn id(&self) -> &str {
        match self {
            Component::Led(led) => &led.id,
            Component::Resistor(resistor) => &resistor.id,
            Component::Wire(wire) => &wire.id,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Led(_) => ComponentKind::Led,
            Component::Resistor(_) => ComponentKind::Resistor,
            Component::Wire(_) => ComponentKind::Wire,
        }
    }

    /// Base grid position the component was placed at.
    pub fn position(&self) -> GridPos {
        match self {
            Component::Led(led) => led.position,
            Component::Resistor(resistor) => resistor.position,
            Component::Wire(wire) => wire.position,
        }
    }

    pub fn pins(&self) -> &[Pin] {
        match self {
            Component::Led(led) => &led.pins,
            Component::Resistor(resistor) => &resistor.pins,
            Component::Wire(wire) => &wire.pins,
        }
    }

    pub fn pins_mut(&mut self) -> &mut [Pin] {
        match self {
            Component::Led(led) => &mut led.pins,
            Component::Resistor(resistor) => &mut resistor.pins,
            Component::Wire(wire) => &mut wire.pins,
        }
    }

    /// Whether any of the component's pins sits in the given hole.
    pub fn occupies(&self, pos: GridPos) -> bool {
        self.pins().iter().any(|pin| pin.position == Some(pos))
    }

    /// Recompute the component's electrical state from its pin voltages.
    /// A component only ever mutates its own pins.
    pub fn compute_state(&mut self) {
        match self {
            Component::Led(led) => led.compute_state(),
            Component::Resistor(resistor) => resistor.compute_state(),
            // A wire has no law of its own; its effect is purely topological.
            Component::Wire(_) => {}
        }
    }

    pub fn as_wire(&self) -> Option<&Wire> {
        match self {
            Component::Wire(wire) => Some(wire),
            _ => None,
        }
    }

    pub fn as_wire_mut(&mut self) -> Option<&mut Wire> {
        match self {
            Component::Wire(wire) => Some(wire),
            _ => None,
        }
    }

    pub fn as_led(&self) -> Option<&Led> {
        match self {
            Component::Led(led) => Some(led),
            _ => None,
        }
    }

    pub fn as_resistor(&self) -> Option<&Resistor> {
        match self {
            Component::Resistor(resistor) => Some(resistor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::LedColor;

    #[test]
    fn test_component_ids_are_unique() {
        let a = Component::Led(Led::new(LedColor::Red, GridPos::new(0, 0)));
        let b = Component::Led(Led::new(LedColor::Red, GridPos::new(0, 0)));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_occupies_reports_pin_holes() {
        let led = Component::Led(Led::new(LedColor::Red, GridPos::new(2, 7)));
        assert!(led.occupies(GridPos::new(2, 7)));
        assert!(led.occupies(GridPos::new(2, 8)));
        assert!(!led.occupies(GridPos::new(2, 9)));
    }
}
