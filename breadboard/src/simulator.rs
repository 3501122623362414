/**
 * @file simulator.rs
 * @author Nguyen Le Duy
 * @date 22/05/2025
 * @brief Workspace orchestrator: board, circuit, occupancy and the tick loop
 */
use crate::board::Board;
use crate::circuit::Circuit;
use crate::common::{ExternalPin, GridPos, NodeKey};
use crate::component::Component;
use crate::error::Error;
use crate::inspector::{InspectionEvent, Inspector, InspectorRef};
use crate::{factory, propagation, Result};
use api_types::{ComponentTemplate, PinLevel, PinMode};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Cadence a host should drive [`Simulator::tick`] at while running.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// The whole workspace. Single-threaded and cooperative: exactly one owner
/// mutates the circuit, every mutation is followed by one synchronous
/// propagation cycle, and the periodic tick re-propagates while running.
/// Stopping only halts the tick; the last computed state stays visible.
#[derive(Default)]
pub struct Simulator {
    board: Board,
    circuit: Circuit,
    /// External pins claimed by a component, by component id.
    occupancy: HashMap<ExternalPin, String>,
    running: bool,
    inspector: InspectorRef,
}

impl Simulator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_inspector(&mut self, inspector: Rc<dyn Inspector>) {
        self.inspector.set_inspector(inspector);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    // ------------------------------------------------------------------
    // Structural mutations
    // ------------------------------------------------------------------

    /// Create a component from a placement request and register it. Returns
    /// the new component's id.
    pub fn add_component(
        &mut self,
        type_name: &str,
        position: GridPos,
        template: &ComponentTemplate,
    ) -> Result<String> {
        let component = factory::create(type_name, position, template)?;
        let id = component.id().to_string();
        let kind = component.kind();

        self.circuit.add(component);
        self.inspector.raise(InspectionEvent::ComponentAdded {
            id: id.clone(),
            kind,
        });
        self.propagate_now();

        Ok(id)
    }

    /// Remove a component, releasing any external pins it occupied.
    pub fn remove_component(&mut self, id: &str) -> Result<()> {
        self.circuit
            .remove(id)
            .ok_or_else(|| Error::NoSuchComponent(id.to_string()))?;
        self.occupancy.retain(|_, owner| owner != id);

        self.inspector
            .raise(InspectionEvent::ComponentRemoved { id: id.to_string() });
        self.propagate_now();

        Ok(())
    }

    /// First of the two sequential wiring calls from the placement layer.
    pub fn set_wire_start(&mut self, id: &str, key: NodeKey) -> Result<()> {
        self.with_wire(id, |wire| wire.set_start(key))?;
        self.propagate_now();
        Ok(())
    }

    /// Second wiring call; the wire participates in connectivity once both
    /// ends are set.
    pub fn set_wire_end(&mut self, id: &str, key: NodeKey) -> Result<()> {
        self.with_wire(id, |wire| wire.set_end(key))?;
        self.propagate_now();
        Ok(())
    }

    fn with_wire(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut crate::component::Wire),
    ) -> Result<()> {
        let component = self
            .circuit
            .get_mut(id)
            .ok_or_else(|| Error::NoSuchComponent(id.to_string()))?;
        let wire = component
            .as_wire_mut()
            .ok_or_else(|| Error::NotAWire(id.to_string()))?;
        f(wire);
        Ok(())
    }

    // ------------------------------------------------------------------
    // External pin occupancy registry
    // ------------------------------------------------------------------

    /// Claim an external pin for a component. Fails without any state change
    /// when the pin is already claimed.
    pub fn connect_to_pin(&mut self, id: &str, pin: ExternalPin) -> Result<()> {
        if self.occupancy.contains_key(&pin) {
            log::warn!("External pin {pin} is already occupied");
            return Err(Error::PinOccupied(pin));
        }
        if self.circuit.get(id).is_none() {
            return Err(Error::NoSuchComponent(id.to_string()));
        }

        log::debug!("Component {id} connected to external pin {pin}");
        self.occupancy.insert(pin, id.to_string());
        self.propagate_now();

        Ok(())
    }

    pub fn is_pin_occupied(&self, pin: ExternalPin) -> bool {
        self.occupancy.contains_key(&pin)
    }

    pub fn component_on_pin(&self, pin: ExternalPin) -> Option<&Component> {
        let id = self.occupancy.get(&pin)?;
        self.circuit.get(id)
    }

    // ------------------------------------------------------------------
    // Board I/O
    // ------------------------------------------------------------------

    pub fn pin_mode(&mut self, index: u8, mode: PinMode) {
        self.board.pin_mode(index, mode);
        self.propagate_now();
    }

    pub fn digital_write(&mut self, index: u8, level: PinLevel) {
        self.board.digital_write(index, level);
        self.propagate_now();
    }

    pub fn digital_read(&self, index: u8) -> PinLevel {
        self.board.digital_read(index)
    }

    pub fn analog_write(&mut self, index: u8, duty: u8) {
        self.board.analog_write(index, duty);
        self.propagate_now();
    }

    pub fn analog_read(&self, index: u8) -> u16 {
        self.board.analog_read(index)
    }

    // ------------------------------------------------------------------
    // Simulation control
    // ------------------------------------------------------------------

    /// Begin running: one immediate propagation, then the host drives
    /// [`tick`](Self::tick) every [`TICK_INTERVAL`].
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        log::info!("Simulation started");
        self.propagate_now();
    }

    /// Halt the periodic tick. No rollback: the last computed voltages and
    /// component states stay until the next mutation or resume.
    pub fn stop(&mut self) {
        self.running = false;
        log::info!("Simulation stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One periodic simulation step; a no-op unless running.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.inspector.raise(InspectionEvent::Tick);
        self.propagate_now();
    }

    fn propagate_now(&mut self) {
        self.inspector.raise(InspectionEvent::PropagationStarted {
            components: self.circuit.components().len(),
            wires: self.circuit.complete_wires().len(),
        });

        let led_states: Vec<(String, bool)> = self.led_states();

        let snapshot = self.board.voltage_snapshot();
        propagation::propagate(&mut self.circuit, &snapshot);

        for (id, was_on) in led_states {
            let Some(led) = self.circuit.get(&id).and_then(Component::as_led) else {
                continue;
            };
            if led.is_on() != was_on {
                self.inspector.raise(InspectionEvent::LedSwitched {
                    id,
                    color: led.color(),
                    on: led.is_on(),
                });
            }
        }
    }

    fn led_states(&self) -> Vec<(String, bool)> {
        self.circuit
            .components()
            .iter()
            .filter_map(|component| {
                let led = component.as_led()?;
                Some((led.id.clone(), led.is_on()))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Read-only snapshot of the live components, in placement order.
    pub fn components(&self) -> &[Component] {
        self.circuit.components()
    }

    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.circuit.get(id)
    }

    pub fn get_component_at(&self, row: u8, col: u8) -> Option<&Component> {
        self.circuit.component_at(GridPos::new(row, col))
    }

    pub fn is_position_occupied(&self, row: u8, col: u8) -> bool {
        self.circuit.is_position_occupied(GridPos::new(row, col))
    }

    /// Voltage of the equivalence class of a protoboard hole.
    pub fn voltage_at(&self, row: u8, col: u8) -> f32 {
        self.circuit.voltage_at(NodeKey::proto(row, col))
    }

    /// Voltage of the equivalence class of an external board pin.
    pub fn external_pin_voltage(&self, pin: ExternalPin) -> f32 {
        self.circuit.voltage_at(NodeKey::External(pin))
    }

    pub fn find_connected_pins(&self, key: NodeKey) -> Vec<NodeKey> {
        self.circuit.find_connected(key)
    }
}
