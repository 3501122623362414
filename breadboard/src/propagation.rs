/**
 * @file propagation.rs
 * @author Nguyen Le Duy
 * @date 20/05/2025
 * @brief Fixed-pass voltage relaxation over the circuit graph
 */
use crate::circuit::Circuit;
use crate::common::NodeKey;
use crate::component::ComponentKind;
use std::collections::BTreeMap;

/// Number of relaxation passes per cycle. The engine trades correctness on
/// deep series chains for a deterministic, bounded cost per tick; circuits
/// needing more hops than this to settle stay stale. Do not iterate to a
/// fixpoint instead — observable outputs depend on the bound.
pub const PASSES: usize = 5;

/// Run one full propagation cycle: rebuild the voltage map from the external
/// pin snapshot, relax for exactly [`PASSES`] passes, then settle every
/// component's state once more with the final pin voltages.
///
/// Never fails, whatever the circuit looks like; malformed or floating
/// topology just yields zeros.
pub fn propagate(circuit: &mut Circuit, external: &BTreeMap<NodeKey, f32>) {
    let incomplete = circuit.incomplete_wire_count();
    if incomplete > 0 {
        log::debug!("{incomplete} incomplete wire(s) take no part in propagation");
    }

    circuit.clear_nodes();

    for pass in 0..PASSES {
        log::trace!("relaxation pass {}/{PASSES}", pass + 1);
        seed_external_voltages(circuit, external);
        refresh_wire_external_pins(circuit, external);
        refresh_component_pins(circuit);
        run_resistors(circuit);
        propagate_wires_to_protoboard(circuit);
    }

    for component in circuit.components_mut() {
        component.compute_state();
    }
}

/// Pass step 1: every external pin voltage is written onto its equivalence
/// class. The snapshot map is ordered, so overwrites between classes that a
/// miswired circuit merged are deterministic.
fn seed_external_voltages(circuit: &mut Circuit, external: &BTreeMap<NodeKey, f32>) {
    for (&key, &voltage) in external {
        circuit.set_voltage_at(key, voltage);
    }
}

/// Pass step 2: complete wires ending on an external pin mirror that pin's
/// voltage onto the matching wire pin.
fn refresh_wire_external_pins(circuit: &mut Circuit, external: &BTreeMap<NodeKey, f32>) {
    for (index, start, end) in circuit.complete_wires() {
        for (pin_index, key) in [(0, start), (1, end)] {
            if key.is_external() {
                let voltage = external.get(&key).copied().unwrap_or(0.0);
                circuit.components_mut()[index].pins_mut()[pin_index].voltage = voltage;
            }
        }
    }
}

/// Pass step 3: components other than resistors and wires pull their pin
/// voltages from the graph.
fn refresh_component_pins(circuit: &mut Circuit) {
    for index in 0..circuit.components().len() {
        let component = &circuit.components()[index];
        if matches!(
            component.kind(),
            ComponentKind::Resistor | ComponentKind::Wire
        ) {
            continue;
        }

        let voltages: Vec<Option<f32>> = component
            .pins()
            .iter()
            .map(|pin| {
                pin.position
                    .map(|pos| circuit.voltage_at(NodeKey::Proto(pos)))
            })
            .collect();

        let pins = circuit.components_mut()[index].pins_mut();
        for (pin, voltage) in pins.iter_mut().zip(voltages) {
            if let Some(voltage) = voltage {
                pin.voltage = voltage;
            }
        }
    }
}

/// Pass step 4: resistors refresh from the graph, recompute, and write any
/// pin voltage they changed back onto the graph — this is how a resistor's
/// propagated voltage reaches components downstream of it on later passes.
fn run_resistors(circuit: &mut Circuit) {
    for index in 0..circuit.components().len() {
        if circuit.components()[index].kind() != ComponentKind::Resistor {
            continue;
        }

        let keys: Vec<Option<NodeKey>> = circuit.components()[index]
            .pins()
            .iter()
            .map(|pin| pin.position.map(NodeKey::Proto))
            .collect();

        let before: Vec<f32> = keys
            .iter()
            .map(|key| key.map_or(0.0, |key| circuit.voltage_at(key)))
            .collect();

        {
            let pins = circuit.components_mut()[index].pins_mut();
            for (pin, &voltage) in pins.iter_mut().zip(&before) {
                pin.voltage = voltage;
            }
        }

        circuit.components_mut()[index].compute_state();

        let after: Vec<f32> = circuit.components()[index]
            .pins()
            .iter()
            .map(|pin| pin.voltage)
            .collect();

        for ((key, before), after) in keys.iter().zip(&before).zip(&after) {
            if after != before {
                if let Some(key) = key {
                    log::debug!("resistor drove {key} to {after:.2}V");
                    circuit.set_voltage_at(*key, *after);
                }
            }
        }
    }
}

/// Pass step 5: wires push voltage onto their protoboard side. Protoboard
/// pins of each wire are refreshed from the graph first, then an energized
/// external side drives the protoboard end, and proto-proto wires drive from
/// whichever side is energized.
fn propagate_wires_to_protoboard(circuit: &mut Circuit) {
    for (index, start, end) in circuit.complete_wires() {
        for (pin_index, key) in [(0, start), (1, end)] {
            if let Some(pos) = key.grid_pos() {
                let voltage = circuit.voltage_at(NodeKey::Proto(pos));
                circuit.components_mut()[index].pins_mut()[pin_index].voltage = voltage;
            }
        }

        let pins = circuit.components()[index].pins();
        let (start_voltage, end_voltage) = (pins[0].voltage, pins[1].voltage);

        match (start.is_external(), end.is_external()) {
            (true, false) => {
                if start_voltage != 0.0 {
                    log::debug!("wire drove {end} to {start_voltage:.2}V");
                    circuit.set_voltage_at(end, start_voltage);
                }
            }
            (false, true) => {
                if end_voltage != 0.0 {
                    log::debug!("wire drove {start} to {end_voltage:.2}V");
                    circuit.set_voltage_at(start, end_voltage);
                }
            }
            (false, false) => {
                if start_voltage != 0.0 {
                    circuit.set_voltage_at(end, start_voltage);
                }
                if end_voltage != 0.0 {
                    circuit.set_voltage_at(start, end_voltage);
                }
            }
            // A wire between two external pins has no protoboard side.
            (true, true) => {}
        }
    }
}
