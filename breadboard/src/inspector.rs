use crate::component::ComponentKind;
use api_types::LedColor;
use std::rc::Rc;

/// Events a diagnostics host can observe while the simulation runs.
#[derive(Debug, Clone)]
pub enum InspectionEvent {
    ComponentAdded {
        id: String,
        kind: ComponentKind,
    },
    ComponentRemoved {
        id: String,
    },
    /// A propagation cycle is about to run.
    PropagationStarted {
        components: usize,
        wires: usize,
    },
    LedSwitched {
        id: String,
        color: LedColor,
        on: bool,
    },
    Tick,
}

pub trait Inspector {
    fn handle_event(&self, event: InspectionEvent);
}

#[derive(Clone)]
pub struct InspectorRef {
    inspector: Rc<dyn Inspector>,
}

impl Default for InspectorRef {
    fn default() -> Self {
        Self {
            inspector: Rc::new(DummyInspector),
        }
    }
}

impl InspectorRef {
    pub fn set_inspector(&mut self, inspector: Rc<dyn Inspector>) {
        self.inspector = inspector;
    }

    pub fn raise(&self, event: InspectionEvent) {
        self.inspector.handle_event(event);
    }
}

/// Default sink: forwards everything to the log.
pub struct DummyInspector;

impl Inspector for DummyInspector {
    fn handle_event(&self, event: InspectionEvent) {
        match event {
            InspectionEvent::ComponentAdded { id, kind } => {
                log::info!("Component added: {kind} {id}");
            }

            InspectionEvent::ComponentRemoved { id } => {
                log::info!("Component removed: {id}");
            }

            InspectionEvent::PropagationStarted { components, wires } => {
                log::info!("Propagating: {components} components, {wires} wires");
            }

            InspectionEvent::LedSwitched { id, color, on } => {
                let state = if on { "on" } else { "off" };
                log::info!("LED {id} ({color:?}) switched {state}");
            }

            InspectionEvent::Tick => {
                log::debug!("Tick");
            }
        }
    }
}
