/**
 * @file lib.rs
 * @author Nguyen Le Duy
 * @date 12/05/2025
 * @brief Breadboard workspace simulator library
 */
pub mod board;
pub mod circuit;
pub mod common;
pub mod component;
pub mod error;
pub mod factory;
pub mod inspector;
pub mod propagation;
pub mod protoboard;
pub mod simulator;

pub use board::Board;
pub use circuit::Circuit;
pub use common::{ExternalPin, GridPos, NodeKey, PowerRail};
pub use component::{Component, ComponentKind};
pub use error::Error;
pub use inspector::{InspectionEvent, Inspector, InspectorRef};
pub use protoboard::Protoboard;
pub use simulator::Simulator;

pub type Result<T> = core::result::Result<T, Error>;
