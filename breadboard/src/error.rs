use crate::common::ExternalPin;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("External pin {0} is already occupied")]
    PinOccupied(ExternalPin),

    #[error("No component with id {0}")]
    NoSuchComponent(String),

    #[error("Component {0} is not a wire")]
    NotAWire(String),
}
