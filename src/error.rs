use thiserror::Error;

use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::floor::{Floor, FloorRange};
use crate::domain::utils::id::ElevatorId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse building configuration JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error(transparent)]
    ConversionError(#[from] ConversionError),

    #[error("Invalid floor range: lowest floor {lowest} is above highest floor {highest}")]
    InvalidFloorRange { lowest: Floor, highest: Floor },

    #[error("Floor {floor} is outside of the building's floor range {floors}")]
    FloorOutOfRange { floor: Floor, floors: FloorRange },

    #[error("An elevator fleet needs at least one elevator")]
    EmptyFleet,

    #[error("Elevator id {0} is used more than once")]
    DuplicateElevatorId(ElevatorId),

    #[error("Elevator {0} does not exist")]
    UnknownElevator(ElevatorId),

    #[error("Elevator {elevator_id} cannot change from {from} to {to}")]
    IllegalTransition { elevator_id: ElevatorId, from: ElevatorState, to: ElevatorState },

    #[error("Elevator {0} is in maintenance")]
    ElevatorInMaintenance(ElevatorId),

    #[error("Movement of elevator {elevator_id} was interrupted at floor {floor}")]
    MovementInterrupted { elevator_id: ElevatorId, floor: Floor },

    #[error("Worker of elevator {0} stopped")]
    WorkerStopped(ElevatorId),

    #[error("The elevator controller must be created inside a Tokio runtime")]
    NoRuntime,
}

/// Failures while turning configuration strings into domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown scheduling strategy: {0}")]
    UnknownSchedulingStrategy(String),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("Hall calls need a travel direction, got: {0}")]
    MissingHallDirection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
