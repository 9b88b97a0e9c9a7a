use serde::Serialize;

use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::floor::Floor;
use crate::domain::utils::id::ElevatorId;

/// Point-in-time copy of an elevator, handed to observers and to the selection algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub current_floor: Floor,
    pub direction: Direction,
    pub state: ElevatorState,
    pub pending_floors: Vec<Floor>,
}

impl ElevatorStatus {
    pub fn has_pending_stops(&self) -> bool {
        !self.pending_floors.is_empty()
    }

    /// Nothing left to do: either the queue is drained or the elevator is out of service.
    pub fn is_settled(&self) -> bool {
        self.pending_floors.is_empty() || self.state == ElevatorState::Maintenance
    }

    pub fn distance_to(&self, floor: Floor) -> u32 {
        self.current_floor.abs_diff(floor)
    }
}
