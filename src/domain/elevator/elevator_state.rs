use serde::Serialize;
use std::fmt;

/// Operating state of a single elevator.
///
/// `Maintenance` is only entered and left through an administrative action; the normal
/// request flow can never move an elevator out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElevatorState {
    /// No pending work.
    Idle,
    /// Travelling towards a committed destination.
    Moving,
    /// Arrived at a destination, about to evaluate the next stop.
    Stopped,
    /// Excluded from dispatch.
    Maintenance,
}

impl ElevatorState {
    /// Transition table of the elevator state machine. Staying in the same state is always allowed.
    pub fn can_transition_to(self, next: ElevatorState) -> bool {
        use ElevatorState::*;

        match (self, next) {
            (from, to) if from == to => true,
            (Maintenance, Idle) => true,
            (Maintenance, _) => false,
            (Idle | Moving | Stopped, _) => true,
        }
    }

    pub fn is_dispatchable(self) -> bool {
        self != ElevatorState::Maintenance
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElevatorState::Idle => "IDLE",
            ElevatorState::Moving => "MOVING",
            ElevatorState::Stopped => "STOPPED",
            ElevatorState::Maintenance => "MAINTENANCE",
        };
        f.write_str(name)
    }
}
