use std::fmt::{self, Display};

use crate::domain::dispatch::elevator_controller::ElevatorController;
use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::floor::Floor;
use crate::domain::utils::id::ElevatorId;

/// What happened to a command once the controller handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A hall call was given to this elevator.
    Assigned(ElevatorId),
    /// A cabin call was queued.
    Accepted,
    Dropped,
}

impl Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Assigned(elevator_id) => write!(f, "assigned to elevator {}", elevator_id),
            CommandOutcome::Accepted => f.write_str("accepted"),
            CommandOutcome::Dropped => f.write_str("dropped"),
        }
    }
}

/// A request against the controller that can be executed and kept in a history.
pub trait ElevatorCommand: Display + Send + Sync {
    fn execute(&self, controller: &ElevatorController) -> CommandOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorRequestCommand {
    /// Button on a floor.
    Hall { floor: Floor, direction: Direction },
    /// Button inside a cabin.
    Cabin { elevator_id: ElevatorId, floor: Floor },
}

impl ElevatorCommand for ElevatorRequestCommand {
    fn execute(&self, controller: &ElevatorController) -> CommandOutcome {
        match *self {
            ElevatorRequestCommand::Hall { floor, direction } => match controller.request_elevator(floor, direction) {
                Some(elevator_id) => CommandOutcome::Assigned(elevator_id),
                None => CommandOutcome::Dropped,
            },
            ElevatorRequestCommand::Cabin { elevator_id, floor } => {
                if controller.request_floor(elevator_id, floor) {
                    CommandOutcome::Accepted
                } else {
                    CommandOutcome::Dropped
                }
            }
        }
    }
}

impl Display for ElevatorRequestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevatorRequestCommand::Hall { floor, direction } => write!(f, "External request to floor {} going {}", floor, direction),
            ElevatorRequestCommand::Cabin { elevator_id, floor } => write!(f, "Internal request to floor {} in elevator {}", floor, elevator_id),
        }
    }
}
