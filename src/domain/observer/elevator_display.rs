use colored::{ColoredString, Colorize};

use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::Floor;
use crate::domain::observer::elevator_observer::ElevatorObserver;

/// Prints every elevator event to stdout, one line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct ElevatorDisplay;

impl ElevatorDisplay {
    pub fn new() -> Self {
        ElevatorDisplay
    }

    pub fn state_line(elevator: &ElevatorStatus, state: ElevatorState) -> String {
        format!("Elevator {} state changed to {} (direction {})", elevator.id, paint(state), elevator.direction)
    }

    pub fn floor_line(elevator: &ElevatorStatus, floor: Floor) -> String {
        format!("Elevator {} moved to floor {}", elevator.id, floor.to_string().bold())
    }
}

fn paint(state: ElevatorState) -> ColoredString {
    let label = state.to_string();
    match state {
        ElevatorState::Idle => label.green(),
        ElevatorState::Moving => label.cyan(),
        ElevatorState::Stopped => label.yellow(),
        ElevatorState::Maintenance => label.red(),
    }
}

impl ElevatorObserver for ElevatorDisplay {
    fn on_elevator_state_change(&self, elevator: &ElevatorStatus, state: ElevatorState) {
        println!("{}", Self::state_line(elevator, state));
    }

    fn on_elevator_floor_change(&self, elevator: &ElevatorStatus, floor: Floor) {
        println!("{}", Self::floor_line(elevator, floor));
    }
}
