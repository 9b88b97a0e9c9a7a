use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator::Elevator;
use crate::domain::elevator::floor::Floor;
use crate::domain::scheduling::scheduling_strategy::SchedulingStrategy;

/// First come, first served: the oldest pending stop is always next, no matter how far away it is.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsSchedulingStrategy;

impl FcfsSchedulingStrategy {
    pub fn new() -> Self {
        FcfsSchedulingStrategy
    }
}

impl SchedulingStrategy for FcfsSchedulingStrategy {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn get_next_stop(&self, elevator: &mut Elevator) -> Floor {
        let current_floor = elevator.current_floor();
        let Some(target) = elevator.pending_stops().front().map(|request| request.floor()) else {
            return current_floor;
        };

        let wanted = Direction::towards(current_floor, target);
        if wanted != Direction::Idle {
            elevator.set_direction(wanted);
        }
        target
    }
}
