use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::Floor;

/// Passive sink for elevator notifications.
///
/// Callbacks run synchronously while the elevator is locked, so implementations must be quick
/// and must never call back into the controller.
pub trait ElevatorObserver: Send + Sync {
    /// Fired on every change of direction or operating state.
    fn on_elevator_state_change(&self, elevator: &ElevatorStatus, state: ElevatorState);

    /// Fired after every single-floor step.
    fn on_elevator_floor_change(&self, elevator: &ElevatorStatus, floor: Floor);
}
