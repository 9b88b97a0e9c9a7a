#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use elevator_dispatch::domain::dispatch::controller_config::{ControllerConfig, ElevatorConfig};
use elevator_dispatch::domain::dispatch::elevator_controller::ElevatorController;
use elevator_dispatch::domain::elevator::elevator_state::ElevatorState;
use elevator_dispatch::domain::elevator::elevator_status::ElevatorStatus;
use elevator_dispatch::domain::elevator::floor::{Floor, FloorRange};
use elevator_dispatch::domain::observer::elevator_observer::ElevatorObserver;
use elevator_dispatch::domain::scheduling::scheduling_strategy::SchedulingStrategy;
use elevator_dispatch::domain::utils::id::ElevatorId;

pub const TRAVEL: Duration = Duration::from_millis(100);

/// Everything the fleet reported, per elevator.
#[derive(Default)]
pub struct RecordingObserver {
    states: Mutex<HashMap<ElevatorId, Vec<ElevatorState>>>,
    floors: Mutex<HashMap<ElevatorId, Vec<Floor>>>,
    stops: Mutex<HashMap<ElevatorId, Vec<Floor>>>,
}

impl RecordingObserver {
    pub fn attach(controller: &ElevatorController) -> Arc<Self> {
        let observer = Arc::new(RecordingObserver::default());
        controller.add_observer(observer.clone());
        observer
    }

    /// State changes in order, consecutive repeats collapsed.
    pub fn states(&self, elevator_id: ElevatorId) -> Vec<ElevatorState> {
        let mut states = self.states.lock().unwrap().get(&elevator_id).cloned().unwrap_or_default();
        states.dedup();
        states
    }

    pub fn floors(&self, elevator_id: ElevatorId) -> Vec<Floor> {
        self.floors.lock().unwrap().get(&elevator_id).cloned().unwrap_or_default()
    }

    /// Floors at which the elevator came to a stop.
    pub fn stops(&self, elevator_id: ElevatorId) -> Vec<Floor> {
        self.stops.lock().unwrap().get(&elevator_id).cloned().unwrap_or_default()
    }
}

impl ElevatorObserver for RecordingObserver {
    fn on_elevator_state_change(&self, elevator: &ElevatorStatus, state: ElevatorState) {
        let mut states = self.states.lock().unwrap();
        let history = states.entry(elevator.id).or_default();
        // direction changes repeat the current state
        if state == ElevatorState::Stopped && history.last() != Some(&ElevatorState::Stopped) {
            self.stops.lock().unwrap().entry(elevator.id).or_default().push(elevator.current_floor);
        }
        history.push(state);
    }

    fn on_elevator_floor_change(&self, elevator: &ElevatorStatus, floor: Floor) {
        self.floors.lock().unwrap().entry(elevator.id).or_default().push(floor);
    }
}

pub fn ten_floors() -> FloorRange {
    FloorRange::with_floor_count(10).unwrap()
}

/// Controller for floors 0..=9 with one elevator per entry of `start_floors`, ids counting from 1.
pub fn controller_with(start_floors: &[Floor], strategy: Arc<dyn SchedulingStrategy>) -> ElevatorController {
    let elevators = start_floors.iter().zip(1..).map(|(floor, id)| ElevatorConfig::new(ElevatorId::new(id), *floor)).collect();
    ElevatorController::new(ControllerConfig::new(ten_floors(), elevators, TRAVEL), strategy).unwrap()
}
