use std::sync::Arc;
use std::time::Duration;

use crate::domain::elevator::floor::{Floor, FloorRange};
use crate::domain::utils::id::ElevatorId;
use crate::domain::utils::statistics::StatsCollector;

/// Travel time per floor when nothing else is configured.
pub const DEFAULT_FLOOR_TRAVEL_TIME: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorConfig {
    pub id: ElevatorId,
    pub start_floor: Floor,
}

impl ElevatorConfig {
    pub fn new(id: ElevatorId, start_floor: Floor) -> Self {
        ElevatorConfig { id, start_floor }
    }
}

/// Everything an `ElevatorController` is built from. Validated when the controller is created.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub floors: FloorRange,
    pub elevators: Vec<ElevatorConfig>,
    pub floor_travel_time: Duration,
    pub stats: Option<Arc<StatsCollector>>,
}

impl ControllerConfig {
    pub fn new(floors: FloorRange, elevators: Vec<ElevatorConfig>, floor_travel_time: Duration) -> Self {
        ControllerConfig { floors, elevators, floor_travel_time, stats: None }
    }

    /// `elevator_count` elevators with ids `1..=elevator_count`, all waiting at the lowest floor.
    pub fn uniform(elevator_count: u32, floors: FloorRange, floor_travel_time: Duration) -> Self {
        let elevators = (1..=elevator_count).map(|id| ElevatorConfig::new(ElevatorId::new(id), floors.lowest())).collect();
        Self::new(floors, elevators, floor_travel_time)
    }

    pub fn with_stats(mut self, stats: Arc<StatsCollector>) -> Self {
        self.stats = Some(stats);
        self
    }
}
