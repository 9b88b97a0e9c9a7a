use std::sync::Arc;
use std::time::Duration;

use crate::api::building_dto::BuildingDto;
use crate::domain::dispatch::controller_config::{ControllerConfig, ElevatorConfig};
use crate::domain::dispatch::elevator_controller::ElevatorController;
use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::floor::FloorRange;
use crate::domain::scheduling::scheduling_strategy::SchedulingStrategy;
use crate::domain::scheduling::scheduling_strategy_type::SchedulingStrategyType;
use crate::domain::utils::id::ElevatorId;
use crate::domain::utils::statistics::StatsCollector;
use crate::error::{Error, Result};

/// A building and the elevator fleet serving it.
#[derive(Debug)]
pub struct Building {
    pub name: String,
    pub floors: FloorRange,
    /// Break ties of an idle sweep towards this direction; applied to strategies built by name.
    pub idle_tie_break: Direction,
    pub controller: ElevatorController,
}

impl Building {
    /// `number_of_floors` floors starting at 0, `number_of_elevators` elevators waiting on the ground floor.
    pub fn new(name: impl Into<String>, number_of_floors: u32, number_of_elevators: u32, strategy: Arc<dyn SchedulingStrategy>, floor_travel_time: Duration) -> Result<Self> {
        let floors = FloorRange::with_floor_count(number_of_floors)?;
        let controller = ElevatorController::new(ControllerConfig::uniform(number_of_elevators, floors, floor_travel_time), strategy)?;

        Ok(Building { name: name.into(), floors, idle_tie_break: Direction::Up, controller })
    }

    pub fn from_dto(dto: BuildingDto, stats: Option<Arc<StatsCollector>>) -> Result<Self> {
        if dto.number_of_floors == 0 {
            return Err(Error::InvalidFloorRange { lowest: dto.lowest_floor, highest: dto.lowest_floor.saturating_sub(1) });
        }
        let highest = i64::from(dto.lowest_floor) + i64::from(dto.number_of_floors) - 1;
        let highest = i32::try_from(highest).map_err(|_| Error::InvalidFloorRange { lowest: dto.lowest_floor, highest: i32::MAX })?;
        let floors = FloorRange::new(dto.lowest_floor, highest)?;

        let idle_tie_break: Direction = dto.idle_tie_break.parse()?;
        let strategy_type: SchedulingStrategyType = dto.scheduling_strategy.parse()?;

        let elevators = dto
            .elevators
            .iter()
            .map(|elevator| ElevatorConfig::new(ElevatorId::new(elevator.id), elevator.start_floor.unwrap_or(floors.lowest())))
            .collect();

        let mut config = ControllerConfig::new(floors, elevators, Duration::from_millis(dto.floor_travel_ms));
        if let Some(stats) = stats {
            config = config.with_stats(stats);
        }

        let controller = ElevatorController::new(config, strategy_type.get_instance(idle_tie_break))?;
        log::info!("Building '{}' with floors {} constructed", dto.name, floors);

        Ok(Building { name: dto.name, floors, idle_tie_break, controller })
    }

    pub fn number_of_floors(&self) -> u32 {
        self.floors.floor_count()
    }

    /// Builds the named strategy with this building's tie-break and makes it the active one.
    pub fn switch_strategy(&self, strategy_type: SchedulingStrategyType) {
        self.controller.set_scheduling_strategy(strategy_type.get_instance(self.idle_tie_break));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::loader::parser::parse_json_str;

    fn dto(json: &str) -> BuildingDto {
        parse_json_str(json).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn defaults_fill_in_missing_fields() {
        let building = Building::from_dto(
            dto(r#"{ "name": "Annex", "numberOfFloors": 6, "elevators": [{ "id": 1 }, { "id": 2, "startFloor": 3 }], "schedulingStrategy": "look" }"#),
            None,
        )
        .unwrap();

        assert_eq!(building.floors, FloorRange::new(0, 5).unwrap());
        assert_eq!(building.idle_tie_break, Direction::Up);
        assert_eq!(building.controller.strategy_name(), "LOOK");
        assert_eq!(building.controller.floor_travel_time(), Duration::from_millis(500));
        let starts: Vec<i32> = building.controller.statuses().iter().map(|status| status.current_floor).collect();
        assert_eq!(starts, vec![0, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn basements_shift_the_floor_range() {
        let building = Building::from_dto(
            dto(r#"{ "name": "Deep", "numberOfFloors": 5, "lowestFloor": -2, "elevators": [{ "id": 7 }], "schedulingStrategy": "SCAN", "idleTieBreak": "down" }"#),
            None,
        )
        .unwrap();

        assert_eq!(building.floors, FloorRange::new(-2, 2).unwrap());
        assert_eq!(building.number_of_floors(), 5);
        assert_eq!(building.idle_tie_break, Direction::Down);
        assert_eq!(building.controller.status(ElevatorId::new(7)).unwrap().current_floor, -2);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_strategy_is_a_configuration_error() {
        let result = Building::from_dto(dto(r#"{ "name": "X", "numberOfFloors": 5, "elevators": [{ "id": 1 }], "schedulingStrategy": "SSTF" }"#), None);
        assert!(matches!(result, Err(Error::ConversionError(ConversionError::UnknownSchedulingStrategy(name))) if name == "SSTF"));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_floors_are_rejected() {
        let result = Building::from_dto(dto(r#"{ "name": "X", "numberOfFloors": 0, "elevators": [{ "id": 1 }], "schedulingStrategy": "FCFS" }"#), None);
        assert!(matches!(result, Err(Error::InvalidFloorRange { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn reference_constructor_builds_a_ground_floor_fleet() {
        let building = Building::new("Tech Tower", 10, 2, SchedulingStrategyType::Fcfs.get_instance(Direction::Up), Duration::from_millis(10)).unwrap();

        assert_eq!(building.name, "Tech Tower");
        assert_eq!(building.number_of_floors(), 10);
        assert_eq!(building.controller.elevator_ids().len(), 2);

        building.switch_strategy(SchedulingStrategyType::Scan);
        assert_eq!(building.controller.strategy_name(), "SCAN");
    }
}
