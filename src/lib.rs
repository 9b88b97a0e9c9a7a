use std::path::Path;
use std::sync::Arc;

use crate::api::simulation_dto::SimulationDto;
use crate::domain::building::Building;
use crate::domain::simulator::scenario::Scenario;
use crate::domain::utils::statistics::StatsCollector;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Reads a simulation file and builds the building together with its scripted scenario.
///
/// Must be called inside a Tokio runtime, the elevator workers are spawned right away.
pub fn load_simulation(file_path: impl AsRef<Path>, stats: Option<Arc<StatsCollector>>) -> Result<(Building, Scenario)> {
    let file_path = file_path.as_ref();
    log::info!("Loading simulation from '{}'", file_path.display());

    let root_dto: SimulationDto = parse_json_file::<SimulationDto>(file_path)?;
    log::info!("JSON file parsed successfully.");

    build_simulation(root_dto, stats)
}

/// Same as [`load_simulation`] for an already parsed (and possibly adjusted) configuration.
pub fn build_simulation(root_dto: SimulationDto, stats: Option<Arc<StatsCollector>>) -> Result<(Building, Scenario)> {
    let scenario = Scenario::from_dtos(root_dto.scenario)?;
    let building = Building::from_dto(root_dto.building, stats)?;
    log::info!("Building '{}' constructed with a scenario of {} steps.", building.name, scenario.len());

    Ok((building, scenario))
}
