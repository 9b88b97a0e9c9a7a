use serde::{Deserialize, Serialize};

use crate::api::building_dto::BuildingDto;
use crate::api::scenario_dto::ScenarioStepDto;

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDto {
    pub building: BuildingDto,
    #[serde(default)]
    pub scenario: Vec<ScenarioStepDto>,
}
