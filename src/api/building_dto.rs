use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingDto {
    pub name: String,
    pub number_of_floors: u32,
    #[serde(default)]
    pub lowest_floor: i32,
    pub elevators: Vec<ElevatorDto>,
    pub scheduling_strategy: String,
    #[serde(default = "default_floor_travel_ms")]
    pub floor_travel_ms: u64,
    #[serde(default = "default_idle_tie_break")]
    pub idle_tie_break: String,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorDto {
    pub id: u32,
    /// Defaults to the building's lowest floor.
    pub start_floor: Option<i32>,
}

fn default_floor_travel_ms() -> u64 {
    500
}

fn default_idle_tie_break() -> String {
    "up".to_string()
}
