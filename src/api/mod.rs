pub mod building_dto;
pub mod scenario_dto;
pub mod simulation_dto;
