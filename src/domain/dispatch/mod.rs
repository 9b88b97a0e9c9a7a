pub mod controller_config;
pub mod elevator_controller;
pub mod elevator_selection;
mod elevator_worker;
