use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use elevator_dispatch::domain::command::command_invoker::CommandInvoker;
use elevator_dispatch::domain::elevator::elevator_state::ElevatorState;
use elevator_dispatch::error::{ConversionError, Error};
use elevator_dispatch::load_simulation;

fn write_temp_json(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("elevator_dispatch_{}.json", Uuid::new_v4()));
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test(start_paused = true)]
async fn tech_tower_demo_runs_to_completion() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/tech_tower.json");
    let (building, scenario) = load_simulation(&path, None).unwrap();

    assert_eq!(building.name, "Tech Tower");
    assert_eq!(building.number_of_floors(), 10);
    assert_eq!(building.controller.strategy_name(), "FCFS");
    assert_eq!(scenario.len(), 14);

    let mut invoker = CommandInvoker::new();
    let report = scenario.run(&building, &mut invoker).await.unwrap();

    assert_eq!(report.history.len(), 6);
    assert_eq!(report.dropped, 0);
    assert_eq!(report.history[0], "Command 1: External request to floor 3 going UP -> assigned to elevator 1");
    assert!(report.final_statuses.iter().all(|status| status.state == ElevatorState::Idle));
    assert_eq!(building.controller.strategy_name(), "SCAN");
}

#[tokio::test(start_paused = true)]
async fn scenario_from_a_file_is_played_in_order() {
    let path = write_temp_json(
        r#"{
            "building": {
                "name": "Annex",
                "numberOfFloors": 8,
                "elevators": [{ "id": 1 }, { "id": 2, "startFloor": 7 }],
                "schedulingStrategy": "LOOK",
                "floorTravelMs": 50
            },
            "scenario": [
                { "type": "cabinCall", "elevatorId": 2, "floor": 0 },
                { "type": "maintenance", "elevatorId": 1, "enabled": true },
                { "type": "hallCall", "floor": 4, "direction": "down" },
                { "type": "cabinCall", "elevatorId": 1, "floor": 5 },
                { "type": "waitIdle" }
            ]
        }"#,
    );

    let (building, scenario) = load_simulation(&path, None).unwrap();
    let mut invoker = CommandInvoker::new();
    let report = scenario.run(&building, &mut invoker).await.unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(report.history.len(), 3);
    assert_eq!(report.dropped, 1);
    assert_eq!(invoker.len(), 3);

    let statuses = report.final_statuses;
    assert_eq!(statuses[0].state, ElevatorState::Maintenance);
    assert_eq!(statuses[0].current_floor, 0);
    assert_eq!(statuses[1].current_floor, 0);
    assert_eq!(statuses[1].state, ElevatorState::Idle);
}

#[tokio::test(start_paused = true)]
async fn building_without_scenario_loads() {
    let path = write_temp_json(r#"{ "building": { "name": "Shed", "numberOfFloors": 2, "elevators": [{ "id": 1 }], "schedulingStrategy": "fcfs" } }"#);

    let (building, scenario) = load_simulation(&path, None).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(scenario.is_empty());
    assert_eq!(building.controller.elevator_ids().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn broken_files_are_reported() {
    assert!(matches!(load_simulation("/definitely/not/here.json", None), Err(Error::IoError(_))));

    let path = write_temp_json(r#"{ "building": { "name": "X" "#);
    assert!(matches!(load_simulation(&path, None), Err(Error::DeserializationError(_))));
    fs::remove_file(&path).unwrap();

    let path = write_temp_json(
        r#"{
            "building": { "name": "X", "numberOfFloors": 4, "elevators": [{ "id": 1 }], "schedulingStrategy": "FCFS" },
            "scenario": [{ "type": "setStrategy", "strategy": "ELEVATOR_ALGORITHM" }]
        }"#,
    );
    let result = load_simulation(&path, None);
    fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(Error::ConversionError(ConversionError::UnknownSchedulingStrategy(_)))));
}

#[tokio::test(start_paused = true)]
async fn fleets_with_duplicate_ids_are_rejected() {
    let path = write_temp_json(r#"{ "building": { "name": "X", "numberOfFloors": 4, "elevators": [{ "id": 1 }, { "id": 1 }], "schedulingStrategy": "FCFS" } }"#);

    let result = load_simulation(&path, None);
    fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(Error::DuplicateElevatorId(_))));
}
