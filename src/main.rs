use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use elevator_dispatch::api::simulation_dto::SimulationDto;
use elevator_dispatch::build_simulation;
use elevator_dispatch::domain::command::command_invoker::CommandInvoker;
use elevator_dispatch::domain::observer::elevator_display::ElevatorDisplay;
use elevator_dispatch::domain::scheduling::scheduling_strategy_type::SchedulingStrategyType;
use elevator_dispatch::domain::utils::statistics::StatsCollector;
use elevator_dispatch::loader::parser::parse_json_file;
use elevator_dispatch::logger;

/// Runs a scripted elevator scenario against a simulated building.
#[derive(Parser, Debug)]
#[command(name = "elevator_dispatch", version, about)]
struct Args {
    /// Simulation file with the building and the scenario to play.
    #[arg(short, long, default_value = "data/tech_tower.json")]
    config: PathBuf,

    /// Scheduling strategy to start with (FCFS, SCAN or LOOK), overrides the file.
    #[arg(short, long)]
    strategy: Option<SchedulingStrategyType>,

    /// Travel time per floor in milliseconds, overrides the file.
    #[arg(long)]
    floor_travel_ms: Option<u64>,

    /// Write dispatch statistics as CSV to this file.
    #[arg(long)]
    stats_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let stats = match &args.stats_file {
        Some(path) => Some(Arc::new(StatsCollector::init(Some(path.as_path())).with_context(|| format!("cannot create statistics file '{}'", path.display()))?)),
        None => None,
    };

    let mut simulation: SimulationDto = parse_json_file(&args.config).with_context(|| format!("cannot load simulation '{}'", args.config.display()))?;
    if let Some(strategy) = args.strategy {
        simulation.building.scheduling_strategy = strategy.to_string();
    }
    if let Some(floor_travel_ms) = args.floor_travel_ms {
        simulation.building.floor_travel_ms = floor_travel_ms;
    }

    let (building, scenario) = build_simulation(simulation, stats.clone())?;
    building.controller.add_observer(Arc::new(ElevatorDisplay::new()));

    println!("{}", "=== Elevator System Demo ===".bold());
    println!("Building: {}", building.name);
    println!("Floors: {} {}", building.number_of_floors(), building.floors);
    println!("Elevators: {}", building.controller.elevator_ids().len());
    println!("Strategy: {}", building.controller.strategy_name());
    println!("\n--- Starting Elevator Requests ---\n");

    let mut invoker = CommandInvoker::new();
    let report = scenario.run(&building, &mut invoker).await?;
    building.controller.wait_until_idle().await?;

    println!("\n--- Command History ---");
    println!("Total commands executed: {} ({} dropped)", report.history.len(), report.dropped);
    for line in &report.history {
        println!("{}", line);
    }

    println!("\n--- Final Elevator Positions ---");
    for status in building.controller.statuses() {
        println!("Elevator {}: floor {} ({})", status.id, status.current_floor, status.state);
    }

    building.controller.shutdown().await;
    if let Some(stats) = stats {
        stats.close();
    }

    println!("\n{}", "=== Demo Complete ===".bold());
    Ok(())
}
