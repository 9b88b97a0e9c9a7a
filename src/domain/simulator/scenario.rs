use std::sync::Arc;
use std::time::Duration;

use crate::api::scenario_dto::ScenarioStepDto;
use crate::domain::building::Building;
use crate::domain::command::command_invoker::CommandInvoker;
use crate::domain::command::elevator_command::{CommandOutcome, ElevatorRequestCommand};
use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::scheduling::scheduling_strategy_type::SchedulingStrategyType;
use crate::domain::utils::id::ElevatorId;
use crate::error::{ConversionError, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStep {
    Request(ElevatorRequestCommand),
    SetStrategy(SchedulingStrategyType),
    Maintenance { elevator_id: ElevatorId, enabled: bool },
    Wait(Duration),
    /// Block until every elevator has drained its queue.
    WaitIdle,
}

impl TryFrom<ScenarioStepDto> for ScenarioStep {
    type Error = Error;

    fn try_from(dto: ScenarioStepDto) -> Result<Self> {
        let step = match dto {
            ScenarioStepDto::HallCall { floor, direction } => {
                let parsed: Direction = direction.parse()?;
                if parsed == Direction::Idle {
                    return Err(ConversionError::MissingHallDirection(direction).into());
                }
                ScenarioStep::Request(ElevatorRequestCommand::Hall { floor, direction: parsed })
            }
            ScenarioStepDto::CabinCall { elevator_id, floor } => ScenarioStep::Request(ElevatorRequestCommand::Cabin { elevator_id: ElevatorId::new(elevator_id), floor }),
            ScenarioStepDto::SetStrategy { strategy } => ScenarioStep::SetStrategy(strategy.parse()?),
            ScenarioStepDto::Maintenance { elevator_id, enabled } => ScenarioStep::Maintenance { elevator_id: ElevatorId::new(elevator_id), enabled },
            ScenarioStepDto::Wait { ms } => ScenarioStep::Wait(Duration::from_millis(ms)),
            ScenarioStepDto::WaitIdle => ScenarioStep::WaitIdle,
        };
        Ok(step)
    }
}

/// What a scenario run did.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// One line per executed command, in execution order.
    pub history: Vec<String>,
    pub dropped: usize,
    pub final_statuses: Vec<ElevatorStatus>,
}

/// A scripted sequence of requests and administrative actions.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn new(steps: Vec<ScenarioStep>) -> Self {
        Scenario { steps }
    }

    pub fn from_dtos(dtos: Vec<ScenarioStepDto>) -> Result<Self> {
        let steps = dtos.into_iter().map(ScenarioStep::try_from).collect::<Result<Vec<_>>>()?;
        Ok(Scenario { steps })
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Plays all steps against `building`. Requests go through `invoker` and end up in its history.
    pub async fn run(&self, building: &Building, invoker: &mut CommandInvoker) -> Result<ScenarioReport> {
        let first_record = invoker.len();
        let controller = &building.controller;

        for step in &self.steps {
            match step {
                ScenarioStep::Request(command) => {
                    invoker.execute_command(Arc::new(*command), controller);
                }
                ScenarioStep::SetStrategy(strategy_type) => building.switch_strategy(*strategy_type),
                ScenarioStep::Maintenance { elevator_id, enabled } => {
                    if !controller.set_maintenance(*elevator_id, *enabled) {
                        return Err(Error::UnknownElevator(*elevator_id));
                    }
                }
                ScenarioStep::Wait(duration) => tokio::time::sleep(*duration).await,
                ScenarioStep::WaitIdle => controller.wait_until_idle().await?,
            }
        }

        let records = &invoker.history()[first_record..];
        let history = records.iter().map(|record| format!("Command {}: {} -> {}", record.id, record.command, record.outcome)).collect();
        let dropped = records.iter().filter(|record| record.outcome == CommandOutcome::Dropped).count();

        Ok(ScenarioReport { history, dropped, final_statuses: controller.statuses() })
    }
}
