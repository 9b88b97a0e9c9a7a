use futures::future::join_all;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::dispatch::controller_config::ControllerConfig;
use crate::domain::dispatch::elevator_selection::select_best_elevator;
use crate::domain::dispatch::elevator_worker::ElevatorHandle;
use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator::Elevator;
use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::{Floor, FloorRange};
use crate::domain::elevator::request::{Request, RequestKind};
use crate::domain::observer::elevator_observer::ElevatorObserver;
use crate::domain::scheduling::scheduling_strategy::{SchedulingStrategy, StrategySlot};
use crate::domain::utils::id::ElevatorId;
use crate::domain::utils::statistics::{ANALYTICS_TARGET, DispatchEvent, StatParameter, StatisticEvent, StatsCollector};
use crate::error::{Error, Result};

/// Dispatcher for a fixed fleet of elevators in one building.
///
/// Every elevator is driven by its own worker task, spawned on the Tokio runtime the controller
/// is created in. Requests only enqueue work and wake the worker, so none of the public
/// operations ever waits for an elevator to move. Dropping the controller stops all workers.
#[derive(Debug)]
pub struct ElevatorController {
    floors: FloorRange,
    elevators: Vec<ElevatorHandle>,
    strategy: StrategySlot,
    floor_travel_time: Duration,
    cancel: CancellationToken,
    workers: Mutex<Vec<JoinHandle<()>>>,
    stats: Option<Arc<StatsCollector>>,
}

impl ElevatorController {
    pub fn new(config: ControllerConfig, strategy: Arc<dyn SchedulingStrategy>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        if config.elevators.is_empty() {
            return Err(Error::EmptyFleet);
        }

        let mut seen = HashSet::new();
        let mut elevators = Vec::with_capacity(config.elevators.len());
        for elevator_config in &config.elevators {
            if !seen.insert(elevator_config.id) {
                return Err(Error::DuplicateElevatorId(elevator_config.id));
            }
            let elevator = Elevator::new(elevator_config.id, elevator_config.start_floor, config.floors)?;
            elevators.push(ElevatorHandle::new(elevator));
        }

        let strategy = StrategySlot::new(strategy);
        let cancel = CancellationToken::new();
        let workers = elevators
            .iter()
            .map(|handle| runtime.spawn(handle.worker(strategy.clone(), config.floor_travel_time, cancel.child_token(), config.stats.clone()).run()))
            .collect();

        log::info!(
            "Elevator controller started with {} elevators for floors {} using {}",
            elevators.len(),
            config.floors,
            strategy.name()
        );

        Ok(ElevatorController {
            floors: config.floors,
            elevators,
            strategy,
            floor_travel_time: config.floor_travel_time,
            cancel,
            workers: Mutex::new(workers),
            stats: config.stats,
        })
    }

    fn handle(&self, elevator_id: ElevatorId) -> Option<&ElevatorHandle> {
        self.elevators.iter().find(|handle| handle.id == elevator_id)
    }

    fn record(&self, event: StatisticEvent) {
        if let Some(stats) = &self.stats {
            stats.add_event(event);
        }
    }

    /// Hall call: someone on `floor` wants to travel `direction`.
    ///
    /// Returns the elevator the call was assigned to, or `None` if the call was dropped because
    /// it was malformed or no elevator is in service.
    pub fn request_elevator(&self, floor: Floor, direction: Direction) -> Option<ElevatorId> {
        if direction == Direction::Idle {
            log::warn!("Hall call at floor {} has no direction and is dropped", floor);
            self.record_hall_call_dropped(floor, direction);
            return None;
        }
        if !self.floors.contains(floor) {
            log::warn!("Hall call at floor {} is outside of floors {} and is dropped", floor, self.floors);
            self.record_hall_call_dropped(floor, direction);
            return None;
        }

        self.dispatch_hall_call(Request::hall(floor, direction))
    }

    fn dispatch_hall_call(&self, request: Request) -> Option<ElevatorId> {
        let mut excluded: Vec<ElevatorId> = Vec::new();

        loop {
            let statuses: Vec<ElevatorStatus> = self.elevators.iter().filter(|handle| !excluded.contains(&handle.id)).map(ElevatorHandle::status).collect();

            let Some(elevator_id) = select_best_elevator(&statuses, request.floor(), request.direction()) else {
                log::warn!("No elevator in service for {}, the call is dropped", request);
                self.record_hall_call_dropped(request.floor(), request.direction());
                return None;
            };
            let handle = self.handle(elevator_id)?;

            match handle.enqueue(request.assigned_to(elevator_id)) {
                Ok(pending) => {
                    log::info!("Assigned {} to elevator {}", request, elevator_id);
                    tracing::info!(
                        target: ANALYTICS_TARGET,
                        Event = DispatchEvent::HallCallAssigned.as_str(),
                        ElevatorId = elevator_id.id,
                        Floor = request.floor(),
                        Direction = %request.direction(),
                        Strategy = self.strategy.name(),
                        PendingStops = pending,
                    );

                    let mut event = StatisticEvent::new(DispatchEvent::HallCallAssigned);
                    event
                        .set(StatParameter::ElevatorId, elevator_id.id)
                        .set(StatParameter::Floor, request.floor())
                        .set(StatParameter::Direction, request.direction().to_string())
                        .set(StatParameter::Strategy, self.strategy.name())
                        .set(StatParameter::PendingStops, pending);
                    self.record(event);
                    return Some(elevator_id);
                }
                // went into maintenance after its status was read
                Err(Error::ElevatorInMaintenance(_)) => excluded.push(elevator_id),
                Err(e) => {
                    log::warn!("Elevator {} rejected {}: {}", elevator_id, request, e);
                    self.record_hall_call_dropped(request.floor(), request.direction());
                    return None;
                }
            }
        }
    }

    fn record_hall_call_dropped(&self, floor: Floor, direction: Direction) {
        tracing::warn!(
            target: ANALYTICS_TARGET,
            Event = DispatchEvent::HallCallDropped.as_str(),
            Floor = floor,
            Direction = %direction,
        );

        let mut event = StatisticEvent::new(DispatchEvent::HallCallDropped);
        event.set(StatParameter::Floor, floor).set(StatParameter::Direction, direction.to_string());
        self.record(event);
    }

    /// Cabin call: a passenger inside `elevator_id` pressed the button for `floor`.
    ///
    /// Unknown elevators, floors outside the building and elevators in maintenance are ignored.
    pub fn request_floor(&self, elevator_id: ElevatorId, floor: Floor) -> bool {
        let Some(handle) = self.handle(elevator_id) else {
            log::warn!("Cabin call to floor {} for unknown elevator {} is ignored", floor, elevator_id);
            self.record_cabin_call_ignored(elevator_id, floor);
            return false;
        };

        let direction = handle.status().direction;
        match handle.enqueue(Request::cabin(elevator_id, floor, direction)) {
            Ok(pending) => {
                log::info!("Elevator {} accepted cabin call to floor {}", elevator_id, floor);

                let mut event = StatisticEvent::new(DispatchEvent::CabinCallAccepted);
                event
                    .set(StatParameter::ElevatorId, elevator_id.id)
                    .set(StatParameter::Floor, floor)
                    .set(StatParameter::Strategy, self.strategy.name())
                    .set(StatParameter::PendingStops, pending);
                self.record(event);
                true
            }
            Err(e) => {
                log::warn!("Cabin call to floor {} is ignored: {}", floor, e);
                self.record_cabin_call_ignored(elevator_id, floor);
                false
            }
        }
    }

    fn record_cabin_call_ignored(&self, elevator_id: ElevatorId, floor: Floor) {
        tracing::warn!(
            target: ANALYTICS_TARGET,
            Event = DispatchEvent::CabinCallIgnored.as_str(),
            ElevatorId = elevator_id.id,
            Floor = floor,
        );

        let mut event = StatisticEvent::new(DispatchEvent::CabinCallIgnored);
        event.set(StatParameter::ElevatorId, elevator_id.id).set(StatParameter::Floor, floor);
        self.record(event);
    }

    /// Wakes the worker of `elevator_id` so it drains its queue. Returns `false` for unknown ids.
    pub fn process_elevator_requests(&self, elevator_id: ElevatorId) -> bool {
        match self.handle(elevator_id) {
            Some(handle) => {
                handle.trigger();
                true
            }
            None => false,
        }
    }

    /// Replaces the active strategy. Elevators already on their way re-plan at the next floor.
    pub fn set_scheduling_strategy(&self, strategy: Arc<dyn SchedulingStrategy>) {
        let previous = self.strategy.replace(strategy);
        for handle in &self.elevators {
            handle.request_replan();
        }

        let current = self.strategy.name();
        log::info!("Scheduling strategy changed from {} to {}", previous.name(), current);
        tracing::info!(target: ANALYTICS_TARGET, Event = DispatchEvent::StrategyChanged.as_str(), Strategy = current);

        let mut event = StatisticEvent::new(DispatchEvent::StrategyChanged);
        event.set(StatParameter::Strategy, current);
        self.record(event);
    }

    /// Takes an elevator out of service (`enabled`) or puts it back.
    ///
    /// A moving elevator stops at the next floor. Its hall calls are handed to the rest of the
    /// fleet, its cabin calls are dropped. Putting back an elevator that is in service changes
    /// nothing. Returns `false` for unknown elevators.
    pub fn set_maintenance(&self, elevator_id: ElevatorId, enabled: bool) -> bool {
        let Some(handle) = self.handle(elevator_id) else {
            log::warn!("Maintenance change for unknown elevator {} is ignored", elevator_id);
            return false;
        };

        if !enabled {
            {
                let mut elevator = handle.lock();
                if elevator.state() != ElevatorState::Maintenance {
                    log::debug!("Elevator {} is already in service", elevator_id);
                    return true;
                }
                if let Err(e) = elevator.exit_maintenance() {
                    log::warn!("Elevator {} could not leave maintenance: {}", elevator_id, e);
                    return false;
                }
            }
            log::info!("Elevator {} is back in service", elevator_id);
            tracing::info!(target: ANALYTICS_TARGET, Event = DispatchEvent::MaintenanceLeft.as_str(), ElevatorId = elevator_id.id);
            let mut event = StatisticEvent::new(DispatchEvent::MaintenanceLeft);
            event.set(StatParameter::ElevatorId, elevator_id.id);
            self.record(event);
            return true;
        }

        let displaced = match handle.lock().enter_maintenance() {
            Ok(displaced) => displaced,
            Err(e) => {
                log::warn!("Elevator {} could not enter maintenance: {}", elevator_id, e);
                return false;
            }
        };
        handle.request_replan();

        log::info!("Elevator {} is in maintenance, {} pending stops displaced", elevator_id, displaced.len());
        tracing::info!(
            target: ANALYTICS_TARGET,
            Event = DispatchEvent::MaintenanceEntered.as_str(),
            ElevatorId = elevator_id.id,
            PendingStops = displaced.len(),
        );
        let mut event = StatisticEvent::new(DispatchEvent::MaintenanceEntered);
        event.set(StatParameter::ElevatorId, elevator_id.id).set(StatParameter::PendingStops, displaced.len());
        self.record(event);

        for request in displaced {
            match request.kind() {
                RequestKind::Hall => {
                    self.dispatch_hall_call(request);
                }
                RequestKind::Cabin => {
                    log::warn!("Elevator {} dropped {} on entering maintenance", elevator_id, request);
                    let mut event = StatisticEvent::new(DispatchEvent::CabinCallDropped);
                    event.set(StatParameter::ElevatorId, elevator_id.id).set(StatParameter::Floor, request.floor());
                    self.record(event);
                }
            }
        }
        true
    }

    /// Registers `observer` with every elevator of the fleet.
    pub fn add_observer(&self, observer: Arc<dyn ElevatorObserver>) {
        for handle in &self.elevators {
            handle.lock().add_observer(observer.clone());
        }
    }

    pub fn remove_observer(&self, observer: &Arc<dyn ElevatorObserver>) {
        for handle in &self.elevators {
            handle.lock().remove_observer(observer);
        }
    }

    /// Status of every elevator, in fleet order.
    pub fn statuses(&self) -> Vec<ElevatorStatus> {
        self.elevators.iter().map(ElevatorHandle::status).collect()
    }

    pub fn status(&self, elevator_id: ElevatorId) -> Option<ElevatorStatus> {
        self.handle(elevator_id).map(ElevatorHandle::status)
    }

    /// Receiver that follows every status change of `elevator_id`.
    pub fn subscribe(&self, elevator_id: ElevatorId) -> Option<watch::Receiver<ElevatorStatus>> {
        self.handle(elevator_id).map(ElevatorHandle::subscribe)
    }

    pub fn elevator_ids(&self) -> Vec<ElevatorId> {
        self.elevators.iter().map(|handle| handle.id).collect()
    }

    pub fn floors(&self) -> FloorRange {
        self.floors
    }

    pub fn floor_travel_time(&self) -> Duration {
        self.floor_travel_time
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Resolves once no elevator has pending stops (elevators in maintenance count as done).
    ///
    /// Fails if the workers were shut down while work was still pending.
    pub async fn wait_until_idle(&self) -> Result<()> {
        loop {
            for handle in &self.elevators {
                let mut status_rx = handle.subscribe();
                tokio::select! {
                    biased;
                    _ = status_rx.wait_for(ElevatorStatus::is_settled) => {}
                    _ = self.cancel.cancelled() => return Err(Error::WorkerStopped(handle.id)),
                }
            }

            if self.statuses().iter().all(ElevatorStatus::is_settled) {
                return Ok(());
            }
        }
    }

    /// Stops every worker and waits for them to finish. Moving elevators stay at their last floor.
    pub async fn shutdown(&self) {
        self.cancel.cancel();

        let workers = std::mem::take(&mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner));
        for result in join_all(workers).await {
            if let Err(e) = result {
                log::error!("Elevator worker ended abnormally: {}", e);
            }
        }
        log::info!("Elevator controller shut down");
    }
}

impl Drop for ElevatorController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
