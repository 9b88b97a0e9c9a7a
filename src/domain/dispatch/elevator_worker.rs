use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio_util::sync::CancellationToken;

use crate::domain::elevator::elevator::Elevator;
use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::Floor;
use crate::domain::elevator::request::Request;
use crate::domain::scheduling::scheduling_strategy::StrategySlot;
use crate::domain::utils::id::ElevatorId;
use crate::domain::utils::statistics::{ANALYTICS_TARGET, DispatchEvent, StatParameter, StatisticEvent, StatsCollector};
use crate::error::{Error, Result};

/// Controller-side view of one elevator: the shared state plus the signals to its worker.
#[derive(Debug)]
pub(crate) struct ElevatorHandle {
    pub(crate) id: ElevatorId,
    elevator: Arc<Mutex<Elevator>>,
    wake: Arc<Notify>,
    replan: Arc<AtomicBool>,
    status_rx: watch::Receiver<ElevatorStatus>,
}

impl ElevatorHandle {
    pub(crate) fn new(elevator: Elevator) -> Self {
        ElevatorHandle {
            id: elevator.id(),
            status_rx: elevator.subscribe(),
            elevator: Arc::new(Mutex::new(elevator)),
            wake: Arc::new(Notify::new()),
            replan: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Elevator> {
        lock_elevator(&self.elevator)
    }

    pub(crate) fn status(&self) -> ElevatorStatus {
        self.status_rx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ElevatorStatus> {
        self.status_rx.clone()
    }

    /// Queues `request` and wakes the worker. The running movement is re-planned at the next floor.
    pub(crate) fn enqueue(&self, request: Request) -> Result<usize> {
        let pending = {
            let mut elevator = self.lock();
            elevator.add_request(request)?;
            self.replan.store(true, Ordering::SeqCst);
            elevator.pending_stops().len()
        };
        self.trigger();
        Ok(pending)
    }

    /// Asks the worker to drain the queue. Triggers arriving during a drain collapse into one.
    pub(crate) fn trigger(&self) {
        self.wake.notify_one();
    }

    pub(crate) fn request_replan(&self) {
        self.replan.store(true, Ordering::SeqCst);
    }

    pub(crate) fn worker(&self, strategy: StrategySlot, floor_travel_time: Duration, cancel: CancellationToken, stats: Option<Arc<StatsCollector>>) -> ElevatorWorker {
        ElevatorWorker {
            id: self.id,
            elevator: self.elevator.clone(),
            wake: self.wake.clone(),
            replan: self.replan.clone(),
            strategy,
            floor_travel_time,
            cancel,
            stats,
        }
    }
}

fn lock_elevator(elevator: &Mutex<Elevator>) -> MutexGuard<'_, Elevator> {
    elevator.lock().unwrap_or_else(PoisonError::into_inner)
}

fn has_stop_at(elevator: &Elevator, floor: Floor) -> bool {
    elevator.pending_stops().iter().any(|request| request.floor() == floor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Movement {
    Arrived(Floor),
    /// New work, a new strategy or a withdrawn stop showed up on the way; ask the strategy again.
    Redirected,
    /// The elevator was taken out of service.
    Halted,
}

/// Long-running task that moves one elevator through its queue.
pub(crate) struct ElevatorWorker {
    id: ElevatorId,
    elevator: Arc<Mutex<Elevator>>,
    wake: Arc<Notify>,
    replan: Arc<AtomicBool>,
    strategy: StrategySlot,
    floor_travel_time: Duration,
    cancel: CancellationToken,
    stats: Option<Arc<StatsCollector>>,
}

impl ElevatorWorker {
    pub(crate) async fn run(self) {
        log::debug!("Worker of elevator {} started", self.id);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = self.wake.notified() => {}
            }

            match self.drain().await {
                Ok(()) => {}
                Err(Error::MovementInterrupted { elevator_id, floor }) => {
                    log::info!("Elevator {} stopped at floor {} on shutdown", elevator_id, floor);
                    break;
                }
                Err(e) => log::error!("Elevator {} failed to process its requests: {}", self.id, e),
            }
        }

        log::debug!("Worker of elevator {} stopped", self.id);
    }

    fn lock(&self) -> MutexGuard<'_, Elevator> {
        lock_elevator(&self.elevator)
    }

    /// Serves stops until the queue is empty or the elevator goes into maintenance.
    pub(crate) async fn drain(&self) -> Result<()> {
        loop {
            let next_stop = {
                let mut elevator = self.lock();
                self.replan.store(false, Ordering::SeqCst);
                if !elevator.has_requests() || elevator.state() == ElevatorState::Maintenance {
                    return Ok(());
                }
                let strategy = self.strategy.current();
                let next_stop = strategy.get_next_stop(&mut elevator);
                log::debug!("Elevator {} at floor {} heads for floor {} ({})", self.id, elevator.current_floor(), next_stop, strategy.name());
                next_stop
            };

            match self.move_to_floor(next_stop).await? {
                Movement::Arrived(floor) => self.arrive(floor),
                Movement::Redirected => continue,
                Movement::Halted => return Ok(()),
            }
        }
    }

    /// Moves towards `target` one floor per travel interval.
    ///
    /// Stops early at a floor boundary when new work was queued, the strategy changed or the
    /// stop at `target` was withdrawn, so the caller can plan again.
    pub(crate) async fn move_to_floor(&self, target: Floor) -> Result<Movement> {
        loop {
            {
                let mut elevator = self.lock();
                if elevator.state() == ElevatorState::Maintenance {
                    return Ok(Movement::Halted);
                }
                if !has_stop_at(&elevator, target) {
                    return Ok(Movement::Redirected);
                }
                if elevator.current_floor() == target {
                    elevator.stop_at_current_floor()?;
                    return Ok(Movement::Arrived(target));
                }
            }

            self.travel_one_floor().await?;

            {
                let mut elevator = self.lock();
                if elevator.state() == ElevatorState::Maintenance {
                    return Ok(Movement::Halted);
                }
                if !has_stop_at(&elevator, target) {
                    return Ok(Movement::Redirected);
                }
                let floor = elevator.step_toward(target)?;
                if floor == target {
                    return Ok(Movement::Arrived(floor));
                }
                if self.replan.load(Ordering::SeqCst) {
                    return Ok(Movement::Redirected);
                }
            }
        }
    }

    async fn travel_one_floor(&self) -> Result<()> {
        tokio::select! {
            _ = self.cancel.cancelled() => {
                let floor = self.lock().current_floor();
                Err(Error::MovementInterrupted { elevator_id: self.id, floor })
            }
            _ = tokio::time::sleep(self.floor_travel_time) => Ok(()),
        }
    }

    fn arrive(&self, floor: Floor) {
        let (served, pending) = {
            let mut elevator = self.lock();
            let served = elevator.remove_requests_at(floor);
            (served, elevator.pending_stops().len())
        };

        for request in served {
            let wait_time_ms = request.created_at().elapsed().as_millis();
            log::info!("Elevator {} served {} after {} ms", self.id, request, wait_time_ms);

            tracing::info!(
                target: ANALYTICS_TARGET,
                Event = DispatchEvent::Arrival.as_str(),
                ElevatorId = self.id.id,
                Floor = floor,
                WaitTimeMs = wait_time_ms as u64,
                PendingStops = pending,
            );

            if let Some(stats) = &self.stats {
                let mut event = StatisticEvent::new(DispatchEvent::Arrival);
                event
                    .set(StatParameter::ElevatorId, self.id.id)
                    .set(StatParameter::Floor, floor)
                    .set(StatParameter::Direction, request.direction().to_string())
                    .set(StatParameter::Strategy, self.strategy.name())
                    .set(StatParameter::WaitTimeMs, wait_time_ms)
                    .set(StatParameter::PendingStops, pending);
                stats.add_event(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elevator::direction::Direction;
    use crate::domain::elevator::floor::FloorRange;
    use crate::domain::scheduling::fcfs_scheduling_strategy::FcfsSchedulingStrategy;

    const TRAVEL: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn withdrawn_stop_halts_the_car_at_the_next_floor() {
        let elevator = Elevator::new(ElevatorId::new(1), 0, FloorRange::with_floor_count(10).unwrap()).unwrap();
        let handle = ElevatorHandle::new(elevator);
        let cancel = CancellationToken::new();
        let strategy = StrategySlot::new(Arc::new(FcfsSchedulingStrategy::new()));
        let worker = tokio::spawn(handle.worker(strategy, TRAVEL, cancel.clone(), None).run());

        let request = Request::cabin(handle.id, 6, Direction::Idle);
        let request_id = request.id();
        handle.enqueue(request).unwrap();

        tokio::time::sleep(TRAVEL * 2 + TRAVEL / 2).await;
        assert!(handle.lock().remove_request(&request_id).is_some());
        tokio::time::sleep(TRAVEL * 5).await;

        let status = handle.status();
        assert_eq!(status.current_floor, 2);
        assert_eq!(status.state, ElevatorState::Idle);
        assert_eq!(status.direction, Direction::Idle);

        cancel.cancel();
        worker.await.unwrap();
    }
}
