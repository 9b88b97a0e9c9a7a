use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator_state::ElevatorState;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::{Floor, FloorRange};
use crate::domain::elevator::request::Request;
use crate::domain::observer::elevator_observer::ElevatorObserver;
use crate::domain::utils::id::{ElevatorId, RequestId};
use crate::error::{Error, Result};

/// A single cabin and its queue of pending stops.
///
/// The queue is kept in insertion order; choosing which stop comes next is the job of the
/// active `SchedulingStrategy`. All mutation happens through `&mut self`, the controller keeps
/// each elevator behind its own lock so the controller and the worker never race on it.
pub struct Elevator {
    id: ElevatorId,
    floors: FloorRange,
    current_floor: Floor,
    direction: Direction,
    state: ElevatorState,
    pending_stops: VecDeque<Request>,
    observers: Vec<Arc<dyn ElevatorObserver>>,
    status_tx: watch::Sender<ElevatorStatus>,
}

impl Elevator {
    pub fn new(id: ElevatorId, start_floor: Floor, floors: FloorRange) -> Result<Self> {
        floors.check(start_floor)?;

        let status = ElevatorStatus {
            id,
            current_floor: start_floor,
            direction: Direction::Idle,
            state: ElevatorState::Idle,
            pending_floors: Vec::new(),
        };
        let (status_tx, _) = watch::channel(status);

        Ok(Elevator {
            id,
            floors,
            current_floor: start_floor,
            direction: Direction::Idle,
            state: ElevatorState::Idle,
            pending_stops: VecDeque::new(),
            observers: Vec::new(),
            status_tx,
        })
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn floors(&self) -> FloorRange {
        self.floors
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn pending_stops(&self) -> &VecDeque<Request> {
        &self.pending_stops
    }

    pub fn has_requests(&self) -> bool {
        !self.pending_stops.is_empty()
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            current_floor: self.current_floor,
            direction: self.direction,
            state: self.state,
            pending_floors: self.pending_stops.iter().map(Request::floor).collect(),
        }
    }

    /// Receiver that always holds the latest status of this elevator.
    pub fn subscribe(&self) -> watch::Receiver<ElevatorStatus> {
        self.status_tx.subscribe()
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ElevatorObserver>) {
        self.observers.push(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn ElevatorObserver>) {
        self.observers.retain(|registered| !Arc::ptr_eq(registered, observer));
    }

    /// Direction changes are owned by the scheduling strategy; observers hear about every change.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction != direction {
            self.direction = direction;
            self.notify_state_change();
        }
    }

    fn set_state(&mut self, state: ElevatorState) -> Result<()> {
        if self.state == state {
            return Ok(());
        }
        if !self.state.can_transition_to(state) {
            return Err(Error::IllegalTransition { elevator_id: self.id, from: self.state, to: state });
        }
        self.state = state;
        self.notify_state_change();
        Ok(())
    }

    /// Appends a stop. The first stop of an idle elevator puts it into `Moving`.
    pub fn add_request(&mut self, request: Request) -> Result<()> {
        if self.state == ElevatorState::Maintenance {
            return Err(Error::ElevatorInMaintenance(self.id));
        }
        self.floors.check(request.floor())?;

        self.pending_stops.push_back(request);
        if self.state == ElevatorState::Idle {
            self.set_state(ElevatorState::Moving)?;
        }
        self.publish();
        Ok(())
    }

    /// Removes a single request by identity.
    ///
    /// A worker heading for the withdrawn stop halts at the next floor boundary and plans again.
    pub fn remove_request(&mut self, request_id: &RequestId) -> Option<Request> {
        let position = self.pending_stops.iter().position(|request| request.id() == *request_id)?;
        let removed = self.pending_stops.remove(position);
        self.reset_if_drained();
        self.publish();
        removed
    }

    /// Removes every request for `floor`. One arrival satisfies all co-located requests.
    pub fn remove_requests_at(&mut self, floor: Floor) -> Vec<Request> {
        let (served, remaining): (VecDeque<Request>, VecDeque<Request>) =
            std::mem::take(&mut self.pending_stops).into_iter().partition(|request| request.floor() == floor);
        self.pending_stops = remaining;
        self.reset_if_drained();
        self.publish();
        served.into()
    }

    fn reset_if_drained(&mut self) {
        if self.pending_stops.is_empty() && self.state != ElevatorState::Maintenance {
            self.set_direction(Direction::Idle);
            // Idle is reachable from every non-maintenance state.
            let _ = self.set_state(ElevatorState::Idle);
        }
    }

    /// Advances at most one floor towards `target` and returns the floor the cabin is at afterwards.
    ///
    /// Reaching the target (or already being there) leaves the elevator `Stopped`. This is the
    /// unit of observable progress: every floor passed fires one floor-change notification.
    pub fn step_toward(&mut self, target: Floor) -> Result<Floor> {
        self.floors.check(target)?;

        let direction = Direction::towards(self.current_floor, target);
        if direction == Direction::Idle {
            self.stop_at_current_floor()?;
            return Ok(self.current_floor);
        }

        self.set_state(ElevatorState::Moving)?;
        self.set_direction(direction);
        self.current_floor += direction.step();
        self.notify_floor_change();

        if self.current_floor == target {
            self.set_state(ElevatorState::Stopped)?;
        }
        Ok(self.current_floor)
    }

    pub fn stop_at_current_floor(&mut self) -> Result<()> {
        self.set_state(ElevatorState::Stopped)
    }

    /// Takes the elevator out of service and hands back every stop it still had queued.
    pub fn enter_maintenance(&mut self) -> Result<Vec<Request>> {
        self.set_state(ElevatorState::Maintenance)?;
        self.set_direction(Direction::Idle);
        let displaced: Vec<Request> = self.pending_stops.drain(..).collect();
        self.publish();
        Ok(displaced)
    }

    /// Returns a maintenance elevator to service. Elevators already in service are left alone.
    pub fn exit_maintenance(&mut self) -> Result<()> {
        if self.state != ElevatorState::Maintenance {
            return Ok(());
        }
        self.set_state(ElevatorState::Idle)?;
        self.publish();
        Ok(())
    }

    fn notify_state_change(&self) {
        let status = self.status();
        for observer in &self.observers {
            observer.on_elevator_state_change(&status, self.state);
        }
        self.status_tx.send_replace(status);
    }

    fn notify_floor_change(&self) {
        let status = self.status();
        for observer in &self.observers {
            observer.on_elevator_floor_change(&status, self.current_floor);
        }
        self.status_tx.send_replace(status);
    }

    fn publish(&self) {
        self.status_tx.send_replace(self.status());
    }
}

impl fmt::Debug for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("id", &self.id)
            .field("current_floor", &self.current_floor)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("pending_stops", &self.pending_stops.iter().map(Request::floor).collect::<Vec<_>>())
            .field("observers", &self.observers.len())
            .finish()
    }
}
