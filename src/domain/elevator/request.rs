use std::fmt;
use tokio::time::Instant;

use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::floor::Floor;
use crate::domain::utils::id::{ElevatorId, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// External call from a floor, carrying the direction the passenger wants to travel.
    Hall,
    /// Internal call from inside a cabin, naming a destination floor.
    Cabin,
}

/// A stop some elevator has to make. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    id: RequestId,
    floor: Floor,
    kind: RequestKind,
    direction: Direction,
    elevator_id: Option<ElevatorId>,
    created_at: Instant,
}

impl Request {
    /// Hall call that has not been bound to an elevator yet.
    pub fn hall(floor: Floor, direction: Direction) -> Self {
        Request { id: RequestId::new(), floor, kind: RequestKind::Hall, direction, elevator_id: None, created_at: Instant::now() }
    }

    pub fn cabin(elevator_id: ElevatorId, floor: Floor, direction: Direction) -> Self {
        Request { id: RequestId::new(), floor, kind: RequestKind::Cabin, direction, elevator_id: Some(elevator_id), created_at: Instant::now() }
    }

    /// Same request (same id and age) bound to another elevator.
    pub fn assigned_to(&self, elevator_id: ElevatorId) -> Self {
        Request { elevator_id: Some(elevator_id), ..self.clone() }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn elevator_id(&self) -> Option<ElevatorId> {
        self.elevator_id
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn is_internal(&self) -> bool {
        self.kind == RequestKind::Cabin
    }

    /// Whether a car travelling in `travel` may answer this stop on its way.
    ///
    /// Passengers inside the cabin get off wherever the car stops for them, but a hall call
    /// is only answered by a car heading the way the caller wants to go.
    pub fn serves_direction(&self, travel: Direction) -> bool {
        match self.kind {
            RequestKind::Cabin => true,
            RequestKind::Hall => self.direction == travel || self.direction == Direction::Idle,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RequestKind::Hall => write!(f, "hall call at floor {} going {}", self.floor, self.direction),
            RequestKind::Cabin => write!(f, "cabin call to floor {}", self.floor),
        }
    }
}
