use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator::Elevator;
use crate::domain::elevator::floor::Floor;
use crate::domain::elevator::request::Request;
use crate::domain::scheduling::scheduling_strategy::SchedulingStrategy;

/// Directional sweep (SCAN / LOOK).
///
/// The elevator keeps its direction as long as there is work ahead of it and reverses at the
/// last pending stop instead of running to the end of the shaft. Cabin calls ahead are answered
/// on the way; hall calls only when the car travels the way the caller wants to go. Hall calls
/// for the other way are picked up after the car turns around.
#[derive(Debug, Clone, Copy)]
pub struct SweepSchedulingStrategy {
    name: &'static str,
    idle_tie_break: Direction,
}

impl SweepSchedulingStrategy {
    /// `idle_tie_break` decides where an idle car goes when the nearest stops above and below are
    /// equally far away. `Direction::Idle` falls back to `Up`.
    pub fn new(name: &'static str, idle_tie_break: Direction) -> Self {
        let idle_tie_break = if idle_tie_break == Direction::Idle { Direction::Up } else { idle_tie_break };
        SweepSchedulingStrategy { name, idle_tie_break }
    }

    pub fn scan(idle_tie_break: Direction) -> Self {
        Self::new("SCAN", idle_tie_break)
    }

    pub fn look(idle_tie_break: Direction) -> Self {
        Self::new("LOOK", idle_tie_break)
    }

    pub fn idle_tie_break(&self) -> Direction {
        self.idle_tie_break
    }

    fn next_from_idle(&self, stops: &VecDeque<Request>, current_floor: Floor) -> Floor {
        let above = stops.iter().map(Request::floor).filter(|floor| *floor > current_floor).min();
        let below = stops.iter().map(Request::floor).filter(|floor| *floor < current_floor).max();

        match (above, below) {
            (Some(up), Some(down)) => match current_floor.abs_diff(up).cmp(&current_floor.abs_diff(down)) {
                Ordering::Less => up,
                Ordering::Greater => down,
                Ordering::Equal if self.idle_tie_break == Direction::Down => down,
                Ordering::Equal => up,
            },
            (Some(up), None) => up,
            (None, Some(down)) => down,
            (None, None) => current_floor,
        }
    }

    /// Next stop when travelling in `travel`: the nearest stop ahead that can be answered on
    /// this pass, otherwise the farthest stop ahead (the turnaround point).
    fn next_on_pass(stops: &VecDeque<Request>, current_floor: Floor, travel: Direction) -> Option<Floor> {
        let is_ahead = |request: &&Request| Direction::towards(current_floor, request.floor()) == travel;

        stops
            .iter()
            .filter(is_ahead)
            .filter(|request| request.serves_direction(travel))
            .map(Request::floor)
            .min_by_key(|floor| current_floor.abs_diff(*floor))
            .or_else(|| stops.iter().filter(is_ahead).map(Request::floor).max_by_key(|floor| current_floor.abs_diff(*floor)))
    }

    /// Whether a stop at the current floor can be answered while travelling in `travel`. An idle
    /// car answers any of them; a moving car leaves hall calls for the other way until it turns.
    fn stops_here(stops: &VecDeque<Request>, current_floor: Floor, travel: Direction) -> bool {
        stops
            .iter()
            .any(|request| request.floor() == current_floor && (travel == Direction::Idle || request.serves_direction(travel)))
    }
}

impl SchedulingStrategy for SweepSchedulingStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get_next_stop(&self, elevator: &mut Elevator) -> Floor {
        let current_floor = elevator.current_floor();
        let current_direction = elevator.direction();
        let stops = elevator.pending_stops();

        if stops.is_empty() || Self::stops_here(stops, current_floor, current_direction) {
            return current_floor;
        }

        let (target, direction) = match current_direction {
            Direction::Idle => {
                let target = self.next_from_idle(stops, current_floor);
                (target, Direction::towards(current_floor, target))
            }
            travel => match Self::next_on_pass(stops, current_floor, travel) {
                Some(target) => (target, travel),
                None => {
                    let reverse = travel.opposite();
                    let target = if Self::stops_here(stops, current_floor, reverse) {
                        current_floor
                    } else {
                        Self::next_on_pass(stops, current_floor, reverse).unwrap_or(current_floor)
                    };
                    (target, reverse)
                }
            },
        };

        elevator.set_direction(direction);
        target
    }
}
