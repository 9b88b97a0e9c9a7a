use crate::domain::elevator::direction::Direction;
use crate::domain::elevator::elevator_status::ElevatorStatus;
use crate::domain::elevator::floor::Floor;
use crate::domain::utils::id::ElevatorId;

/// Picks the elevator that should answer a hall call at `floor` going `direction`.
///
/// Elevators without a direction and elevators already heading `direction` towards the call are
/// preferred; the closest of them wins. If none qualifies the closest elevator in service is
/// taken regardless of its direction. Ties go to the elevator listed first. Elevators in
/// maintenance are never selected.
pub fn select_best_elevator(statuses: &[ElevatorStatus], floor: Floor, direction: Direction) -> Option<ElevatorId> {
    let in_service = || statuses.iter().filter(|status| status.state.is_dispatchable());

    closest(in_service().filter(|status| is_on_the_way(status, floor, direction)), floor).or_else(|| closest(in_service(), floor))
}

fn is_on_the_way(status: &ElevatorStatus, floor: Floor, direction: Direction) -> bool {
    match (status.direction, direction) {
        (Direction::Idle, _) => true,
        (Direction::Up, Direction::Up) => status.current_floor < floor,
        (Direction::Down, Direction::Down) => status.current_floor > floor,
        _ => false,
    }
}

fn closest<'a>(candidates: impl Iterator<Item = &'a ElevatorStatus>, floor: Floor) -> Option<ElevatorId> {
    let mut best: Option<&ElevatorStatus> = None;
    for candidate in candidates {
        // strict: the first elevator keeps a tie
        if best.is_none_or(|current| candidate.distance_to(floor) < current.distance_to(floor)) {
            best = Some(candidate);
        }
    }
    best.map(|status| status.id)
}
