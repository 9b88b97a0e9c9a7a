/// Unit tests for the scheduling strategies.
///
/// `visit_all` plays the part of an elevator worker without any timing: ask the strategy for the
/// next stop, step there floor by floor, purge the stop, repeat.
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::domain::elevator::direction::Direction;
    use crate::domain::elevator::elevator::Elevator;
    use crate::domain::elevator::elevator_state::ElevatorState;
    use crate::domain::elevator::floor::{Floor, FloorRange};
    use crate::domain::elevator::request::Request;
    use crate::domain::scheduling::fcfs_scheduling_strategy::FcfsSchedulingStrategy;
    use crate::domain::scheduling::scheduling_strategy::{SchedulingStrategy, StrategySlot};
    use crate::domain::scheduling::scheduling_strategy_type::SchedulingStrategyType;
    use crate::domain::scheduling::sweep_scheduling_strategy::SweepSchedulingStrategy;
    use crate::domain::utils::id::ElevatorId;
    use crate::error::ConversionError;

    const ID: ElevatorId = ElevatorId::new(1);

    fn elevator_at(floor: Floor) -> Elevator {
        Elevator::new(ID, floor, FloorRange::with_floor_count(20).unwrap()).unwrap()
    }

    fn with_cabin_stops(floor: Floor, stops: &[Floor]) -> Elevator {
        let mut elevator = elevator_at(floor);
        for stop in stops {
            elevator.add_request(Request::cabin(ID, *stop, Direction::Idle)).unwrap();
        }
        elevator
    }

    fn visit_all(strategy: &dyn SchedulingStrategy, elevator: &mut Elevator) -> Vec<Floor> {
        let mut visited = Vec::new();
        let mut decisions = 0;
        while elevator.has_requests() {
            decisions += 1;
            assert!(decisions < 100, "strategy never drained the queue: {elevator:?}");

            let next = strategy.get_next_stop(elevator);
            while elevator.current_floor() != next {
                elevator.step_toward(next).unwrap();
            }
            elevator.stop_at_current_floor().unwrap();
            assert!(!elevator.remove_requests_at(next).is_empty(), "strategy chose {next} without a request there");
            visited.push(next);
        }
        visited
    }

    #[test]
    fn empty_queue_returns_current_floor() {
        let mut elevator = elevator_at(7);
        assert_eq!(FcfsSchedulingStrategy::new().get_next_stop(&mut elevator), 7);
        assert_eq!(SweepSchedulingStrategy::scan(Direction::Up).get_next_stop(&mut elevator), 7);
        assert_eq!(elevator.direction(), Direction::Idle);
    }

    #[test]
    fn fcfs_visits_in_arrival_order() {
        let mut elevator = with_cabin_stops(0, &[5, 2, 8]);
        assert_eq!(visit_all(&FcfsSchedulingStrategy::new(), &mut elevator), vec![5, 2, 8]);
        assert_eq!(elevator.state(), ElevatorState::Idle);
        assert_eq!(elevator.direction(), Direction::Idle);
    }

    #[test]
    fn fcfs_does_not_remove_the_chosen_stop() {
        let mut elevator = with_cabin_stops(0, &[5, 2]);
        let strategy = FcfsSchedulingStrategy::new();

        assert_eq!(strategy.get_next_stop(&mut elevator), 5);
        assert_eq!(strategy.get_next_stop(&mut elevator), 5);
        assert_eq!(elevator.status().pending_floors, vec![5, 2]);
        assert_eq!(elevator.direction(), Direction::Up);
    }

    #[test]
    fn fcfs_flips_only_when_the_head_is_behind() {
        let mut elevator = with_cabin_stops(4, &[6, 1]);
        let strategy = FcfsSchedulingStrategy::new();
        elevator.set_direction(Direction::Up);

        assert_eq!(strategy.get_next_stop(&mut elevator), 6);
        assert_eq!(elevator.direction(), Direction::Up);

        elevator.remove_requests_at(6);
        assert_eq!(strategy.get_next_stop(&mut elevator), 1);
        assert_eq!(elevator.direction(), Direction::Down);
    }

    #[test]
    fn sweep_serves_the_current_floor_first() {
        let mut elevator = with_cabin_stops(3, &[8, 3]);
        assert_eq!(SweepSchedulingStrategy::look(Direction::Up).get_next_stop(&mut elevator), 3);
    }

    #[test]
    fn idle_sweep_picks_the_nearer_side() {
        let mut elevator = with_cabin_stops(5, &[9, 3]);
        let strategy = SweepSchedulingStrategy::scan(Direction::Up);

        assert_eq!(strategy.get_next_stop(&mut elevator), 3);
        assert_eq!(elevator.direction(), Direction::Down);
    }

    #[test]
    fn idle_sweep_tie_goes_the_configured_way() {
        let mut up = with_cabin_stops(5, &[3, 7]);
        assert_eq!(SweepSchedulingStrategy::scan(Direction::Up).get_next_stop(&mut up), 7);
        assert_eq!(up.direction(), Direction::Up);

        let mut down = with_cabin_stops(5, &[3, 7]);
        assert_eq!(SweepSchedulingStrategy::scan(Direction::Down).get_next_stop(&mut down), 3);
        assert_eq!(down.direction(), Direction::Down);

        assert_eq!(SweepSchedulingStrategy::scan(Direction::Idle).idle_tie_break(), Direction::Up);
    }

    #[test]
    fn sweep_finishes_the_upward_pass_before_turning() {
        let mut elevator = with_cabin_stops(5, &[3, 9, 7, 1]);
        elevator.set_direction(Direction::Up);

        assert_eq!(visit_all(&SweepSchedulingStrategy::scan(Direction::Up), &mut elevator), vec![7, 9, 3, 1]);
    }

    #[test]
    fn sweep_picks_up_opposite_hall_calls_after_turning() {
        let mut elevator = with_cabin_stops(10, &[6, 2]);
        elevator.add_request(Request::hall(4, Direction::Up)).unwrap();
        elevator.set_direction(Direction::Down);

        assert_eq!(visit_all(&SweepSchedulingStrategy::look(Direction::Up), &mut elevator), vec![6, 2, 4]);
    }

    #[test]
    fn sweep_passes_a_hall_call_for_the_other_way_at_the_current_floor() {
        let mut elevator = with_cabin_stops(4, &[2]);
        elevator.add_request(Request::hall(4, Direction::Up)).unwrap();
        elevator.set_direction(Direction::Down);
        let strategy = SweepSchedulingStrategy::look(Direction::Up);

        assert_eq!(strategy.get_next_stop(&mut elevator), 2);
        assert_eq!(elevator.direction(), Direction::Down);
        assert_eq!(visit_all(&strategy, &mut elevator), vec![2, 4]);
    }

    #[test]
    fn sweep_answers_the_current_floor_right_after_turning() {
        let mut elevator = with_cabin_stops(4, &[9]);
        elevator.add_request(Request::hall(4, Direction::Up)).unwrap();
        elevator.set_direction(Direction::Down);

        assert_eq!(SweepSchedulingStrategy::look(Direction::Up).get_next_stop(&mut elevator), 4);
        assert_eq!(elevator.direction(), Direction::Up);
    }

    #[test]
    fn sweep_runs_out_to_the_farthest_opposite_hall_call() {
        let mut elevator = elevator_at(2);
        elevator.add_request(Request::hall(5, Direction::Down)).unwrap();
        elevator.add_request(Request::hall(8, Direction::Down)).unwrap();
        elevator.set_direction(Direction::Up);

        assert_eq!(visit_all(&SweepSchedulingStrategy::scan(Direction::Up), &mut elevator), vec![8, 5]);
    }

    #[test]
    fn sweep_never_turns_while_work_remains_ahead() {
        let mut rng = StdRng::seed_from_u64(4145);
        let strategy = SweepSchedulingStrategy::scan(Direction::Up);

        for _ in 0..50 {
            let start = rng.random_range(0..20);
            let stops: Vec<Floor> = (0..rng.random_range(1..8)).map(|_| rng.random_range(0..20)).collect();
            let mut elevator = with_cabin_stops(start, &stops);
            elevator.set_direction(Direction::Up);

            let visited = visit_all(&strategy, &mut elevator);

            let mut above: Vec<Floor> = stops.iter().copied().filter(|floor| *floor >= start).collect();
            above.sort();
            above.dedup();
            let mut below: Vec<Floor> = stops.iter().copied().filter(|floor| *floor < start).collect();
            below.sort_by(|a, b| b.cmp(a));
            below.dedup();
            let expected: Vec<Floor> = above.into_iter().chain(below).collect();

            assert_eq!(visited, expected, "start {start}, stops {stops:?}");
        }
    }

    #[test]
    fn every_strategy_drains_random_queues() {
        let mut rng = StdRng::seed_from_u64(27);

        for strategy_type in [SchedulingStrategyType::Fcfs, SchedulingStrategyType::Scan, SchedulingStrategyType::Look] {
            let strategy = strategy_type.get_instance(Direction::Up);
            for _ in 0..25 {
                let mut elevator = elevator_at(rng.random_range(0..20));
                for _ in 0..rng.random_range(1..10) {
                    let floor = rng.random_range(0..20);
                    let request = if rng.random_bool(0.5) {
                        Request::cabin(ID, floor, Direction::Idle)
                    } else {
                        Request::hall(floor, if rng.random_bool(0.5) { Direction::Up } else { Direction::Down })
                    };
                    elevator.add_request(request).unwrap();
                }

                visit_all(strategy.as_ref(), &mut elevator);

                assert_eq!(elevator.state(), ElevatorState::Idle, "{strategy_type}");
                assert_eq!(elevator.direction(), Direction::Idle, "{strategy_type}");
            }
        }
    }

    #[test]
    fn strategy_names_parse_case_insensitively() {
        assert_eq!("fcfs".parse::<SchedulingStrategyType>(), Ok(SchedulingStrategyType::Fcfs));
        assert_eq!("Scan".parse::<SchedulingStrategyType>(), Ok(SchedulingStrategyType::Scan));
        assert_eq!("LOOK".parse::<SchedulingStrategyType>(), Ok(SchedulingStrategyType::Look));
        assert_eq!(
            "elevator-algorithm".parse::<SchedulingStrategyType>(),
            Err(ConversionError::UnknownSchedulingStrategy("elevator-algorithm".to_string()))
        );
    }

    #[test]
    fn factory_builds_the_named_strategy() {
        for strategy_type in [SchedulingStrategyType::Fcfs, SchedulingStrategyType::Scan, SchedulingStrategyType::Look] {
            assert_eq!(strategy_type.get_instance(Direction::Up).name(), strategy_type.name());
        }
    }

    #[test]
    fn strategy_slot_swaps_for_every_clone() {
        let slot = StrategySlot::new(Arc::new(FcfsSchedulingStrategy::new()));
        let shared = slot.clone();

        let previous = slot.replace(SchedulingStrategyType::Look.get_instance(Direction::Up));

        assert_eq!(previous.name(), "FCFS");
        assert_eq!(shared.name(), "LOOK");
    }
}
