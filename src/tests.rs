#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;
    use rstest::rstest;

    use crate::board::Board;
    use crate::cell::Tile;
    use crate::generator::BoardGenerator;
    use crate::location::Location;
    use crate::shape::Direction;
    use crate::state::PuzzleState;

    fn assert_well_formed(board: &Board, components: usize) {
        let placed = board.components().collect_vec();
        assert_eq!(placed.len(), components);

        for (location, component) in placed {
            assert!(
                location.neighbors().all(|(_, neighbor)| !board.get(neighbor).is_some_and(Tile::is_component)),
                "component at {location} touches another one\n{board}"
            );
            assert!((1..=8).contains(&component.target_connections), "bad target at {location}\n{board}");
            assert_eq!(
                board.adjacent_cable_units(location),
                component.target_connections,
                "component at {location} does not match its cables\n{board}"
            );
        }

        assert!(board.is_connected(), "bridges do not link every component\n{board}");
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(10)]
    #[case(40)]
    #[case(120)]
    fn generated_boards_are_solved(#[case] components: usize) {
        for seed in 0..10 {
            let board = BoardGenerator::with_seed(seed).generate(components).unwrap();
            assert_well_formed(&board, components);
        }
    }

    #[test]
    fn generated_board_round_trips_through_notation() {
        let board = BoardGenerator::with_seed(2024).generate(25).unwrap();
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(format!("{}", parsed), format!("{}", board));
        assert_well_formed(&parsed, 25);
    }

    #[test]
    fn two_component_puzzle_plays_through() {
        let mut state = PuzzleState::generate(2, Some(17)).unwrap();
        let ends = state.board().components().map(|(location, _)| location).collect_vec();
        let (a, b) = (ends[0], ends[1]);
        let width = state.solution().components().next().unwrap().1.target_connections;
        let between = a.direction_to(b).unwrap();
        let first_cable = a.adjacent(between);

        assert!(!state.verify());

        assert!(state.connect(a, b));
        assert!(state.connect(b, a));
        assert_eq!(state.tile(first_cable).and_then(Tile::as_cable).unwrap().units(), 2);
        assert!(!state.connect(a, b));
        assert_eq!(state.tile(first_cable).and_then(Tile::as_cable).unwrap().units(), 2);

        let run = state.full_bridge_at(first_cable);
        assert_eq!(run.len(), state.height() * state.width() - 2);
        assert_eq!(state.verify(), width == 2);

        if width == 1 {
            state.decrease_bridge_at(first_cable);
            assert!(state.verify());
        }
        assert!(state.is_connected());
    }

    #[test]
    fn revealed_generated_solution_verifies() {
        let mut state = PuzzleState::generate(30, Some(8)).unwrap();
        assert!(!state.verify());
        assert!(state.board().components().all(|(_, component)| !component.correctly_connected));

        state.reveal_solution();
        assert!(state.verify());
        assert!(state.board().components().all(|(_, component)| component.correctly_connected));
        assert!(state.is_connected());
    }

    #[test]
    fn every_solution_bridge_can_be_rebuilt() {
        let mut state = PuzzleState::generate(20, Some(99)).unwrap();
        let bridges = state
            .solution()
            .bridge_graph()
            .all_edges()
            .map(|(a, b, units)| (a, b, *units))
            .collect_vec();

        for (a, b, units) in bridges {
            for _ in 0..units {
                assert!(state.connect(a, b), "could not lay {a} -> {b}\n{}", state.board());
            }
        }

        assert_eq!(state.board(), state.solution());
        assert!(state.verify());
    }

    #[test]
    fn removing_a_bridge_breaks_verification() {
        let mut state = PuzzleState::generate(8, Some(4)).unwrap();
        state.reveal_solution();
        let cable = state
            .board()
            .locations()
            .find(|location| !state.full_bridge_at(*location).is_empty())
            .unwrap();
        let run = state.full_bridge_at(cable);

        assert!(state.remove_bridge_at(cable));
        assert!(run.iter().all(|location| state.full_bridge_at(*location).is_empty()));
        assert!(!state.verify());
        assert!(state.board().components().any(|(_, component)| !component.correctly_connected));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn any_seed_yields_a_consistent_board(seed in any::<u64>(), components in 2usize..60) {
            let board = BoardGenerator::with_seed(seed).generate(components).unwrap();
            assert_well_formed(&board, components);
            prop_assert_eq!(board, BoardGenerator::with_seed(seed).generate(components).unwrap());
        }

        #[test]
        fn bridge_runs_are_maximal(seed in any::<u64>(), components in 2usize..30) {
            let mut state = PuzzleState::generate(components, Some(seed)).unwrap();
            state.reveal_solution();

            for location in state.board().locations().collect_vec() {
                let run = state.full_bridge_at(location);
                let Some(Tile::Cable(cable)) = state.tile(location) else {
                    prop_assert!(run.is_empty());
                    continue;
                };
                if cable.is_empty() {
                    prop_assert!(run.is_empty());
                    continue;
                }

                prop_assert!(run.contains(&location));
                let orientation = cable.orientation;
                for tile in run.iter().filter_map(|at| state.tile(*at)) {
                    prop_assert!(matches!(tile, Tile::Cable(c) if c.carries(orientation)));
                }

                // a bridge always ends on components
                let [forward, backward] = Direction::for_orientation(orientation);
                let ends = [run.first().map(|at| at.adjacent(forward)), run.last().map(|at| at.adjacent(backward))];
                for end in ends.into_iter().flatten() {
                    prop_assert!(state.tile(end).is_some_and(Tile::is_component), "{:?} ends at {}", run, end);
                }
            }
        }
    }

    #[test]
    fn fresh_state_reports_every_component_unsatisfied() {
        let mut state = PuzzleState::generate(15, Some(31)).unwrap();
        state.verify();
        let unsatisfied = state.board().components().filter(|(_, c)| !c.correctly_connected).count();
        assert_eq!(unsatisfied, 15);
        assert!(state.in_bounds(Location(0, 0)));
        assert!(!state.in_bounds(Location(0, -1)));
    }
}
