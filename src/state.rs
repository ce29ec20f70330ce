use itertools::Itertools;
use tracing::trace;

use crate::board::Board;
use crate::cell::{CableTile, Tile, MAX_UNITS};
use crate::generator::{BoardGenerator, GenerationError};
use crate::location::Location;
use crate::shape::Direction;

/// A puzzle in progress: the generated solution plus the board the player wires up.
///
/// The solution is never modified. All moves go through `&mut self`, so a reader can never see a move half
/// applied.
#[derive(Clone, Debug)]
pub struct PuzzleState {
    board: Board,
    solution: Board,
}

impl PuzzleState {
    /// Start a puzzle from a solved board. The player board keeps every component and cable position but
    /// carries no cables yet.
    pub fn new(solution: Board) -> Self {
        let board = Board::new(solution.tiles().map(Tile::unwired));
        Self { board, solution }
    }

    /// Generate a fresh puzzle with `components` components, reproducibly if a `seed` is given.
    pub fn generate(components: usize, seed: Option<u64>) -> Result<Self, GenerationError> {
        let mut generator = seed.map_or_else(BoardGenerator::new, BoardGenerator::with_seed);
        Ok(Self::new(generator.generate(components)?))
    }

    /// The board the player is working on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn solution(&self) -> &Board {
        &self.solution
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        self.board.in_bounds(location)
    }

    pub fn tile(&self, location: Location) -> Option<&Tile> {
        self.board.get(location)
    }

    /// Overwrite the player board with a copy of the solution.
    pub fn reveal_solution(&mut self) {
        self.board = self.solution.clone();
    }

    /// Lay one more cable between the components at `a` and `b`.
    ///
    /// Nothing happens, and `false` is returned, if the two locations are not both components, do not share a
    /// row or column, are separated by another component, or if any cell between them is already full or
    /// holds a crossing bridge. Otherwise every cell between them gains a unit, up to two.
    pub fn connect(&mut self, a: Location, b: Location) -> bool {
        let Some(direction) = b.direction_to(a) else {
            return false;
        };
        if ![a, b].iter().all(|end| self.board.get(*end).is_some_and(Tile::is_component)) {
            return false;
        }

        let Some(path) = self.path_between(b, a, direction) else {
            trace!(%a, %b, "connection blocked");
            return false;
        };

        let mut changed = false;
        for location in path {
            if let Some(cable) = self.board.cable_mut(location) {
                changed |= cable.increase();
                cable.orientation = direction.orientation();
            }
        }
        changed
    }

    /// The cable cells walked from `from` towards `to`, if a new cable may be laid over all of them.
    fn path_between(&self, from: Location, to: Location, direction: Direction) -> Option<Vec<Location>> {
        let orientation = direction.orientation();
        let mut path = Vec::new();
        let mut current = from.adjacent(direction);

        while let Some(cable) = self.board.cable(current) {
            if cable.units() == MAX_UNITS || (!cable.is_empty() && cable.orientation != orientation) {
                return None;
            }
            path.push(current);
            current = current.adjacent(direction);
        }

        (current == to && !path.is_empty()).then_some(path)
    }

    /// The whole bridge running through `location`, listed from its north or east end.
    ///
    /// Empty if `location` is not a cable or carries no cable.
    pub fn full_bridge_at(&self, location: Location) -> Vec<Location> {
        let Some(cable) = self.board.cable(location).filter(|cable| !cable.is_empty()) else {
            return Vec::new();
        };
        let orientation = cable.orientation;
        let [forward, backward] = Direction::for_orientation(orientation);
        let in_run = |at: Location| self.board.cable(at).is_some_and(|c| c.carries(orientation));

        let mut start = location;
        while in_run(start.adjacent(forward)) {
            start = start.adjacent(forward);
        }

        std::iter::successors(Some(start), |at| Some(at.adjacent(backward)))
            .take_while(|at| in_run(*at))
            .collect_vec()
    }

    /// Take one unit off the whole bridge through `location`. Returns whether anything changed.
    pub fn decrease_bridge_at(&mut self, location: Location) -> bool {
        self.update_bridge_at(location, |cable| {
            cable.decrease();
        })
    }

    /// Take the whole bridge through `location` off the board. Returns whether anything changed.
    pub fn remove_bridge_at(&mut self, location: Location) -> bool {
        self.update_bridge_at(location, |cable| while cable.decrease() {})
    }

    fn update_bridge_at(&mut self, location: Location, update: impl Fn(&mut CableTile)) -> bool {
        let run = self.full_bridge_at(location);
        for at in &run {
            if let Some(cable) = self.board.cable_mut(*at) {
                update(cable);
            }
        }
        !run.is_empty()
    }

    /// Check every component against the cables currently running into it, marking each one's
    /// `correctly_connected` flag. Returns whether all of them are satisfied.
    ///
    /// This does not compare against the stored solution since other wirings may satisfy all targets too.
    pub fn verify(&mut self) -> bool {
        let locations = self.board.components().map(|(location, _)| location).collect_vec();

        let mut all_satisfied = true;
        for location in locations {
            let units = self.board.adjacent_cable_units(location);
            if let Some(component) = self.board.get_mut(location).and_then(Tile::as_component_mut) {
                component.correctly_connected = units == component.target_connections;
                all_satisfied &= component.correctly_connected;
            }
        }
        all_satisfied
    }

    /// Whether the bridges on the player board link all components into one group.
    pub fn is_connected(&self) -> bool {
        self.board.is_connected()
    }
}
