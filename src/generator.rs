use std::collections::HashMap;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use rand::prelude::*;
use strum::VariantArray;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::board::{units_towards, Board};
use crate::cell::{CableTile, ComponentTile, Tile};
use crate::location::Location;
use crate::shape::Direction;

/// Chance that a growing cable takes one more step.
const CONTINUE_CABLE_PROBABILITY: f64 = 0.5;

/// Default cap on consecutive origins that fail to sprout a new component, see
/// [`BoardGenerator::with_max_origin_attempts`].
pub const DEFAULT_MAX_ORIGIN_ATTEMPTS: usize = 10_000;

/// Reasons a [`BoardGenerator`] may fail.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum GenerationError {
    /// Fewer than two components were requested.
    #[error("a board needs at least 2 components, {0} requested")]
    TooFewComponents(usize),
    /// Too many origins in a row could not be extended.
    /// The growth rule always leaves an outward direction free on the outermost components, so this
    /// should only be seen with a deliberately tiny attempt cap.
    #[error("gave up after placing {placed} of {requested} components")]
    Exhausted { placed: usize, requested: usize },
}

/// Randomly grows solved puzzles from a seeded pseudorandom stream.
///
/// Two generators built with the same seed produce the same sequence of boards.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    seed: u64,
    rng: SmallRng,
    max_origin_attempts: usize,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGenerator {
    /// A generator seeded from the thread-local RNG. Use [`Self::seed`] to find out which seed was drawn.
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            max_origin_attempts: DEFAULT_MAX_ORIGIN_ATTEMPTS,
        }
    }

    /// Give up with [`GenerationError::Exhausted`] once `attempts` randomly chosen origins in a row fail to
    /// take a new component.
    pub fn with_max_origin_attempts(mut self, attempts: usize) -> Self {
        self.max_origin_attempts = attempts;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a solved board holding exactly `components` components.
    ///
    /// Starting from a lone component, repeatedly pick a placed component at random and run a cable of random
    /// width and length from it to a new component. The resulting bridge graph is always connected.
    #[instrument(level = "debug", skip(self), fields(seed = self.seed))]
    pub fn generate(&mut self, components: usize) -> Result<Board, GenerationError> {
        if components < 2 {
            return Err(GenerationError::TooFewComponents(components));
        }

        let mut sketch = Sketch::new();
        while sketch.components.len() < components {
            sketch.place_component(&mut self.rng, self.max_origin_attempts, components)?;
        }

        let board = sketch.finish();
        debug!(height = board.height(), width = board.width(), "generated board");
        Ok(board)
    }
}

/// A board under construction, unbounded in every direction.
struct Sketch {
    tiles: HashMap<Location, Tile>,
    // placement order, so origin choice does not depend on hash order
    components: Vec<Location>,
}

impl Sketch {
    fn new() -> Self {
        let origin = Location(0, 0);
        Self {
            tiles: HashMap::from([(origin, Tile::Component(ComponentTile::new(0)))]),
            components: vec![origin],
        }
    }

    fn place_component<R: Rng>(&mut self, rng: &mut R, max_attempts: usize, requested: usize) -> Result<(), GenerationError> {
        for _ in 0..max_attempts {
            let Some(&origin) = self.components.choose(rng) else {
                break;
            };

            if let Some(placed) = self.try_extend(origin, rng) {
                debug!(%origin, %placed, count = self.components.len(), "placed component");
                return Ok(());
            }
            trace!(%origin, "no room around origin");
        }

        Err(GenerationError::Exhausted {
            placed: self.components.len(),
            requested,
        })
    }

    /// Try to run a new bridge out of `origin`, returning where the new component landed.
    fn try_extend<R: Rng>(&mut self, origin: Location, rng: &mut R) -> Option<Location> {
        let mut directions = Direction::VARIANTS.to_vec();
        directions.shuffle(rng);

        for direction in directions {
            let start = origin.adjacent(direction);
            if self.tiles.contains_key(&start) {
                // linked already on this side, or a cable passes right next to the origin
                continue;
            }

            let units = rng.random_range(1..=2);
            let mut run = vec![start];
            let mut current = start;
            loop {
                current = current.adjacent(direction);
                if self.tiles.contains_key(&current) {
                    break;
                }
                run.push(current);
                if !rng.random_bool(CONTINUE_CABLE_PROBABILITY) {
                    break;
                }
            }

            // back off from the far end until the component fits
            while let Some(candidate) = run.pop() {
                if !self.is_component_placeable_at(candidate) {
                    continue;
                }
                let Ok(cable) = CableTile::new(units, direction.orientation()) else {
                    break;
                };

                self.tiles.extend(run.iter().map(|location| (*location, Tile::Cable(cable))));
                self.set_component(candidate);
                self.set_component(origin);
                self.components.push(candidate);
                return Some(candidate);
            }
            trace!(%origin, ?direction, "no legal spot along cable");
        }

        None
    }

    /// Components may not touch each other.
    fn is_component_placeable_at(&self, location: Location) -> bool {
        location
            .neighbors()
            .all(|(_, neighbor)| !self.tiles.get(&neighbor).is_some_and(Tile::is_component))
    }

    /// (Re)place a component at `location` whose target matches the cables now running into it.
    fn set_component(&mut self, location: Location) {
        let target = units_towards(location, |neighbor| self.tiles.get(&neighbor));
        self.tiles.insert(location, Tile::Component(ComponentTile::new(target)));
    }

    /// Crop to the bounding box, moving its top-left corner to `(0, 0)`, and fill the gaps with blank cables.
    fn finish(self) -> Board {
        let (min_row, max_row) = self.tiles.keys().map(Location::row).minmax().into_option().unwrap_or((0, 0));
        let (min_col, max_col) = self.tiles.keys().map(Location::col).minmax().into_option().unwrap_or((0, 0));
        let height = max_row.abs_diff(min_row) as usize + 1;
        let width = max_col.abs_diff(min_col) as usize + 1;

        let mut grid = Array2::from_elem((height, width), Tile::default());
        for (location, tile) in self.tiles {
            let shifted = location.offset_by((-min_row, -min_col));
            if let Some(cell) = shifted.as_index().and_then(|index| grid.get_mut(index)) {
                cell.assign_elem(tile);
            }
        }

        Board::new(grid)
    }
}
