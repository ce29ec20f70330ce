#![warn(missing_docs)]

//! # `hashiwoka`
//!
//! A generator and rule engine for [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero) ("bridges")
//! puzzles played on a square grid of components and cables.
//! Begin by growing a solved [`Board`] with a [`BoardGenerator`], then hand it to a [`PuzzleState`], which
//! derives the blank board a player wires up through [`PuzzleState::connect`] and friends.
//! [`PuzzleState::verify`] checks the wiring.
//!
//! # Rules
//! A component asks for a number of cable units to end on it. Cables run straight along a row or a column between
//! two components, at most two parallel units per bridge, and bridges never cross.
//! Components never sit directly next to each other, so every bridge occupies at least one cell.
//!
//! # Generation
//! Boards are grown outward from a single component:
//! 1. Pick a placed component at random and shuffle the four directions.
//! 2. Along the first direction that is free, lay a cable of random width that keeps going with even odds and
//! stops early on anything already placed.
//! 3. Walk back from the far end of that cable to the first cell with no neighboring component and put the new
//! component there, trimming the cable to fit.
//! 4. If no direction works, pick another component.
//!
//! Each component's target is the sum of the cable units running into it, so the result is solved and its
//! bridges link every component. Generation is driven by a seeded [`rand::rngs::SmallRng`], so a seed and a
//! component count reproduce a board exactly.

pub use board::{Board, ParseBoardError};
pub use cell::{CableTile, ComponentTile, Tile, TileError, MAX_UNITS};
pub use generator::{BoardGenerator, GenerationError, DEFAULT_MAX_ORIGIN_ATTEMPTS};
pub use location::{Coord, Location};
pub use shape::{Direction, Orientation};
pub use state::PuzzleState;

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod generator;
pub(crate) mod location;
pub(crate) mod shape;
pub(crate) mod state;
mod tests;
