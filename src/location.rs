use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::shape::Direction;

pub type Coord = i32;

/// A grid position as `(row, col)`, rows growing south and columns growing east.
///
/// Coordinates may be negative while a board is still being grown; finished [`Board`](crate::Board)s only contain
/// locations with a non-negative origin.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    pub const fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    pub const fn col(&self) -> Coord {
        self.1
    }

    pub(crate) fn offset_by(self, rhs: (Coord, Coord)) -> Self {
        Self(self.0.wrapping_add(rhs.0), self.1.wrapping_add(rhs.1))
    }

    /// The neighboring location one step away in `direction`.
    pub fn adjacent(self, direction: Direction) -> Self {
        direction.attempt_from(self)
    }

    /// The four neighbors of this location, paired with the direction leading to each.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Location)> {
        Direction::all().map(move |dir| (dir, self.adjacent(dir)))
    }

    /// The direction travelled from `self` to reach `other`.
    ///
    /// Returns [`None`] if both locations are equal or if they share neither a row nor a column.
    pub fn direction_to(self, other: Location) -> Option<Direction> {
        if self == other {
            return None;
        }

        if self.1 == other.1 {
            return Some(match self.0.cmp(&other.0) {
                Ordering::Less => Direction::South,
                _ => Direction::North,
            });
        }

        if self.0 == other.0 {
            return Some(match self.1.cmp(&other.1) {
                Ordering::Less => Direction::East,
                _ => Direction::West,
            });
        }

        None
    }

    /// Convert to an `(row, col)` array index, if neither coordinate is negative.
    pub(crate) fn as_index(&self) -> Option<(usize, usize)> {
        Some((usize::try_from(self.0).ok()?, usize::try_from(self.1).ok()?))
    }

    pub(crate) fn from_index(index: (usize, usize)) -> Option<Self> {
        Some(Self(Coord::try_from(index.0).ok()?, Coord::try_from(index.1).ok()?))
    }
}

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
