use strum::VariantArray;

use crate::location::Location;

/// The axis a bridge runs along.
#[derive(Copy, Clone, VariantArray, Default, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub const fn perpendicular(&self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// The four compass directions of the square grid.
///
/// North and south are [`Vertical`](Orientation::Vertical), east and west are [`Horizontal`](Orientation::Horizontal).
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Iterate all directions in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::VARIANTS.iter().copied()
    }

    /// The two directions along `orientation`, in declaration order.
    pub const fn for_orientation(orientation: Orientation) -> [Self; 2] {
        match orientation {
            Orientation::Horizontal => [Self::East, Self::West],
            Orientation::Vertical => [Self::North, Self::South],
        }
    }

    pub const fn orientation(&self) -> Orientation {
        match self {
            Self::North | Self::South => Orientation::Vertical,
            Self::East | Self::West => Orientation::Horizontal,
        }
    }

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((-1, 0)),
            Self::East => location.offset_by((0, 1)),
            Self::South => location.offset_by((1, 0)),
            Self::West => location.offset_by((0, -1)),
        }
    }

    /// Invert the direction specified by `self`.
    pub const fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}
