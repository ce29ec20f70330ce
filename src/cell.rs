use thiserror::Error;

use crate::shape::Orientation;

/// Most parallel cable units a single bridge may carry.
pub const MAX_UNITS: u8 = 2;

/// Errors raised by tile mutators guarding their value ranges.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum TileError {
    /// A cable tile was assigned more units than a bridge can carry.
    #[error("a cable carries at most 2 units, got {0}")]
    UnitsOutOfRange(u8),
}

/// A puzzle node declaring how many cable units must end on it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ComponentTile {
    pub target_connections: u8,
    /// Written by [`PuzzleState::verify`](crate::PuzzleState::verify) only.
    pub correctly_connected: bool,
    /// Display-only artwork index.
    pub variant: u8,
}

impl ComponentTile {
    pub const fn new(target_connections: u8) -> Self {
        Self {
            target_connections,
            correctly_connected: false,
            variant: 0,
        }
    }
}

/// A grid cell that may carry part of a bridge.
///
/// `orientation` only means something while `units` is non-zero.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CableTile {
    pub orientation: Orientation,
    units: u8,
    /// Display-only artwork index.
    pub variant: u8,
}

impl CableTile {
    /// A cable tile carrying `units` parallel cables along `orientation`.
    ///
    /// Fails with [`TileError::UnitsOutOfRange`] if `units` exceeds [`MAX_UNITS`].
    pub fn new(units: u8, orientation: Orientation) -> Result<Self, TileError> {
        let mut tile = Self {
            orientation,
            ..Self::default()
        };
        tile.set_units(units)?;
        Ok(tile)
    }

    /// A cable tile with no cables on it.
    pub const fn blank() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            units: 0,
            variant: 0,
        }
    }

    pub const fn units(&self) -> u8 {
        self.units
    }

    pub fn set_units(&mut self, units: u8) -> Result<(), TileError> {
        if units > MAX_UNITS {
            return Err(TileError::UnitsOutOfRange(units));
        }
        self.units = units;
        Ok(())
    }

    /// Add one unit unless already full. Returns whether anything changed.
    pub fn increase(&mut self) -> bool {
        if self.units < MAX_UNITS {
            self.units += 1;
            true
        } else {
            false
        }
    }

    /// Remove one unit unless already empty. Returns whether anything changed.
    pub fn decrease(&mut self) -> bool {
        if self.units > 0 {
            self.units -= 1;
            true
        } else {
            false
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.units == 0
    }

    /// Whether this tile holds cable running along `orientation`.
    pub fn carries(&self, orientation: Orientation) -> bool {
        self.units > 0 && self.orientation == orientation
    }
}

/// The content of a single board cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Tile {
    Component(ComponentTile),
    Cable(CableTile),
}

impl Default for Tile {
    fn default() -> Self {
        Self::Cable(CableTile::blank())
    }
}

impl Tile {
    pub const fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }

    pub const fn is_cable(&self) -> bool {
        matches!(self, Self::Cable(_))
    }

    pub const fn as_component(&self) -> Option<&ComponentTile> {
        match self {
            Self::Component(component) => Some(component),
            Self::Cable(_) => None,
        }
    }

    pub const fn as_cable(&self) -> Option<&CableTile> {
        match self {
            Self::Cable(cable) => Some(cable),
            Self::Component(_) => None,
        }
    }

    pub fn as_cable_mut(&mut self) -> Option<&mut CableTile> {
        match self {
            Self::Cable(cable) => Some(cable),
            Self::Component(_) => None,
        }
    }

    pub fn as_component_mut(&mut self) -> Option<&mut ComponentTile> {
        match self {
            Self::Component(component) => Some(component),
            Self::Cable(_) => None,
        }
    }

    /// The cable units this tile contributes when approached along `orientation`.
    pub(crate) fn units_along(&self, orientation: Orientation) -> u8 {
        match self {
            Self::Cable(cable) if cable.carries(orientation) => cable.units,
            _ => 0,
        }
    }

    /// The blank copy handed to a player: no cables placed, no component marked.
    pub(crate) fn unwired(&self) -> Self {
        match *self {
            Self::Component(component) => Self::Component(ComponentTile {
                correctly_connected: false,
                ..component
            }),
            Self::Cable(cable) => Self::Cable(CableTile { units: 0, ..cable }),
        }
    }
}
