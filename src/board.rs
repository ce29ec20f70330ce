use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::{Array2, ShapeError};
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use thiserror::Error;

use crate::cell::{CableTile, ComponentTile, Tile};
use crate::location::Location;
use crate::shape::{Direction, Orientation};

/// Reasons the text notation of a board may fail to parse.
#[derive(Debug, Error)]
pub enum ParseBoardError {
    /// The input held no non-blank lines.
    #[error("a board needs at least one row")]
    Empty,
    /// A row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    /// A character outside the board notation.
    #[error("unexpected character {found:?} at row {row}, column {col}")]
    UnexpectedChar { found: char, row: usize, col: usize },
    /// The parsed cells could not be arranged into a grid.
    #[error("cells do not form a grid: {0}")]
    Shape(#[from] ShapeError),
}

/// A dense rectangular grid of [`Tile`]s, indexed by `(row, col)` from the top-left corner.
///
/// Boards come out of a [`BoardGenerator`](crate::BoardGenerator) as finished solutions; a
/// [`PuzzleState`](crate::PuzzleState) derives the blank board a player works on from them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    pub(crate) fn new(tiles: Array2<Tile>) -> Self {
        debug_assert!(!tiles.is_empty(), "boards hold at least one tile");
        Self { tiles }
    }

    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Whether `location` lies on this board.
    pub fn in_bounds(&self, location: Location) -> bool {
        location
            .as_index()
            .is_some_and(|(row, col)| row < self.height() && col < self.width())
    }

    /// The tile at `location`, or [`None`] if it is off the board.
    pub fn get(&self, location: Location) -> Option<&Tile> {
        self.tiles.get(location.as_index()?)
    }

    pub(crate) fn get_mut(&mut self, location: Location) -> Option<&mut Tile> {
        self.tiles.get_mut(location.as_index()?)
    }

    pub(crate) fn cable(&self, location: Location) -> Option<&CableTile> {
        self.get(location).and_then(Tile::as_cable)
    }

    pub(crate) fn cable_mut(&mut self, location: Location) -> Option<&mut CableTile> {
        self.get_mut(location).and_then(Tile::as_cable_mut)
    }

    pub(crate) fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Every location on the board in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.tiles
            .indexed_iter()
            .filter_map(|(index, _)| Location::from_index(index))
    }

    /// Every component on the board with its location, in row-major order.
    pub fn components(&self) -> impl Iterator<Item = (Location, &ComponentTile)> + '_ {
        self.tiles.indexed_iter().filter_map(|(index, tile)| {
            Some((Location::from_index(index)?, tile.as_component()?))
        })
    }

    /// Sum of cable units around `location` that run towards it.
    ///
    /// A neighbor only counts if its cable orientation matches the direction leading to it, so bridges passing
    /// alongside `location` are ignored.
    pub fn adjacent_cable_units(&self, location: Location) -> u8 {
        units_towards(location, |neighbor| self.get(neighbor))
    }

    /// Follow the bridge leaving `from` towards `direction` and return the component it ends on with its width.
    fn bridge_from(&self, from: Location, direction: Direction) -> Option<(Location, u8)> {
        let orientation = direction.orientation();
        let mut current = from.adjacent(direction);
        let units = self.cable(current).filter(|cable| cable.carries(orientation))?.units();

        loop {
            match self.get(current)? {
                Tile::Component(_) => return Some((current, units)),
                Tile::Cable(cable) if cable.carries(orientation) => current = current.adjacent(direction),
                Tile::Cable(_) => return None,
            }
        }
    }

    /// The puzzle as a graph: components are nodes, bridges are edges weighted by their unit count.
    pub fn bridge_graph(&self) -> UnGraphMap<Location, u8> {
        let components = self.components().map(|(location, _)| location).collect_vec();
        let mut graph = UnGraphMap::with_capacity(components.len(), components.len() * 2);

        for location in &components {
            graph.add_node(*location);
        }

        // each bridge is found once, from its north or west end
        for location in components {
            for direction in [Direction::East, Direction::South] {
                if let Some((other, units)) = self.bridge_from(location, direction) {
                    graph.add_edge(location, other, units);
                }
            }
        }

        graph
    }

    /// Whether the placed bridges join every component into a single group.
    pub fn is_connected(&self) -> bool {
        let graph = self.bridge_graph();
        let Some(start) = graph.nodes().next() else {
            return true;
        };

        let mut dfs = Dfs::new(&graph, start);
        let mut reached = 0;
        while dfs.next(&graph).is_some() {
            reached += 1;
        }

        reached == graph.node_count()
    }
}

/// Sum the cable units pointing at `location`, looking its neighbors up through `lookup`.
pub(crate) fn units_towards<'a>(location: Location, lookup: impl Fn(Location) -> Option<&'a Tile>) -> u8 {
    location
        .neighbors()
        .filter_map(|(dir, neighbor)| Some(lookup(neighbor)?.units_along(dir.orientation())))
        .sum()
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                let symbol = match tile {
                    Tile::Component(component) => {
                        char::from_digit(u32::from(component.target_connections), 10).unwrap_or('?')
                    }
                    Tile::Cable(cable) => match (cable.units(), cable.orientation) {
                        (0, _) => '.',
                        (1, Orientation::Horizontal) => '-',
                        (_, Orientation::Horizontal) => '=',
                        (1, Orientation::Vertical) => '|',
                        (_, Orientation::Vertical) => 'H',
                    },
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn parse_tile(symbol: char) -> Option<Tile> {
    let cable = |units, orientation| CableTile::new(units, orientation).ok().map(Tile::Cable);
    match symbol {
        '.' => Some(Tile::Cable(CableTile::blank())),
        '-' => cable(1, Orientation::Horizontal),
        '=' => cable(2, Orientation::Horizontal),
        '|' => cable(1, Orientation::Vertical),
        'H' => cable(2, Orientation::Vertical),
        '1'..='8' => {
            let target = u8::try_from(symbol.to_digit(10)?).ok()?;
            Some(Tile::Component(ComponentTile::new(target)))
        }
        _ => None,
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse the notation written by [`Display`]: `.` for an empty cell, `-`/`=` for one or two horizontal
    /// cables, `|`/`H` for one or two vertical cables and `1`-`8` for components. Blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, found)| parse_tile(found).ok_or(ParseBoardError::UnexpectedChar { found, row, col }))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let width = rows.first().ok_or(ParseBoardError::Empty)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(ParseBoardError::Ragged { row, expected: width, found });
        }

        let height = rows.len();
        let tiles = Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect_vec())?;
        Ok(Self::new(tiles))
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, ParseBoardError};
    use crate::cell::Tile;
    use crate::location::Location;
    use crate::shape::Orientation;

    const CROSSING: &str = "
        .2...
        .H...
        .5-2.
        .H.|.
        .2.1.
    ";

    #[test]
    fn notation_round_trips() {
        let board: Board = CROSSING.parse().unwrap();
        assert_eq!(board.height(), 5);
        assert_eq!(board.width(), 5);
        assert_eq!(format!("{}", board), ".2...\n.H...\n.5-2.\n.H.|.\n.2.1.\n");
    }

    #[test]
    fn bounds_and_lookup() {
        let board: Board = CROSSING.parse().unwrap();
        assert!(board.in_bounds(Location(4, 4)));
        assert!(!board.in_bounds(Location(5, 0)));
        assert!(!board.in_bounds(Location(-1, 0)));
        assert_eq!(board.get(Location(0, 5)), None);
        assert!(matches!(board.get(Location(2, 1)), Some(Tile::Component(c)) if c.target_connections == 5));
        assert!(matches!(board.get(Location(3, 3)), Some(Tile::Cable(c)) if c.orientation == Orientation::Vertical));
    }

    #[test]
    fn adjacent_units_follow_orientation() {
        let board: Board = "
            .....
            -=-=-
            .2...
            .|...
            .1...
        "
        .parse()
        .unwrap();
        // the horizontal cable passing above the 2 does not touch it
        assert_eq!(board.adjacent_cable_units(Location(2, 1)), 1);
        assert_eq!(board.adjacent_cable_units(Location(4, 1)), 1);
    }

    #[test]
    fn bridge_graph_links_components() {
        let board: Board = CROSSING.parse().unwrap();
        let graph = board.bridge_graph();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edge_weight(Location(0, 1), Location(2, 1)), Some(&2));
        assert_eq!(graph.edge_weight(Location(2, 3), Location(2, 1)), Some(&1));
        assert!(board.is_connected());

        let split: Board = "
            1-1
            ...
            1-1
        "
        .parse()
        .unwrap();
        assert!(!split.is_connected());
    }

    #[test]
    fn malformed_notation_is_rejected() {
        assert!(matches!("".parse::<Board>(), Err(ParseBoardError::Empty)));
        assert!(matches!("1.\n...".parse::<Board>(), Err(ParseBoardError::Ragged { row: 1, .. })));
        assert!(matches!(
            "1.x".parse::<Board>(),
            Err(ParseBoardError::UnexpectedChar { found: 'x', row: 0, col: 2 })
        ));
        assert!(matches!("9".parse::<Board>(), Err(ParseBoardError::UnexpectedChar { found: '9', .. })));
    }
}
