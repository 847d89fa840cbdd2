use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Side length of the board when nothing else is configured.
pub const DEFAULT_SIZE: Coord = 10;

/// Square grid of cells. Pure storage, no game rules.
///
/// Coordinate accessors treat out-of-range input as a caller bug and panic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Cell>", into = "Array2<Cell>")]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
}

impl Board {
    /// Allocates a `size`×`size` board, all cells empty and hidden.
    pub fn new(size: Coord) -> Result<Self> {
        if size == 0 {
            log::warn!("Rejected board of size 0");
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            cells: Array2::default((size, size).to_nd_index()),
            size,
        })
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        x < self.size && y < self.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn state_at(&self, coords: Coord2) -> CellState {
        self[coords].state
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn set_state(&mut self, coords: Coord2, state: CellState) {
        self[coords].state = state;
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self[coords].revealed
    }

    /// # Panics
    ///
    /// If `coords` is outside the board.
    pub fn set_revealed(&mut self, coords: Coord2, revealed: bool) {
        self[coords].revealed = revealed;
    }

    /// Snapshot of every cell, in no particular order.
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn unrevealed_count(&self) -> CellCount {
        let hidden = self.all_cells().filter(|cell| !cell.revealed).count();
        // bounded by `square(Coord::MAX)`
        hidden as CellCount
    }

    pub fn hazard_count(&self) -> CellCount {
        let hazards = self.all_cells().filter(|cell| cell.state.is_hazard()).count();
        hazards as CellCount
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// All coordinates, row by row.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: Array2::default((DEFAULT_SIZE, DEFAULT_SIZE).to_nd_index()),
            size: DEFAULT_SIZE,
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        assert!(
            self.contains(coords),
            "coordinates {coords:?} out of bounds for board of size {}",
            self.size
        );
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        assert!(
            self.contains(coords),
            "coordinates {coords:?} out of bounds for board of size {}",
            self.size
        );
        &mut self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Array2<Cell>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(GameError::InvalidBoardShape);
        }
        let size = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self { cells, size })
    }
}

impl From<Board> for Array2<Cell> {
    fn from(board: Board) -> Self {
        board.cells
    }
}
