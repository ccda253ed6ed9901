use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells, stored row-major in a single flat vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: Coord2,
    mine_count: CellCount,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct RawBoard {
    size: Coord2,
    mine_count: CellCount,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    /// Rebuilds the layout from the mine cells and checks every stored cell
    /// against it, keeping only the open and flag state from the input.
    fn try_from(raw: RawBoard) -> Result<Self> {
        let (rows, cols) = raw.size;
        if raw.cells.len() != usize::from(rows) * usize::from(cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let mines: Vec<Coord2> = raw
            .cells
            .iter()
            .filter(|cell| cell.has_mine())
            .map(Cell::coords)
            .collect();
        let board = Self::from_mine_coords(raw.size, &mines)?;
        if board.mine_count != raw.mine_count {
            return Err(GameError::InvalidBoardShape);
        }

        let consistent = board.cells.iter().zip(&raw.cells).all(|(expected, cell)| {
            expected.coords() == cell.coords()
                && expected.neighbor_mine_count() == cell.neighbor_mine_count()
        });
        if !consistent {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            cells: raw.cells,
            ..board
        })
    }
}

impl Board {
    fn empty(size: Coord2) -> Self {
        let (rows, cols) = size;
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new((row, col))))
            .collect();
        Self {
            size,
            mine_count: 0,
            cells,
        }
    }

    /// Builds a board for `config`, sampling mine positions with `rng`.
    ///
    /// Every `mines`-sized subset of the grid is equally likely: all coordinates
    /// are shuffled with Fisher-Yates and the first `mines` of them are taken.
    pub fn prepare<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let (rows, cols) = config.size();
        let mut positions: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect();

        for i in (1..positions.len()).rev() {
            let j = rng.random_range(0..=i);
            positions.swap(i, j);
        }

        let mines = usize::from(config.mines());
        debug_assert!(mines < positions.len(), "config leaves no safe cell");
        positions.truncate(mines);

        let board = Self::with_mines(config.size(), &positions);
        log::trace!("Prepared board:\n{}", board.layout());
        board
    }

    /// Builds a board with mines at exactly the given coordinates.
    ///
    /// Duplicate coordinates are counted once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardSize);
        }
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
        }

        let board = Self::with_mines(size, mine_coords);
        if board.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    /// Marks mines then fills in the neighbor counts of every safe cell.
    pub(crate) fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Self {
        let mut board = Self::empty(size);

        for &coords in mine_coords {
            let cell = board.cell_mut(coords);
            if !cell.has_mine() {
                cell.place_mine();
                board.mine_count += 1;
            }
        }

        for index in 0..board.cells.len() {
            let cell = board.cells[index];
            if !cell.has_mine() {
                let count = board.adjacent_mine_count(cell.coords());
                board.cells[index].set_neighbor_mine_count(count);
            }
        }

        board
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn cols(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Position of `coords` in the flat cell vector, `row * cols + col`.
    pub fn index_of(&self, coords: Coord2) -> Option<usize> {
        let (row, col) = self.validate_coords(coords).ok()?;
        Some(usize::from(row) * usize::from(self.size.1) + usize::from(col))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.index_of(coords).map(|index| &self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells grouped by row, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.size.1).max(1))
    }

    pub fn neighbor_coords(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// The up to 8 cells around `coords`, in row-major order.
    pub fn neighbors(&self, coords: Coord2) -> impl Iterator<Item = &Cell> {
        self.neighbor_coords(coords).map(|pos| &self[pos])
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|cell| cell.has_mine())
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }

    /// Diagnostic rendering of the mine layout, `*` for mines and the neighbor
    /// count everywhere else.
    pub fn layout(&self) -> LayoutDisplay<'_> {
        LayoutDisplay { board: self }
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        let index = self.checked_index(coords);
        &mut self.cells[index]
    }

    fn checked_index(&self, coords: Coord2) -> usize {
        match self.index_of(coords) {
            Some(index) => index,
            None => panic!(
                "coordinates {:?} out of bounds for a {}x{} board",
                coords, self.size.0, self.size.1
            ),
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[self.checked_index(coords)]
    }
}

pub struct LayoutDisplay<'a> {
    board: &'a Board,
}

impl fmt::Display for LayoutDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.board.iter_rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                match cell.neighbor_mine_count() {
                    Some(count) => write!(f, "{count}")?,
                    None => f.write_str("*")?,
                }
            }
        }
        Ok(())
    }
}
