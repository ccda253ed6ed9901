use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position.
///
/// Only `is_open` and `is_flagged` change after the board is prepared, and
/// `is_open` never goes back to `false`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    row: Coord,
    col: Coord,
    has_mine: bool,
    is_open: bool,
    is_flagged: bool,
    /// `None` for mine cells.
    neighbor_mine_count: Option<u8>,
}

#[derive(Deserialize)]
struct RawCell {
    row: Coord,
    col: Coord,
    has_mine: bool,
    is_open: bool,
    is_flagged: bool,
    neighbor_mine_count: Option<u8>,
}

impl TryFrom<RawCell> for Cell {
    type Error = GameError;

    fn try_from(raw: RawCell) -> Result<Self> {
        match (raw.has_mine, raw.neighbor_mine_count) {
            (true, None) => {}
            (false, Some(count)) if count <= 8 => {}
            _ => return Err(GameError::InvalidBoardShape),
        }
        Ok(Self {
            row: raw.row,
            col: raw.col,
            has_mine: raw.has_mine,
            is_open: raw.is_open,
            is_flagged: raw.is_flagged,
            neighbor_mine_count: raw.neighbor_mine_count,
        })
    }
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            has_mine: false,
            is_open: false,
            is_flagged: false,
            neighbor_mine_count: None,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn neighbor_mine_count(&self) -> Option<u8> {
        self.neighbor_mine_count
    }

    /// A safe cell with no adjacent mines; opening it cascades.
    pub const fn is_blank(&self) -> bool {
        matches!(self.neighbor_mine_count, Some(0))
    }

    pub(crate) fn place_mine(&mut self) {
        self.has_mine = true;
        self.neighbor_mine_count = None;
    }

    pub(crate) fn set_neighbor_mine_count(&mut self, count: u8) {
        debug_assert!(!self.has_mine);
        self.neighbor_mine_count = Some(count);
    }

    pub(crate) fn open(&mut self) {
        self.is_open = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.is_flagged = !self.is_flagged;
    }
}
