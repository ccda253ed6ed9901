use serde::{Deserialize, Serialize};
use sweep_core::{BoardGenerator, Cell, CellCount, Coord, GameSession, GameState};

/// What the player is allowed to see of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    Hidden,
    Flagged,
    Open(u8),
    /// Only shown once the game is lost.
    Mine,
    TriggeredMine,
}

impl CellView {
    pub fn of(cell: &Cell, state: GameState) -> Self {
        match (cell.is_open(), cell.has_mine()) {
            (true, true) => Self::TriggeredMine,
            (true, false) => Self::Open(cell.neighbor_mine_count().unwrap_or_default()),
            (false, _) if cell.is_flagged() => Self::Flagged,
            (false, true) if state == GameState::Lost => Self::Mine,
            (false, _) => Self::Hidden,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl From<GameState> for Status {
    fn from(state: GameState) -> Self {
        match state {
            GameState::InProgress => Self::InProgress,
            GameState::Won => Self::Won,
            GameState::Lost => Self::Lost,
        }
    }
}

/// Read-only picture of a session, row by row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub flags: CellCount,
    pub mines_left: isize,
    pub status: Status,
    pub cells: Vec<Vec<CellView>>,
}

impl BoardSnapshot {
    pub fn capture<G: BoardGenerator>(session: &GameSession<G>) -> Self {
        let board = session.board();
        let state = session.state();
        Self {
            rows: board.rows(),
            cols: board.cols(),
            mines: board.mine_count(),
            flags: session.flagged_count(),
            mines_left: session.mines_left(),
            status: state.into(),
            cells: board
                .iter_rows()
                .map(|row| row.iter().map(|cell| CellView::of(cell, state)).collect())
                .collect(),
        }
    }

    pub fn cell(&self, row: Coord, col: Coord) -> Option<CellView> {
        self.cells
            .get(usize::from(row))?
            .get(usize::from(col))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_core::{FixedLayout, GameConfig};

    fn session(size: (Coord, Coord), mines: &[(Coord, Coord)]) -> GameSession<FixedLayout> {
        let config = GameConfig::new(size, mines.len() as CellCount).unwrap();
        GameSession::new(config, FixedLayout::new(mines)).unwrap()
    }

    #[test]
    fn fresh_board_is_all_hidden() {
        let snapshot = BoardSnapshot::capture(&session((2, 3), &[(0, 0)]));

        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.cols, 3);
        assert_eq!(snapshot.mines, 1);
        assert_eq!(snapshot.flags, 0);
        assert_eq!(snapshot.status, Status::InProgress);
        assert_eq!(snapshot.cells.len(), 2);
        assert!(snapshot.cells.iter().flatten().all(|&view| view == CellView::Hidden));
    }

    #[test]
    fn mines_stay_hidden_until_the_game_is_lost() {
        let mut session = session((2, 2), &[(0, 0), (1, 1)]);
        session.toggle_flag((1, 1)).unwrap();
        session.reveal((0, 1)).unwrap();

        let snapshot = BoardSnapshot::capture(&session);
        assert_eq!(snapshot.cell(0, 0), Some(CellView::Hidden));
        assert_eq!(snapshot.cell(0, 1), Some(CellView::Open(2)));
        assert_eq!(snapshot.cell(1, 1), Some(CellView::Flagged));
        assert_eq!(snapshot.flags, 1);
        assert_eq!(snapshot.mines_left, 1);

        session.reveal((0, 0)).unwrap();
        let snapshot = BoardSnapshot::capture(&session);
        assert_eq!(snapshot.status, Status::Lost);
        assert_eq!(snapshot.cell(0, 0), Some(CellView::TriggeredMine));
        assert_eq!(snapshot.cell(1, 1), Some(CellView::Flagged));
        assert_eq!(snapshot.cell(1, 0), Some(CellView::Hidden));
    }

    #[test]
    fn unflagged_mines_show_after_loss() {
        let mut session = session((1, 3), &[(0, 0), (0, 2)]);
        session.reveal((0, 2)).unwrap();

        let snapshot = BoardSnapshot::capture(&session);
        assert_eq!(snapshot.cell(0, 0), Some(CellView::Mine));
        assert_eq!(snapshot.cell(0, 1), Some(CellView::Hidden));
        assert_eq!(snapshot.cell(0, 2), Some(CellView::TriggeredMine));
        assert_eq!(snapshot.cell(0, 3), None);
    }

    #[test]
    fn serializes_cells_in_snake_case() {
        let json = serde_json::to_string(&[CellView::Hidden, CellView::Open(3)]).unwrap();

        assert_eq!(json, r#"["hidden",{"open":3}]"#);
    }
}
