use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the board, its configuration and the play state.
///
/// The session owns its board exclusively. Callers read it through
/// [`GameSession::board`] and change it only through [`GameSession::reveal`],
/// [`GameSession::toggle_flag`] and [`GameSession::new_game`].
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    board: Board,
    state: GameState,
    opened_safe_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        let mut generator = RandomBoardGenerator::from_seed(seed);
        let board = generator.prepare(config);
        Self::with_board(config, generator, board)
    }
}

impl<G: BoardGenerator> GameSession<G> {
    /// Starts a session on the first board dealt by `generator`.
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        let board = generator.generate(config)?;
        Ok(Self::with_board(config, generator, board))
    }

    fn with_board(config: GameConfig, generator: G, board: Board) -> Self {
        debug_assert_eq!(board.size(), config.size());
        debug_assert_eq!(board.mine_count(), config.mines());
        Self {
            config,
            generator,
            board,
            state: Default::default(),
            opened_safe_count: Saturating(0),
            flagged_count: Saturating(0),
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.board.get(coords).ok_or(GameError::InvalidCoords)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn opened_safe_count(&self) -> CellCount {
        self.opened_safe_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    /// Throws away the current board and deals a fresh one with the same configuration.
    ///
    /// If the generator fails the current game is left untouched.
    pub fn new_game(&mut self) -> Result<()> {
        self.board = self.generator.generate(self.config)?;
        self.state = GameState::InProgress;
        self.opened_safe_count = Saturating(0);
        self.flagged_count = Saturating(0);
        self.triggered_mine = None;
        log::debug!(
            "New game on a {}x{} board with {} mines",
            self.board.rows(),
            self.board.cols(),
            self.board.mine_count()
        );
        Ok(())
    }

    /// Like [`GameSession::new_game`], switching to `config` once a board for it was dealt.
    pub fn restart_with(&mut self, config: GameConfig) -> Result<()> {
        let previous = core::mem::replace(&mut self.config, config);
        self.new_game().inspect_err(|_| self.config = previous)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board[coords].is_open() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.board.cell_mut(coords);
        cell.toggle_flag();
        if cell.is_flagged() {
            self.flagged_count += Saturating(1);
        } else {
            self.flagged_count -= Saturating(1);
        }
        Ok(MarkOutcome::Changed)
    }

    /// Opens the cell at `coords`, cascading through blank cells.
    ///
    /// Reveals after the game ended and reveals of open cells change nothing.
    /// Flags do not protect a cell from being opened.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board[coords].is_open() {
            return Ok(RevealOutcome::NoChange);
        }

        let outcome = self.open_cell(coords);
        if outcome != RevealOutcome::Revealed || !self.board[coords].is_blank() {
            return Ok(outcome);
        }

        // LIFO so the cascade visits cells in the same depth-first order as a
        // recursive flood fill would.
        let mut to_visit = Vec::new();
        self.push_closed_neighbors(coords, &mut to_visit);

        while let Some(visit_coords) = to_visit.pop() {
            if self.board[visit_coords].is_open() {
                continue;
            }

            match self.open_cell(visit_coords) {
                RevealOutcome::Revealed if self.board[visit_coords].is_blank() => {
                    self.push_closed_neighbors(visit_coords, &mut to_visit);
                }
                RevealOutcome::Revealed | RevealOutcome::NoChange => {}
                terminal => return Ok(terminal),
            }
        }

        Ok(RevealOutcome::Revealed)
    }

    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.board.cell_mut(coords);
        cell.open();

        if cell.has_mine() {
            self.triggered_mine = Some(coords);
            self.end_game(GameState::Lost);
            return RevealOutcome::Lost;
        }

        self.opened_safe_count += Saturating(1);
        if self.opened_safe_count.0 == self.board.safe_cell_count() {
            self.end_game(GameState::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn push_closed_neighbors(&self, coords: Coord2, to_visit: &mut Vec<Coord2>) {
        let closed: SmallVec<[Coord2; 8]> = self
            .board
            .neighbor_coords(coords)
            .filter(|&pos| !self.board[pos].is_open())
            .collect();
        to_visit.extend(closed.into_iter().rev());
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        log::debug!(
            "Game over ({:?}) with {} of {} safe cells open",
            state,
            self.opened_safe_count.0,
            self.board.safe_cell_count()
        );
    }
}
