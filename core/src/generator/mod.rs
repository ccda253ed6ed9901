use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Source of fresh boards, invoked once per new game.
///
/// A generated board always has the configured size and mine count.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board>;
}

/// Replays the same mine positions for every game.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayout {
    mines: Vec<Coord2>,
}

impl FixedLayout {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl BoardGenerator for FixedLayout {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        let board = Board::from_mine_coords(config.size(), &self.mines)?;
        if board.mine_count() != config.mines() {
            log::warn!(
                "Fixed layout has {} mines, configuration asks for {}",
                board.mine_count(),
                config.mines()
            );
            return Err(GameError::LayoutMismatch);
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layout_replays_the_same_board() {
        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut generator = FixedLayout::new([(1, 1)]);

        let first = generator.generate(config).unwrap();
        let second = generator.generate(config).unwrap();

        assert_eq!(first, second);
        assert!(first[(1, 1)].has_mine());
        assert_eq!(first.mine_count(), 1);
    }

    #[test]
    fn fixed_layout_rejects_out_of_bounds_mines() {
        let config = GameConfig::new((2, 2), 2).unwrap();

        assert_eq!(
            FixedLayout::new([(0, 0), (4, 4)]).generate(config),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn fixed_layout_must_match_configured_mine_count() {
        let config = GameConfig::new((3, 3), 5).unwrap();

        assert_eq!(
            FixedLayout::new([(1, 1)]).generate(config),
            Err(GameError::LayoutMismatch)
        );
    }

    #[test]
    fn fixed_layout_that_fills_the_board_is_rejected() {
        let config = GameConfig::new((1, 2), 1).unwrap();

        assert_eq!(
            FixedLayout::new([(0, 0), (0, 1)]).generate(config),
            Err(GameError::TooManyMines)
        );
    }
}
