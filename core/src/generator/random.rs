use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random mine placement driven by an owned RNG.
///
/// The RNG keeps advancing across games, so every new game gets a different
/// layout while the whole sequence stays reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl RandomBoardGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Infallible form of [`BoardGenerator::generate`].
    pub fn prepare(&mut self, config: GameConfig) -> Board {
        Board::prepare(config, &mut self.rng)
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        Ok(self.prepare(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence_of_boards() {
        let config = GameConfig::for_difficulty(Difficulty::Medium);
        let mut a = RandomBoardGenerator::from_seed(7);
        let mut b = RandomBoardGenerator::from_seed(7);

        let first = a.prepare(config);
        assert_eq!(first, b.prepare(config));

        let second = a.prepare(config);
        assert_eq!(second, b.generate(config).unwrap());
        assert_ne!(first, second);
    }

    #[test]
    fn respects_configured_mine_count() {
        let mut generator = RandomBoardGenerator::from_seed(3);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let board = generator
                .generate(GameConfig::for_difficulty(difficulty))
                .unwrap();
            let mines = board.cells().iter().filter(|cell| cell.has_mine()).count();
            assert_eq!(mines, usize::from(difficulty.mine_count()));
        }
    }
}
