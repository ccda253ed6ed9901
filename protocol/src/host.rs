use sweep_core::{
    BoardGenerator, Difficulty, GameConfig, GameSession, RandomBoardGenerator, RevealOutcome,
};

use crate::*;

/// Owns one session and turns commands into events.
#[derive(Clone, Debug)]
pub struct GameHost<G = RandomBoardGenerator> {
    session: GameSession<G>,
    difficulty: Difficulty,
}

impl GameHost {
    /// Starts a session on the default board for the given difficulty label.
    pub fn new(label: Option<&str>, seed: u64) -> Self {
        let difficulty = Difficulty::from_optional_label(label);
        let session = GameSession::from_seed(GameConfig::for_difficulty(difficulty), seed);
        Self::with_session(session, difficulty)
    }
}

impl<G: BoardGenerator> GameHost<G> {
    pub fn with_session(session: GameSession<G>, difficulty: Difficulty) -> Self {
        Self {
            session,
            difficulty,
        }
    }

    pub fn session(&self) -> &GameSession<G> {
        &self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.session)
    }

    pub fn handle(&mut self, command: Command) -> Event {
        log::debug!("Handling {command:?}");
        match command {
            Command::NewGame { difficulty } => {
                let dealt = match difficulty {
                    Some(label) => {
                        let difficulty = Difficulty::from_label(&label);
                        self.session
                            .restart_with(GameConfig::for_difficulty(difficulty))
                            .map(|()| self.difficulty = difficulty)
                    }
                    None => self.session.new_game(),
                };
                match dealt {
                    Ok(()) => self.board_event(),
                    Err(err) => Self::rejected(err.into()),
                }
            }
            Command::Reveal { row, col } => match self.session.reveal((row, col)) {
                Ok(RevealOutcome::Won) => self.game_over_event(GameResult::Won),
                Ok(RevealOutcome::Lost) => self.game_over_event(GameResult::Lost),
                Ok(_) => self.board_event(),
                Err(err) => Self::rejected(err.into()),
            },
            Command::ToggleFlag { row, col } => match self.session.toggle_flag((row, col)) {
                Ok(_) => self.board_event(),
                Err(err) => Self::rejected(err.into()),
            },
        }
    }

    /// Decodes a JSON command, applies it and encodes the resulting event.
    pub fn handle_json(&mut self, text: &str) -> Result<String> {
        let command = decode_command(text)?;
        encode_event(&self.handle(command))
    }

    fn board_event(&self) -> Event {
        Event::Board {
            snapshot: self.snapshot(),
        }
    }

    fn game_over_event(&self, result: GameResult) -> Event {
        log::info!("Game over: {result:?}");
        Event::GameOver {
            result,
            snapshot: self.snapshot(),
        }
    }

    fn rejected(err: ProtocolError) -> Event {
        log::warn!("Rejected command: {err}");
        Event::Rejected {
            reason: err.to_string(),
        }
    }
}
