//! Messages exchanged between a game session and whatever presents it.
//!
//! Commands come in as JSON objects tagged by `type`, events go out the same
//! way. The presentation side never touches the board directly, it only sees
//! [`BoardSnapshot`]s.

use serde::{Deserialize, Serialize};
use sweep_core::{Coord, GameError};
use thiserror::Error;

pub use host::*;
pub use snapshot::*;

mod host;
mod snapshot;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed command: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Starts over. A difficulty label switches the configuration first.
    NewGame {
        #[serde(default)]
        difficulty: Option<String>,
    },
    Reveal {
        row: Coord,
        col: Coord,
    },
    ToggleFlag {
        row: Coord,
        col: Coord,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Board {
        snapshot: BoardSnapshot,
    },
    /// Sent once, on the move that ends the game.
    GameOver {
        result: GameResult,
        snapshot: BoardSnapshot,
    },
    Rejected {
        reason: String,
    },
}

pub fn decode_command(text: &str) -> Result<Command> {
    serde_json::from_str(text).map_err(ProtocolError::Decode)
}

pub fn encode_event(event: &Event) -> Result<String> {
    serde_json::to_string(event).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_tagged_commands() {
        assert_eq!(
            decode_command(r#"{"type":"reveal","row":3,"col":4}"#).unwrap(),
            Command::Reveal { row: 3, col: 4 }
        );
        assert_eq!(
            decode_command(r#"{"type":"toggle_flag","row":0,"col":9}"#).unwrap(),
            Command::ToggleFlag { row: 0, col: 9 }
        );
        assert_eq!(
            decode_command(r#"{"type":"new_game","difficulty":"zor"}"#).unwrap(),
            Command::NewGame {
                difficulty: Some("zor".into())
            }
        );
        assert_eq!(
            decode_command(r#"{"type":"new_game"}"#).unwrap(),
            Command::NewGame { difficulty: None }
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(matches!(
            decode_command(r#"{"type":"explode"}"#),
            Err(ProtocolError::Decode(_))
        ));
        assert!(matches!(
            decode_command(r#"{"type":"reveal","row":-1,"col":0}"#),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn encodes_rejection() {
        let event = Event::Rejected {
            reason: "Invalid coordinates".into(),
        };

        assert_eq!(
            encode_event(&event).unwrap(),
            r#"{"type":"rejected","reason":"Invalid coordinates"}"#
        );
    }
}
