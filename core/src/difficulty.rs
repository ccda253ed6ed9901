use serde::{Deserialize, Serialize};

use crate::*;

/// Named difficulty, selecting how many mines go on a default-sized board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "kolay")]
    Easy,
    #[serde(rename = "orta")]
    Medium,
    #[serde(rename = "zor")]
    Hard,
}

impl Difficulty {
    /// Maps a selection label to a difficulty. Unknown labels select `Easy`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "zor" => Self::Hard,
            "orta" => Self::Medium,
            _ => Self::Easy,
        }
    }

    pub fn from_optional_label(label: Option<&str>) -> Self {
        label.map(Self::from_label).unwrap_or_default()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "kolay",
            Self::Medium => "orta",
            Self::Hard => "zor",
        }
    }

    pub const fn mine_count(self) -> CellCount {
        match self {
            Self::Easy => 30,
            Self::Medium => 35,
            Self::Hard => 40,
        }
    }
}

impl From<&str> for Difficulty {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}
