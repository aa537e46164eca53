use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Classic,
    Timed,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Classic, GameMode::Timed];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Timed => "timed",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for GameMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for GameMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "classic" => Ok(GameMode::Classic),
            "timed" => Ok(GameMode::Timed),
            other => Err(FromSqlError::Other(
                format!("unknown game mode: {}", other).into(),
            )),
        }
    }
}

/// Side length of the square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "i64")]
pub enum BoardSize {
    Three,
    Four,
    Five,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Three, BoardSize::Four, BoardSize::Five];

    pub fn side(self) -> i64 {
        match self {
            BoardSize::Three => 3,
            BoardSize::Four => 4,
            BoardSize::Five => 5,
        }
    }
}

impl From<BoardSize> for i64 {
    fn from(size: BoardSize) -> i64 {
        size.side()
    }
}

impl TryFrom<i64> for BoardSize {
    type Error = i64;

    fn try_from(side: i64) -> Result<Self, Self::Error> {
        match side {
            3 => Ok(BoardSize::Three),
            4 => Ok(BoardSize::Four),
            5 => Ok(BoardSize::Five),
            other => Err(other),
        }
    }
}

impl ToSql for BoardSize {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.side()))
    }
}

impl FromSql for BoardSize {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let side = value.as_i64()?;
        BoardSize::try_from(side).map_err(|_| FromSqlError::OutOfRange(side))
    }
}

/// Scope of ranking and of the one-best-per-device rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    pub board_size: BoardSize,
    pub game_mode: GameMode,
}

impl Category {
    pub fn new(board_size: BoardSize, game_mode: GameMode) -> Self {
        Category {
            board_size,
            game_mode,
        }
    }

    /// Every board size paired with every mode.
    pub fn all() -> impl Iterator<Item = Category> {
        BoardSize::ALL.into_iter().flat_map(|board_size| {
            GameMode::ALL
                .into_iter()
                .map(move |game_mode| Category::new(board_size, game_mode))
        })
    }

    /// e.g. `classic_4x4`
    pub fn label(&self) -> String {
        let side = self.board_size.side();
        format!("{}_{}x{}", self.game_mode, side, side)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSubmission {
    pub device_id: String,
    pub player_name: String,
    pub time_seconds: i64,
    pub moves: i64,
    pub board_size: i64,
    pub game_mode: GameMode,
}

/// A submission that passed validation and may touch storage.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub device_id: String,
    pub player_name: String,
    pub time_seconds: i64,
    pub moves: i64,
    pub category: Category,
}

impl ValidSubmission {
    pub fn rank_key(&self) -> (i64, i64) {
        self.category
            .game_mode
            .rank_key(self.moves, self.time_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub device_id: String,
    pub player_name: String,
    pub time_seconds: i64,
    pub moves: i64,
    pub board_size: BoardSize,
    pub game_mode: GameMode,
    pub created_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn rank_key(&self) -> (i64, i64) {
        self.game_mode.rank_key(self.moves, self.time_seconds)
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub board_size: i64,
    pub game_mode: GameMode,
    pub limit: Option<i64>,
    pub device_id: String,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_count: i64,
    pub board_size: BoardSize,
    pub game_mode: GameMode,
    pub user_position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub board_size: i64,
    pub game_mode: GameMode,
    pub top_n: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        let labels: Vec<String> = Category::all().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], "classic_3x3");
        assert_eq!(labels[3], "timed_4x4");
        assert_eq!(labels[5], "timed_5x5");
    }

    #[test]
    fn test_board_size_bounds() {
        assert_eq!(BoardSize::try_from(4), Ok(BoardSize::Four));
        assert_eq!(BoardSize::try_from(2), Err(2));
        assert_eq!(BoardSize::try_from(6), Err(6));
    }

    #[test]
    fn test_serde_shapes() {
        assert_eq!(serde_json::to_value(BoardSize::Five).unwrap(), 5);
        assert_eq!(serde_json::to_value(GameMode::Timed).unwrap(), "timed");
        let mode: Result<GameMode, _> = serde_json::from_str("\"speedrun\"");
        assert!(mode.is_err());
    }
}
