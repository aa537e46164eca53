use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregates over a device's stored personal bests.
///
/// Only one best per category is kept, so `total_games` counts categories
/// with a result (at most 6), not lifetime games played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub device_id: String,
    pub total_games: i64,
    pub best_time: Option<i64>,
    pub best_moves: Option<i64>,
    pub average_time: Option<f64>,
    pub average_moves: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub games_played: i64,
    pub best_time: i64,
    pub best_moves: i64,
    pub average_time: f64,
    pub average_moves: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedStats {
    pub device_id: String,
    /// Keyed by category label, e.g. `timed_3x3`.
    pub statistics: BTreeMap<String, CategoryStats>,
}
