//! The per-mode ordering rule shared by submissions and rankings.
//!
//! Lower is better on both keys. `classic` ranks by moves then time,
//! `timed` ranks by time then moves.

use crate::models::leaderboard::GameMode;

impl GameMode {
    pub fn primary_column(self) -> &'static str {
        match self {
            GameMode::Classic => "moves",
            GameMode::Timed => "time_seconds",
        }
    }

    pub fn tiebreak_column(self) -> &'static str {
        match self {
            GameMode::Classic => "time_seconds",
            GameMode::Timed => "moves",
        }
    }

    /// `(primary, tie-break)` pair; compares lexicographically.
    pub fn rank_key(self, moves: i64, time_seconds: i64) -> (i64, i64) {
        match self {
            GameMode::Classic => (moves, time_seconds),
            GameMode::Timed => (time_seconds, moves),
        }
    }

    /// ORDER BY body. Equal keys fall back to insertion order.
    pub fn order_by_sql(self) -> String {
        format!(
            "{} ASC, {} ASC, rowid ASC",
            self.primary_column(),
            self.tiebreak_column()
        )
    }

    /// Predicate matching rows that strictly precede `(?primary, ?tiebreak)`.
    pub fn precedes_sql(self, primary_param: usize, tiebreak_param: usize) -> String {
        let p = self.primary_column();
        let t = self.tiebreak_column();
        format!(
            "({p} < ?{primary_param} OR ({p} = ?{primary_param} AND {t} < ?{tiebreak_param}))"
        )
    }
}
