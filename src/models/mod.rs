pub mod leaderboard;
pub mod stats;
