use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::{BoardSize, Category, GameMode};
use crate::models::stats::*;
use rusqlite::params;
use std::collections::BTreeMap;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn get_player_stats(db: &Db, device_id: &str) -> Result<PlayerStats, AppError> {
    Ok(db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*), MIN(time_seconds), MIN(moves), AVG(time_seconds), AVG(moves)
             FROM results WHERE device_id = ?1",
            params![device_id],
            |row| {
                Ok(PlayerStats {
                    device_id: device_id.to_string(),
                    total_games: row.get(0)?,
                    best_time: row.get(1)?,
                    best_moves: row.get(2)?,
                    average_time: row.get(3)?,
                    average_moves: row.get(4)?,
                })
            },
        )
    })?)
}

pub fn get_detailed_stats(db: &Db, device_id: &str) -> Result<DetailedStats, AppError> {
    let rows = db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT board_size, game_mode, COUNT(*), MIN(time_seconds), MIN(moves),
             AVG(time_seconds), AVG(moves)
             FROM results WHERE device_id = ?1
             GROUP BY board_size, game_mode",
        )?;
        let rows = stmt.query_map(params![device_id], |row| {
            let category = Category::new(
                row.get::<_, BoardSize>(0)?,
                row.get::<_, GameMode>(1)?,
            );
            Ok((
                category,
                CategoryStats {
                    games_played: row.get(2)?,
                    best_time: row.get(3)?,
                    best_moves: row.get(4)?,
                    average_time: round2(row.get(5)?),
                    average_moves: round2(row.get(6)?),
                },
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })?;

    let statistics: BTreeMap<String, CategoryStats> = rows
        .into_iter()
        .map(|(category, stats)| (category.label(), stats))
        .collect();

    Ok(DetailedStats {
        device_id: device_id.to_string(),
        statistics,
    })
}
