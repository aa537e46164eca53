use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::*;
use crate::services::leaderboard::{map_entry, RESULT_COLUMNS};
use crate::validation;
use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

fn device_results(
    conn: &Connection,
    device_id: &str,
    category: Category,
) -> rusqlite::Result<Vec<LeaderboardEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESULT_COLUMNS} FROM results
         WHERE device_id = ?1 AND board_size = ?2 AND game_mode = ?3"
    ))?;
    let rows = stmt.query_map(
        params![device_id, category.board_size, category.game_mode],
        map_entry,
    )?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Stores `req` as the device's personal best for its category.
///
/// Rejected with `NotAnImprovement` unless the submission is strictly
/// better than every result already stored for the device in that
/// category. On success the previous best is deleted and the new one
/// inserted in the same transaction.
pub fn submit_result(db: &Db, req: ResultSubmission) -> Result<LeaderboardEntry, AppError> {
    let candidate = validation::validate_submission(req)?;
    let category = candidate.category;

    db.with_tx(|tx| {
        let existing = device_results(tx, &candidate.device_id, category)?;

        if let Some(best) = existing.iter().min_by_key(|e| e.rank_key()) {
            if candidate.rank_key() >= best.rank_key() {
                tracing::debug!(
                    device_id = %candidate.device_id,
                    category = %category.label(),
                    moves = candidate.moves,
                    time_seconds = candidate.time_seconds,
                    "submission rejected, not an improvement"
                );
                return Err(AppError::NotAnImprovement {
                    current_moves: best.moves,
                    current_time_seconds: best.time_seconds,
                });
            }

            if existing.len() > 1 {
                tracing::warn!(
                    device_id = %candidate.device_id,
                    category = %category.label(),
                    count = existing.len(),
                    "multiple stored results for one device, replacing all"
                );
            }

            tx.execute(
                "DELETE FROM results WHERE device_id = ?1 AND board_size = ?2 AND game_mode = ?3",
                params![candidate.device_id, category.board_size, category.game_mode],
            )?;
        }

        let entry = LeaderboardEntry {
            id: Uuid::new_v4().to_string(),
            device_id: candidate.device_id.clone(),
            player_name: candidate.player_name.clone(),
            time_seconds: candidate.time_seconds,
            moves: candidate.moves,
            board_size: category.board_size,
            game_mode: category.game_mode,
            created_at: Utc::now(),
        };

        tx.execute(
            &format!("INSERT INTO results ({RESULT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
            params![
                entry.id,
                entry.device_id,
                entry.player_name,
                entry.time_seconds,
                entry.moves,
                entry.board_size,
                entry.game_mode,
                entry.created_at,
            ],
        )?;

        tracing::info!(
            id = %entry.id,
            device_id = %entry.device_id,
            category = %category.label(),
            moves = entry.moves,
            time_seconds = entry.time_seconds,
            replaced = existing.len(),
            "personal best stored"
        );
        Ok(entry)
    })
}
