use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::*;
use crate::validation;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const RESULT_COLUMNS: &str =
    "id, device_id, player_name, time_seconds, moves, board_size, game_mode, created_at";

pub(crate) fn map_entry(row: &Row<'_>) -> rusqlite::Result<LeaderboardEntry> {
    Ok(LeaderboardEntry {
        id: row.get(0)?,
        device_id: row.get(1)?,
        player_name: row.get(2)?,
        time_seconds: row.get(3)?,
        moves: row.get(4)?,
        board_size: row.get(5)?,
        game_mode: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn top_entries(
    conn: &Connection,
    category: Category,
    limit: i64,
) -> rusqlite::Result<Vec<LeaderboardEntry>> {
    let sql = format!(
        "SELECT {RESULT_COLUMNS} FROM results
         WHERE board_size = ?1 AND game_mode = ?2
         ORDER BY {} LIMIT ?3",
        category.game_mode.order_by_sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![category.board_size, category.game_mode, limit],
        map_entry,
    )?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

fn count_category(conn: &Connection, category: Category) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM results WHERE board_size = ?1 AND game_mode = ?2",
        params![category.board_size, category.game_mode],
        |row| row.get(0),
    )
}

/// Best stored result of `device_id` in `category`, tolerating duplicates.
pub(crate) fn device_best(
    conn: &Connection,
    device_id: &str,
    category: Category,
) -> rusqlite::Result<Option<LeaderboardEntry>> {
    let sql = format!(
        "SELECT {RESULT_COLUMNS} FROM results
         WHERE device_id = ?1 AND board_size = ?2 AND game_mode = ?3
         ORDER BY {} LIMIT 1",
        category.game_mode.order_by_sql()
    );
    conn.query_row(
        &sql,
        params![device_id, category.board_size, category.game_mode],
        map_entry,
    )
    .optional()
}

/// 1 + number of results in the category strictly better than `entry`.
fn rank_by_count(conn: &Connection, entry: &LeaderboardEntry) -> rusqlite::Result<i64> {
    let mode = entry.game_mode;
    let (primary, tiebreak) = entry.rank_key();
    let sql = format!(
        "SELECT COUNT(*) FROM results
         WHERE board_size = ?1 AND game_mode = ?2 AND {}",
        mode.precedes_sql(3, 4)
    );
    let ahead: i64 = conn.query_row(
        &sql,
        params![entry.board_size, mode, primary, tiebreak],
        |row| row.get(0),
    )?;
    Ok(ahead + 1)
}

/// Rank of `device_id` inside an already-sorted top window.
///
/// `entries` is a prefix of the full category ordering, so everything that
/// strictly precedes a member of the window is also in the window.
fn rank_in_window(entries: &[LeaderboardEntry], device_id: &str) -> Option<i64> {
    let index = entries.iter().position(|e| e.device_id == device_id)?;
    let key = entries[index].rank_key();
    let ahead = entries[..index]
        .iter()
        .take_while(|e| e.rank_key() < key)
        .count();
    Some(ahead as i64 + 1)
}

pub fn get_leaderboard(
    db: &Db,
    category: Category,
    device_id: &str,
    limit: Option<i64>,
) -> Result<LeaderboardResponse, AppError> {
    validation::validate_device_id(device_id)?;
    let limit = validation::validate_window(
        "limit",
        limit,
        validation::DEFAULT_LEADERBOARD_LIMIT,
        validation::MAX_LEADERBOARD_LIMIT,
    )?;

    Ok(db.with_conn(|conn| {
        let entries = top_entries(conn, category, limit)?;
        let total_count = count_category(conn, category)?;

        let user_position = match rank_in_window(&entries, device_id) {
            Some(position) => Some(position),
            None => match device_best(conn, device_id, category)? {
                Some(best) => Some(rank_by_count(conn, &best)?),
                None => None,
            },
        };

        Ok(LeaderboardResponse {
            entries,
            total_count,
            board_size: category.board_size,
            game_mode: category.game_mode,
            user_position,
        })
    })?)
}

pub fn get_top(
    db: &Db,
    category: Category,
    top_n: Option<i64>,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let top_n = validation::validate_window(
        "top_n",
        top_n,
        validation::DEFAULT_TOP_N,
        validation::MAX_TOP_N,
    )?;
    Ok(db.with_conn(|conn| top_entries(conn, category, top_n))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::submission::submit_result;
    use proptest::prelude::*;

    fn submit(db: &Db, device: &str, category: Category, moves: i64, time_seconds: i64) {
        submit_result(
            db,
            ResultSubmission {
                device_id: device.into(),
                player_name: format!("Player {}", device),
                time_seconds,
                moves,
                board_size: category.board_size.side(),
                game_mode: category.game_mode,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_timed_rank_outside_window() {
        let db = Db::open_in_memory().unwrap();
        let category = Category::new(BoardSize::Three, GameMode::Timed);
        for (i, time) in [10, 20, 20, 30, 40].into_iter().enumerate() {
            submit(&db, &format!("d{}", i), category, 50, time);
        }
        submit(&db, "late", category, 50, 25);

        let board = get_leaderboard(&db, category, "late", Some(3)).unwrap();
        let times: Vec<i64> = board.entries.iter().map(|e| e.time_seconds).collect();
        assert_eq!(times, vec![10, 20, 20]);
        assert_eq!(board.total_count, 6);
        assert_eq!(board.user_position, Some(4));
    }

    #[test]
    fn test_rank_inside_window_and_unranked() {
        let db = Db::open_in_memory().unwrap();
        let category = Category::new(BoardSize::Four, GameMode::Classic);
        submit(&db, "a", category, 30, 90);
        submit(&db, "b", category, 25, 200);
        submit(&db, "c", category, 30, 80);

        let board = get_leaderboard(&db, category, "a", None).unwrap();
        let devices: Vec<&str> = board.entries.iter().map(|e| e.device_id.as_str()).collect();
        assert_eq!(devices, vec!["b", "c", "a"]);
        assert_eq!(board.user_position, Some(3));

        let board = get_leaderboard(&db, category, "nobody", None).unwrap();
        assert_eq!(board.user_position, None);
        assert_eq!(board.total_count, 3);
    }

    #[test]
    fn test_tied_results_share_rank() {
        let db = Db::open_in_memory().unwrap();
        let category = Category::new(BoardSize::Five, GameMode::Timed);
        submit(&db, "first", category, 100, 60);
        submit(&db, "second", category, 100, 60);
        submit(&db, "third", category, 90, 70);

        let in_window = get_leaderboard(&db, category, "second", Some(3)).unwrap();
        assert_eq!(in_window.user_position, Some(1));
        let third = get_leaderboard(&db, category, "third", Some(1)).unwrap();
        assert_eq!(third.user_position, Some(3));
    }

    #[test]
    fn test_categories_are_isolated() {
        let db = Db::open_in_memory().unwrap();
        let classic = Category::new(BoardSize::Three, GameMode::Classic);
        let timed = Category::new(BoardSize::Three, GameMode::Timed);
        submit(&db, "a", classic, 20, 30);
        submit(&db, "b", timed, 20, 30);

        let board = get_leaderboard(&db, classic, "b", None).unwrap();
        assert_eq!(board.total_count, 1);
        assert_eq!(board.user_position, None);
    }

    #[test]
    fn test_top_window() {
        let db = Db::open_in_memory().unwrap();
        let category = Category::new(BoardSize::Four, GameMode::Timed);
        for i in 0..15 {
            submit(&db, &format!("d{}", i), category, 10, 100 - i);
        }

        let top = get_top(&db, category, None).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].time_seconds, 86);
        assert!(top.windows(2).all(|w| w[0].rank_key() <= w[1].rank_key()));

        assert!(matches!(
            get_top(&db, category, Some(51)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_limit() {
        let db = Db::open_in_memory().unwrap();
        let category = Category::new(BoardSize::Four, GameMode::Timed);
        assert!(matches!(
            get_leaderboard(&db, category, "a", Some(101)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            get_leaderboard(&db, category, "", None),
            Err(AppError::Validation(_))
        ));
    }

    fn naive_position(results: &[(i64, i64)], mode: GameMode, device: usize) -> i64 {
        let mut keys: Vec<(i64, i64)> = results
            .iter()
            .map(|&(moves, time)| mode.rank_key(moves, time))
            .collect();
        let target = keys[device];
        keys.sort();
        keys.iter().position(|k| *k == target).unwrap() as i64 + 1
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_position_matches_full_sort(
            results in prop::collection::vec((1i64..8, 1i64..8), 1..25),
            timed in any::<bool>(),
            limit in 1i64..10,
        ) {
            let mode = if timed { GameMode::Timed } else { GameMode::Classic };
            let category = Category::new(BoardSize::Four, mode);
            let db = Db::open_in_memory().unwrap();
            for (i, &(moves, time)) in results.iter().enumerate() {
                submit(&db, &format!("d{}", i), category, moves, time);
            }

            let mut sorted: Vec<(i64, i64)> = results
                .iter()
                .map(|&(moves, time)| mode.rank_key(moves, time))
                .collect();
            sorted.sort();

            for device in 0..results.len() {
                let board = get_leaderboard(&db, category, &format!("d{}", device), Some(limit)).unwrap();
                prop_assert_eq!(board.total_count, results.len() as i64);
                prop_assert_eq!(board.entries.len(), results.len().min(limit as usize));
                let window: Vec<(i64, i64)> = board.entries.iter().map(|e| e.rank_key()).collect();
                prop_assert_eq!(&window[..], &sorted[..window.len()]);
                prop_assert_eq!(board.user_position, Some(naive_position(&results, mode, device)));
            }
        }
    }
}
