use crate::error::AppError;
use crate::models::leaderboard::{BoardSize, Category, ResultSubmission, ValidSubmission};

const MAX_DEVICE_ID_LEN: usize = 100;
const MAX_PLAYER_NAME_LEN: usize = 50;

pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 50;
pub const MAX_LEADERBOARD_LIMIT: i64 = 100;
pub const DEFAULT_TOP_N: i64 = 10;
pub const MAX_TOP_N: i64 = 50;

pub fn validate_device_id(device_id: &str) -> Result<(), AppError> {
    let len = device_id.chars().count();
    if len == 0 || len > MAX_DEVICE_ID_LEN {
        Err(AppError::Validation(format!(
            "Device id must be 1-{} characters",
            MAX_DEVICE_ID_LEN
        )))
    } else {
        Ok(())
    }
}

pub fn validate_player_name(name: &str) -> Result<(), AppError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_PLAYER_NAME_LEN {
        Err(AppError::Validation(format!(
            "Player name must be 1-{} characters",
            MAX_PLAYER_NAME_LEN
        )))
    } else {
        Ok(())
    }
}

pub fn validate_positive(field: &str, value: i64) -> Result<(), AppError> {
    if value < 1 {
        Err(AppError::Validation(format!("{} must be at least 1", field)))
    } else {
        Ok(())
    }
}

pub fn validate_board_size(side: i64) -> Result<BoardSize, AppError> {
    BoardSize::try_from(side)
        .map_err(|side| AppError::Validation(format!("Board size must be 3, 4 or 5, got {}", side)))
}

/// Applies `default` when absent; out-of-range values are rejected, not clamped.
pub fn validate_window(
    field: &str,
    value: Option<i64>,
    default: i64,
    max: i64,
) -> Result<i64, AppError> {
    let value = value.unwrap_or(default);
    if value < 1 || value > max {
        Err(AppError::Validation(format!("{} must be 1-{}", field, max)))
    } else {
        Ok(value)
    }
}

pub fn validate_submission(req: ResultSubmission) -> Result<ValidSubmission, AppError> {
    let board_size = validate_board_size(req.board_size)?;
    validate_device_id(&req.device_id)?;
    validate_player_name(&req.player_name)?;
    validate_positive("time_seconds", req.time_seconds)?;
    validate_positive("moves", req.moves)?;

    Ok(ValidSubmission {
        device_id: req.device_id,
        player_name: req.player_name,
        time_seconds: req.time_seconds,
        moves: req.moves,
        category: Category::new(board_size, req.game_mode),
    })
}
