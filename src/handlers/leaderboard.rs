use crate::db::Db;
use crate::error::AppError;
use crate::models::leaderboard::*;
use crate::services::{leaderboard as service, submission};
use crate::validation;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn submit_result(
    db: web::types::State<Arc<Db>>,
    body: web::types::Json<ResultSubmission>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let entry = submission::submit_result(&db, req)?;
    Ok(HttpResponse::Created().json(&entry))
}

pub async fn get_leaderboard(
    db: web::types::State<Arc<Db>>,
    query: web::types::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    let board_size = validation::validate_board_size(query.board_size)?;
    let category = Category::new(board_size, query.game_mode);
    let board = service::get_leaderboard(&db, category, &query.device_id, query.limit)?;
    Ok(HttpResponse::Ok().json(&board))
}

pub async fn get_top(
    db: web::types::State<Arc<Db>>,
    query: web::types::Query<TopQuery>,
) -> Result<HttpResponse, AppError> {
    let board_size = validation::validate_board_size(query.board_size)?;
    let category = Category::new(board_size, query.game_mode);
    let entries = service::get_top(&db, category, query.top_n)?;
    Ok(HttpResponse::Ok().json(&entries))
}
