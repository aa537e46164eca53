use crate::db::Db;
use crate::error::AppError;
use crate::services::stats as service;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_player_stats(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let stats = service::get_player_stats(&db, &device_id)?;
    Ok(HttpResponse::Ok().json(&stats))
}

pub async fn get_detailed_stats(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let device_id = path.into_inner();
    let stats = service::get_detailed_stats(&db, &device_id)?;
    Ok(HttpResponse::Ok().json(&stats))
}
