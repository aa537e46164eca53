pub mod leaderboard;
pub mod stats;

use crate::models::leaderboard::{BoardSize, Category, GameMode};
use ntex::web::{self, HttpResponse};

fn leaderboard_resource(path: &str) -> web::Resource<web::DefaultError> {
    web::resource(path)
        .route(web::post().to(leaderboard::submit_result))
        .route(web::get().to(leaderboard::get_leaderboard))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .service(leaderboard_resource("/leaderboard/"))
        .service(leaderboard_resource("/leaderboard"))
        .route("/leaderboard/top", web::get().to(leaderboard::get_top))
        .route("/stats/{device_id}", web::get().to(stats::get_player_stats))
        .route(
            "/stats/{device_id}/detailed",
            web::get().to(stats::get_detailed_stats),
        );
}

async fn root() -> HttpResponse {
    let board_sizes: Vec<i64> = BoardSize::ALL.iter().map(|s| s.side()).collect();
    HttpResponse::Ok().json(&serde_json::json!({
        "message": "Sliding Puzzle Leaderboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "modes": GameMode::ALL,
        "board_sizes": board_sizes,
        "categories": Category::all().map(|c| c.label()).collect::<Vec<_>>(),
    }))
}
