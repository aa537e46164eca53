use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("{0}")]
    Validation(String),

    #[error(
        "Not an improvement: current best is {current_moves} moves in {current_time_seconds}s"
    )]
    NotAnImprovement {
        current_moves: i64,
        current_time_seconds: i64,
    },
}

impl WebResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotAnImprovement { .. } => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        let message = match self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "storage failure");
                "Database error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(&serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotAnImprovement {
                current_moves: 10,
                current_time_seconds: 20
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(rusqlite::Error::QueryReturnedNoRows).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_an_improvement_message_names_current_best() {
        let err = AppError::NotAnImprovement {
            current_moves: 35,
            current_time_seconds: 100,
        };
        assert_eq!(
            err.to_string(),
            "Not an improvement: current best is 35 moves in 100s"
        );
    }
}
