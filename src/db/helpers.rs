//! Mapping of store errors onto HTTP responses.
//!
//! Not-found and validation errors are the client's fault and carry their
//! message back. Anything from the database is logged and reported as a
//! generic server error.
//!
//! # Usage
//! ```ignore
//! match store.find_player_by_name(&name).await {
//!     Ok(player) => Ok(HttpResponse::Ok().json(ApiResponse::success("Player found", player))),
//!     Err(e) => Ok(error_response(&e)),
//! }
//! ```

use actix_web::HttpResponse;

use crate::error::TrackerError;
use crate::models::common::ApiResponse;

pub fn error_response(error: &TrackerError) -> HttpResponse {
    match error {
        TrackerError::NotFound(message) => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(message.clone()))
        }
        TrackerError::Validation(message) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.clone()))
        }
        TrackerError::Database(e) => {
            tracing::error!("Database error: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"))
        }
        TrackerError::Migration(e) => {
            tracing::error!("Migration error: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"))
        }
    }
}
