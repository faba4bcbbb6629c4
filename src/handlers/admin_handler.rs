use actix_web::{web, HttpResponse, Result};

use crate::config::settings::ServiceSettings;
use crate::db::helpers::error_response;
use crate::db::store::RivalryStore;
use crate::models::common::ApiResponse;
use crate::services::PlayerService;

/// Wipe all data and reseed the roster. Refused unless enabled in configuration.
pub async fn reset_all(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    if !settings.allow_reset {
        tracing::warn!("Rejected reset request: reset is disabled");
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error("Reset is disabled")));
    }

    let service = PlayerService::new(store.into_inner(), settings.roster.clone());
    match service.reset().await {
        Ok(players) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Reset complete, all data cleared",
            players,
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
