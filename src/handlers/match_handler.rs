use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::config::settings::ServiceSettings;
use crate::db::helpers::error_response;
use crate::db::store::RivalryStore;
use crate::models::common::ApiResponse;
use crate::models::match_record::{MatchPayload, ReverseMatchRequest};
use crate::services::MatchService;

fn match_service(store: web::Data<dyn RivalryStore>, settings: &ServiceSettings) -> MatchService {
    MatchService::new(store.into_inner(), settings.roster.clone())
}

/// All logged matches, newest first
pub async fn get_history(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match match_service(store, &settings).history().await {
        Ok(matches) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Found {} match(es)", matches.len()),
            matches,
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn submit_match(
    payload: web::Json<MatchPayload>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match match_service(store, &settings).submit_match(&payload).await {
        Ok(submitted) => Ok(HttpResponse::Created().json(ApiResponse::success("Match recorded", submitted))),
        Err(e) => {
            tracing::warn!("Failed to record match: {}", e);
            Ok(error_response(&e))
        }
    }
}

pub async fn reverse_match(
    request: web::Json<ReverseMatchRequest>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match match_service(store, &settings).reverse_match(&request).await {
        Ok(reversed) => Ok(HttpResponse::Ok().json(ApiResponse::success("Match reversed", reversed))),
        Err(e) => {
            tracing::warn!("Failed to reverse match: {}", e);
            Ok(error_response(&e))
        }
    }
}

pub async fn update_match(
    match_id: Uuid,
    payload: web::Json<MatchPayload>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match match_service(store, &settings).update_match(match_id, &payload).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated", record))),
        Err(e) => {
            tracing::warn!("Failed to update match {}: {}", match_id, e);
            Ok(error_response(&e))
        }
    }
}
