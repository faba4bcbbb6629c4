// src/routes/matches.rs
use actix_web::{get, post, put, web, HttpResponse, Result};
use uuid::Uuid;

use crate::config::settings::ServiceSettings;
use crate::db::store::RivalryStore;
use crate::handlers::match_handler;
use crate::models::match_record::{MatchPayload, ReverseMatchRequest};

/// Match history, newest first
#[get("/history")]
pub async fn get_history(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match_handler::get_history(store, settings).await
}

/// Record a match and update both players
#[post("/matches")]
pub async fn submit_match(
    payload: web::Json<MatchPayload>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match_handler::submit_match(payload, store, settings).await
}

/// Undo a match, optionally dropping its log entry
#[post("/matches/reverse")]
pub async fn reverse_match(
    request: web::Json<ReverseMatchRequest>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match_handler::reverse_match(request, store, settings).await
}

/// Overwrite a logged match
#[put("/matches/{id}")]
pub async fn update_match(
    path: web::Path<Uuid>,
    payload: web::Json<MatchPayload>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    match_handler::update_match(path.into_inner(), payload, store, settings).await
}
