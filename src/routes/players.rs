// src/routes/players.rs
use actix_web::{get, patch, put, web, HttpResponse, Result};

use crate::config::settings::ServiceSettings;
use crate::db::store::RivalryStore;
use crate::handlers::player_handler;
use crate::models::common::Role;
use crate::models::player::{PlayerFieldsUpdate, StatIncrements};

/// List both players
#[get("/players")]
pub async fn list_players(
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    player_handler::list_players(store, settings).await
}

/// Get player by roster role (`me` or `friend`)
#[get("/players/role/{role}")]
pub async fn get_player_by_role(
    path: web::Path<Role>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    player_handler::get_player_by_role(path.into_inner(), store, settings).await
}

/// Get player by name
#[get("/players/{name}")]
pub async fn get_player(
    path: web::Path<String>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    player_handler::get_player(path.into_inner(), store, settings).await
}

/// Replace counters of a player
#[put("/players/{name}")]
pub async fn replace_player_fields(
    path: web::Path<String>,
    fields: web::Json<PlayerFieldsUpdate>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    player_handler::replace_player_fields(path.into_inner(), fields, store, settings).await
}

/// Add raw deltas to the counters of a player
#[patch("/players/{name}/increment")]
pub async fn increment_player(
    path: web::Path<String>,
    increments: web::Json<StatIncrements>,
    store: web::Data<dyn RivalryStore>,
    settings: web::Data<ServiceSettings>,
) -> Result<HttpResponse> {
    player_handler::increment_player(path.into_inner(), increments, store, settings).await
}
